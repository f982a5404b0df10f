//! Student record service
//!
//! Bulk writes run one statement per item, then a single batched re-fetch of
//! every row they touched.

use super::ServiceOutcome;
use crate::models::{Student, StudentFields, StudentStore, StudentUpdate};
use axum::http::StatusCode;
use common::error::Result;
use common::ErrorMessage;
use serde_json::Value;
use tracing::{debug, info, warn};

pub async fn get_all_students(store: &dyn StudentStore, active_only: bool) -> Result<Vec<Student>> {
    let students = store.read_all(active_only).await?;
    debug!(count = students.len(), active_only, "Fetched students");
    Ok(students)
}

pub async fn get_student_by_id(store: &dyn StudentStore, id: i64) -> Result<Option<Student>> {
    store.read_by_id(id).await
}

/// Insert every item; 201 with the created rows, or 400 if none were created
///
/// A store error (e.g. duplicate email) aborts the batch and propagates;
/// items inserted before it stay committed.
pub async fn create_new_students(
    store: &dyn StudentStore,
    items: &[StudentFields],
) -> Result<ServiceOutcome<Student>> {
    let mut created_ids = Vec::with_capacity(items.len());
    for item in items {
        if let Some(id) = store.insert(item).await? {
            created_ids.push(id);
        }
    }

    if created_ids.is_empty() {
        return Ok(ServiceOutcome::bad_request("No students were created"));
    }

    let students = store.read_by_ids(&created_ids).await?;
    info!(count = created_ids.len(), "Students created");
    Ok(ServiceOutcome::success(students, StatusCode::CREATED))
}

/// Update every item; 200 with the updated rows, or 400 listing the misses
pub async fn update_students(
    store: &dyn StudentStore,
    items: &[StudentUpdate],
) -> Result<ServiceOutcome<Student>> {
    let mut targets = Vec::with_capacity(items.len());
    for item in items {
        match item.id {
            Some(id) => targets.push((id, &item.fields)),
            None => return Ok(ServiceOutcome::bad_request("Missing student ID for update.")),
        }
    }

    let mut updated_ids = Vec::with_capacity(targets.len());
    let mut errors = Vec::new();
    for (id, fields) in targets {
        if store.update(id, fields).await? == 0 {
            errors.push(ErrorMessage::new(format!("Student ID {} not updated.", id)));
        } else {
            updated_ids.push(id);
        }
    }

    if !errors.is_empty() {
        if !updated_ids.is_empty() {
            warn!(
                committed = ?updated_ids,
                failed = errors.len(),
                "Update batch rejected after some rows were already written"
            );
        }
        return Ok(ServiceOutcome::rejected(errors, StatusCode::BAD_REQUEST));
    }

    let students = store.read_by_ids(&updated_ids).await?;
    info!(count = updated_ids.len(), "Students updated");
    Ok(ServiceOutcome::success(students, StatusCode::OK))
}

/// Archive every id; ids that were missing or already archived are dropped
///
/// `ids` come straight from the request body so that non-integers can be
/// rejected here before any database access.
pub async fn archive_students(
    store: &dyn StudentStore,
    ids: &[Value],
) -> Result<ServiceOutcome<Student>> {
    let Some(ids) = ids.iter().map(Value::as_i64).collect::<Option<Vec<i64>>>() else {
        return Ok(ServiceOutcome::bad_request("Student IDs must be integers"));
    };

    let mut archived_ids = Vec::with_capacity(ids.len());
    for id in ids {
        if store.archive(id).await? > 0 {
            archived_ids.push(id);
        } else {
            debug!(id, "Student not archived (missing or already archived)");
        }
    }

    let students = store.read_by_ids(&archived_ids).await?;
    info!(count = students.len(), "Students archived");
    Ok(ServiceOutcome::success(students, StatusCode::OK))
}
