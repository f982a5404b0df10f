//! `/students` handlers

use super::payload::parse_body;
use crate::app::AppState;
use crate::error::{Result, StudentSrvError};
use crate::models::{Student, StudentFields, StudentUpdate};
use crate::services::{self, ServiceOutcome};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Json, Response},
};
use common::serde_helpers::deserialize_bool_flexible;
use common::{ErrorResponse, RejectionResponse, SuccessResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

/// Query string for `GET /students`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStudentsQuery {
    /// Include archived students (`true`/`false`, `1`/`0`, `yes`/`no`)
    #[serde(default, deserialize_with = "deserialize_bool_flexible")]
    pub include_archived: bool,
}

/// Body of `PATCH /students`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArchiveRequest {
    /// Student ids; every entry must be an integer
    #[schema(value_type = Vec<i64>)]
    pub ids: Vec<Value>,
}

/// Render a service outcome with the status it carries
fn outcome_response<T: Serialize>(
    outcome: ServiceOutcome<T>,
    message: impl FnOnce(usize) -> String,
) -> Response {
    let status = outcome.status;
    if outcome.is_success() {
        let message = message(outcome.data.len());
        (status, Json(SuccessResponse::new(outcome.data).with_message(message))).into_response()
    } else {
        (status, Json(RejectionResponse::new(outcome.errors))).into_response()
    }
}

/// List students
#[utoipa::path(
    get,
    path = "/students",
    params(ListStudentsQuery),
    responses(
        (status = 200, description = "Students", body = SuccessResponse<Vec<Student>>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<ListStudentsQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse<Vec<Student>>>> {
    let Query(query) = query?;
    let students =
        services::get_all_students(state.students.as_ref(), !query.include_archived).await?;

    Ok(Json(
        SuccessResponse::new(students).with_message("Students fetched successfully."),
    ))
}

/// Get one student, archived or not
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = SuccessResponse<Student>),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse<Student>>> {
    // Only integer ids can name a student
    let Path(id) = id.map_err(|rejection| {
        debug!("Student lookup with unusable id: {}", rejection.body_text());
        StudentSrvError::NotFound("Student not found".to_string())
    })?;
    match services::get_student_by_id(state.students.as_ref(), id).await? {
        Some(student) => Ok(Json(
            SuccessResponse::new(student).with_message("Student fetched successfully."),
        )),
        None => {
            debug!(id, "Student lookup missed");
            Err(StudentSrvError::NotFound("Student not found".to_string()))
        },
    }
}

/// Create students
#[utoipa::path(
    post,
    path = "/students",
    request_body = Vec<StudentFields>,
    responses(
        (status = 201, description = "Students created", body = SuccessResponse<Vec<Student>>),
        (status = 400, description = "Nothing created, missing field or integrity error", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn create_students(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let items: Vec<StudentFields> = parse_body(payload)?;
    let outcome = services::create_new_students(state.students.as_ref(), &items).await?;

    Ok(outcome_response(outcome, |n| {
        format!("{} students created successfully.", n)
    }))
}

/// Update students
#[utoipa::path(
    put,
    path = "/students",
    request_body = Vec<StudentUpdate>,
    responses(
        (status = 200, description = "Students updated", body = SuccessResponse<Vec<Student>>),
        (status = 400, description = "Missing id or a student was not updated", body = RejectionResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn update_students(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let items: Vec<StudentUpdate> = parse_body(payload)?;
    let outcome = services::update_students(state.students.as_ref(), &items).await?;

    Ok(outcome_response(outcome, |n| match n {
        1 => "Student updated successfully.".to_string(),
        n => format!("{} students updated successfully.", n),
    }))
}

/// Archive students
#[utoipa::path(
    patch,
    path = "/students",
    request_body = ArchiveRequest,
    responses(
        (status = 200, description = "Students archived", body = SuccessResponse<Vec<Student>>),
        (status = 400, description = "Non-integer id", body = RejectionResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn archive_students(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let request: ArchiveRequest = parse_body(payload)?;
    let outcome = services::archive_students(state.students.as_ref(), &request.ids).await?;

    Ok(outcome_response(outcome, |n| {
        format!("{} students archived successfully.", n)
    }))
}
