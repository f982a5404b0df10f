//! Record services
//!
//! Each bulk operation returns a `ServiceOutcome`: the rows it produced, the
//! per-item problems it found and the HTTP status the handler should use.

pub mod listing;
pub mod student;

use axum::http::StatusCode;
use common::ErrorMessage;

pub use listing::{get_active_course_schedules, get_active_enrollments};
pub use student::{
    archive_students, create_new_students, get_all_students, get_student_by_id, update_students,
};

/// Rows, errors and status from a bulk operation
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOutcome<T> {
    pub data: Vec<T>,
    pub errors: Vec<ErrorMessage>,
    pub status: StatusCode,
}

impl<T> ServiceOutcome<T> {
    pub fn success(data: Vec<T>, status: StatusCode) -> Self {
        Self {
            data,
            errors: Vec::new(),
            status,
        }
    }

    pub fn rejected(errors: Vec<ErrorMessage>, status: StatusCode) -> Self {
        Self {
            data: Vec::new(),
            errors,
            status,
        }
    }

    /// Single-message 400
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::rejected(vec![ErrorMessage::new(message)], StatusCode::BAD_REQUEST)
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
