//! Read-only listing handlers

use crate::app::AppState;
use crate::models::{CourseSchedule, Enrollment};
use crate::services;
use axum::{extract::State, response::Json};
use common::{AppError, ErrorResponse, SuccessResponse};
use std::sync::Arc;
use tracing::error;

/// List active enrollments
#[utoipa::path(
    get,
    path = "/enrollments",
    responses(
        (status = 200, description = "Active enrollments", body = SuccessResponse<Vec<Enrollment>>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "listings"
)]
pub async fn list_enrollments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse<Vec<Enrollment>>>, AppError> {
    match services::get_active_enrollments(&state.database).await {
        Ok(enrollments) => Ok(Json(
            SuccessResponse::new(enrollments).with_message("Enrollments fetched successfully."),
        )),
        Err(e) => {
            error!("Failed to fetch enrollments: {}", e);
            Err(AppError::internal_error("Failed to fetch enrollments").with_details(e.to_string()))
        },
    }
}

/// List active course schedule entries
#[utoipa::path(
    get,
    path = "/course_schedule",
    responses(
        (status = 200, description = "Active course schedule", body = SuccessResponse<Vec<CourseSchedule>>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "listings"
)]
pub async fn list_course_schedule(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse<Vec<CourseSchedule>>>, AppError> {
    match services::get_active_course_schedules(&state.database).await {
        Ok(schedules) => Ok(Json(
            SuccessResponse::new(schedules).with_message("Course schedule fetched successfully."),
        )),
        Err(e) => {
            error!("Failed to fetch course schedule: {}", e);
            Err(AppError::internal_error("Failed to fetch course schedule")
                .with_details(e.to_string()))
        },
    }
}
