//! HTTP surface
//!
//! Routes, OpenAPI document and the small handlers that do not belong to an
//! entity.

#![allow(clippy::disallowed_methods)] // json! macro used in handlers

pub mod listing_handlers;
pub mod payload;
pub mod student_handlers;

use crate::app::AppState;
use crate::models::{CourseSchedule, Enrollment, Student, StudentFields, StudentStatus, StudentUpdate};
use axum::{extract::State, response::Json, routing::get, Router};
use common::{ErrorMessage, ErrorResponse, RejectionResponse, SuccessResponse};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;
use utoipa::OpenApi;

use listing_handlers::{list_course_schedule, list_enrollments};
use student_handlers::{
    archive_students, create_students, get_student, list_students, update_students, ArchiveRequest,
};

/// Create all API routes with state
pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route(
            "/students",
            get(list_students)
                .post(create_students)
                .put(update_students)
                .patch(archive_students),
        )
        .route("/students/{id}", get(get_student))
        .route("/enrollments", get(list_enrollments))
        .route("/course_schedule", get(list_course_schedule))
        .layer(axum::middleware::from_fn(common::logging::http_request_logger))
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        student_handlers::list_students,
        student_handlers::get_student,
        student_handlers::create_students,
        student_handlers::update_students,
        student_handlers::archive_students,
        listing_handlers::list_enrollments,
        listing_handlers::list_course_schedule
    ),
    components(schemas(
        Student,
        StudentStatus,
        StudentFields,
        StudentUpdate,
        ArchiveRequest,
        Enrollment,
        CourseSchedule,
        ErrorResponse,
        ErrorMessage,
        RejectionResponse
    )),
    tags(
        (name = "students", description = "Student records"),
        (name = "listings", description = "Enrollments and course schedule")
    )
)]
pub struct ApiDoc;

async fn home() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Student API" }))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<SuccessResponse<serde_json::Value>> {
    let database = match state.database.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            "unavailable"
        },
    };

    Json(SuccessResponse::new(json!({
        "status": if database == "connected" { "healthy" } else { "degraded" },
        "service": state.config.service.name,
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
