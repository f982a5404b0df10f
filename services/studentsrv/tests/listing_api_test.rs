//! `/enrollments`, `/course_schedule` and service-level endpoint tests

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use axum::http::StatusCode;
use common::sqlite::Database;
use serde_json::json;
use std::sync::Arc;
use studentsrv::{create_routes, AppState, StudentsrvConfig};

mod helpers;
use helpers::{create_test_app, json_request, seed_students, student_payload};

const COURSES: &str = r#"
    INSERT INTO course_schedule (course_code, course_name, term, day_of_week, start_time, end_time, location, instructor)
        VALUES ('CS101', 'Intro to Programming', '2024F', 'Mon', '09:00', '10:30', 'Room 1', 'Hopper');
    INSERT INTO course_schedule (course_code, course_name, term, status)
        VALUES ('CS000', 'Cancelled Course', '2024F', 'cancelled');
"#;

#[tokio::test]
async fn test_home() {
    let (_env, app) = create_test_app().await;

    let (status, body) = json_request(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to the Student API" }));
}

#[tokio::test]
async fn test_course_schedule_lists_active_only() {
    let (env, app) = create_test_app().await;
    env.database().execute_script(COURSES).await.unwrap();

    let (status, body) = json_request(&app, "GET", "/course_schedule", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course schedule fetched successfully.");

    let courses = body["data"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["course_code"], "CS101");
    assert_eq!(courses[0]["instructor"], "Hopper");
}

#[tokio::test]
async fn test_enrollments_lists_active_only() {
    let (env, app) = create_test_app().await;
    seed_students(
        &app,
        vec![
            student_payload("John", "john@example.com"),
            student_payload("Jane", "jane@example.com"),
        ],
    )
    .await;
    env.database().execute_script(COURSES).await.unwrap();
    env.database()
        .execute_script(
            r#"
            INSERT INTO enrollments (student_id, course_schedule_id) VALUES (1, 1);
            INSERT INTO enrollments (student_id, course_schedule_id, status) VALUES (2, 1, 'withdrawn');
            "#,
        )
        .await
        .unwrap();

    let (status, body) = json_request(&app, "GET", "/enrollments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Enrollments fetched successfully.");

    let enrollments = body["data"].as_array().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0]["student_id"], 1);
    assert_eq!(enrollments[0]["course_schedule_id"], 1);
}

#[tokio::test]
async fn test_listing_failures_are_500() {
    // A database file without the schema: every query fails
    let dir = tempfile::tempdir().unwrap();
    let database = Database::new(dir.path().join("bare.db")).unwrap();
    let app = create_routes(Arc::new(AppState::new(StudentsrvConfig::default(), database)));

    let (status, body) = json_request(&app, "GET", "/enrollments", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch enrollments");

    let (status, body) = json_request(&app, "GET", "/course_schedule", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch course schedule");

    let (status, body) = json_request(&app, "GET", "/students", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An unexpected internal error occurred");
    assert!(body["details"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn test_health_reports_database() {
    let (_env, app) = create_test_app().await;

    let (status, body) = json_request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "connected");
}
