//! Shared helpers for studentsrv integration tests

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::test_utils::TestDb;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use studentsrv::{create_routes, AppState, StudentsrvConfig};
use tower::util::ServiceExt;

/// Router over a fresh temporary database
///
/// Keep the returned `TestDb` alive for the duration of the test.
pub async fn create_test_app() -> (TestDb, Router) {
    let env = TestDb::create().await.unwrap();
    let state = Arc::new(AppState::new(StudentsrvConfig::default(), env.database()));
    (env, create_routes(state))
}

/// Send a request and decode the JSON response body
pub async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send(app, request).await
}

/// Send a prepared request and decode the JSON response body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes) }))
    };
    (status, body)
}

pub fn student_payload(first_name: &str, email: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": "Doe",
        "email": email,
        "address": "123 Main St",
        "city": "Anytown",
        "province": "ON",
        "country": "Canada",
        "is_international": false
    })
}

/// Create students through the API, returning their ids
pub async fn seed_students(app: &Router, payloads: Vec<Value>) -> Vec<i64> {
    let (status, body) = json_request(app, "POST", "/students", Some(Value::Array(payloads))).await;
    assert_eq!(status, StatusCode::CREATED, "seed failed: {}", body);

    let mut ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    ids
}
