//! Shared API response envelopes
//!
//! Success: `{ "success": true, "message": "...", "data": ... }`
//! Failure: `{ "success": false, "error": "...", "details": "..." }`

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Envelope for a successful request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SuccessResponse<T> {
    #[serde(default = "crate::serde_helpers::bool_true")]
    pub success: bool,
    /// e.g. "2 students created successfully."
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rows produced by the request
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Attach a summary message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Envelope for a request that failed as a whole
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    #[serde(default = "crate::serde_helpers::bool_false")]
    pub success: bool,
    /// Headline, e.g. "Student not found"
    pub error: String,
    /// Underlying cause, for diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// One entry of a per-item failure list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rejection of a whole batch by a record service
///
/// `{ "success": false, "message": "<first error>", "errors": [{ "message": ... }] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RejectionResponse {
    #[serde(default = "crate::serde_helpers::bool_false")]
    pub success: bool,
    pub message: String,
    pub errors: Vec<ErrorMessage>,
}

impl RejectionResponse {
    pub fn new(errors: Vec<ErrorMessage>) -> Self {
        let message = match errors.as_slice() {
            [] => "Request rejected".to_string(),
            [only] => only.message.clone(),
            [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
        };
        Self {
            success: false,
            message,
            errors,
        }
    }
}

#[cfg(feature = "axum")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

/// Status code plus `ErrorResponse` body, ready to return from a handler
#[cfg(feature = "axum")]
#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

#[cfg(feature = "axum")]
impl AppError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    /// 400
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 422, well-formed JSON of the wrong shape
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// 500
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Attach the underlying cause
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(feature = "axum")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                success: false,
                error: self.error,
                details: self.details,
            }),
        )
            .into_response()
    }
}

#[cfg(feature = "axum")]
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_error("An unexpected internal error occurred").with_details(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = SuccessResponse::new(vec![1, 2]).with_message("2 students created successfully.");
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "2 students created successfully.");
        assert_eq!(value["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_success_without_message_omits_field() {
        let value = serde_json::to_value(SuccessResponse::new("x")).unwrap();
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_rejection_message_summarises() {
        let single = RejectionResponse::new(vec![ErrorMessage::new("No students were created")]);
        assert_eq!(single.message, "No students were created");

        let many = RejectionResponse::new(vec![
            ErrorMessage::new("Student ID 1 not updated."),
            ErrorMessage::new("Student ID 2 not updated."),
        ]);
        assert_eq!(many.message, "Student ID 1 not updated. (and 1 more)");
        assert_eq!(many.errors.len(), 2);
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_app_error_status() {
        let resp = AppError::not_found("Student not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let err = AppError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.details.as_deref(), Some("disk full"));
    }
}
