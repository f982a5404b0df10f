//! Error types for studentsrv
//!
//! Handlers return `Result<_, StudentSrvError>`; this is the single place
//! where errors become HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{AppError, DbError};
use thiserror::Error;
use tracing::{error, warn};

/// Result type for studentsrv
pub type Result<T> = std::result::Result<T, StudentSrvError>;

/// Errors that can occur in studentsrv
#[derive(Debug, Error)]
pub enum StudentSrvError {
    /// A required key is absent from the JSON body
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Body is valid JSON but has the wrong shape
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    /// Body is not valid JSON
    #[error("Malformed request: {0}")]
    BadRequest(String),

    /// Query string could not be decoded
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Body was sent without a JSON content type
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StudentSrvError {
    pub fn status(&self) -> StatusCode {
        match self {
            StudentSrvError::MissingField(_)
            | StudentSrvError::BadRequest(_)
            | StudentSrvError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            },
            StudentSrvError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StudentSrvError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            StudentSrvError::NotFound(_) => StatusCode::NOT_FOUND,
            StudentSrvError::Database(DbError::Constraint(_)) => StatusCode::BAD_REQUEST,
            StudentSrvError::Database(_) | StudentSrvError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl From<JsonRejection> for StudentSrvError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => StudentSrvError::InvalidPayload(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => {
                StudentSrvError::UnsupportedMediaType(e.body_text())
            },
            other => StudentSrvError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for StudentSrvError {
    fn from(rejection: QueryRejection) -> Self {
        StudentSrvError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for StudentSrvError {
    fn into_response(self) -> Response {
        let status = self.status();
        let app_error = match &self {
            StudentSrvError::MissingField(_) => AppError::bad_request(self.to_string()),
            StudentSrvError::NotFound(message) => AppError::not_found(message.clone()),
            StudentSrvError::BadRequest(details) => {
                AppError::bad_request("Malformed request body").with_details(details.clone())
            },
            StudentSrvError::InvalidQuery(details) => {
                AppError::bad_request("Invalid query string").with_details(details.clone())
            },
            StudentSrvError::InvalidPayload(details) => {
                AppError::unprocessable("Invalid request body").with_details(details.clone())
            },
            StudentSrvError::UnsupportedMediaType(details) => {
                AppError::new(status, "Expected a JSON request body").with_details(details.clone())
            },
            StudentSrvError::Database(db_err @ DbError::Constraint(_)) => {
                AppError::bad_request(db_err.to_string())
            },
            StudentSrvError::Database(_) | StudentSrvError::Config(_) => {
                AppError::internal_error("An unexpected internal error occurred")
                    .with_details(self.to_string())
            },
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        app_error.into_response()
    }
}
