//! Shared plumbing for the student records service
//!
//! - SQLite connection manager and school schema
//! - logging and HTTP access logging
//! - API response envelopes
//! - configuration, CLI arguments and bootstrap helpers

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub mod api_types;
pub mod bootstrap_args;
pub mod config_loader;
pub mod error;
pub mod logging;
pub mod serde_helpers;
pub mod service_bootstrap;
pub mod shutdown;

// Test utilities (for use in test code only)
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use api_types::{ErrorMessage, ErrorResponse, RejectionResponse, SuccessResponse};
pub use error::DbError;

#[cfg(feature = "axum")]
pub use api_types::AppError;

pub use bootstrap_args::ServiceArgs;

// Re-export common dependencies
pub use anyhow;
pub use serde;
pub use serde_json;
pub use tokio;

#[cfg(feature = "cli")]
pub use clap;
