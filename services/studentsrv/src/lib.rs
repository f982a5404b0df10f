//! StudentSrv Library
//!
//! Student records API over a single SQLite file.
//!
//! ## Layers
//!
//! - `models`: entity structs and record access functions (one statement each)
//! - `services`: bulk create/update/archive producing a `ServiceOutcome`
//! - `api`: axum handlers mapping outcomes and errors onto HTTP responses

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use app::{create_app_state, run_init_script, AppState};
pub use config::StudentsrvConfig;
pub use error::{Result, StudentSrvError};

pub use api::{create_routes, ApiDoc};
