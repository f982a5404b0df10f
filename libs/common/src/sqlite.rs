pub mod client;
pub mod params;
pub mod schema;

pub use client::{Database, ExecuteOutcome};
pub use params::SqlParam;
pub use schema::init_school_schema;
pub use sqlx::sqlite::SqliteRow;
