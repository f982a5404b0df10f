//! Application state and startup wiring

use crate::config::StudentsrvConfig;
use crate::error::{Result, StudentSrvError};
use crate::models::{SqliteStudentStore, StudentStore};
use common::sqlite::{init_school_schema, Database};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Shared state handed to every handler
///
/// Holds only immutable values; each request opens its own connection.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StudentsrvConfig>,
    pub database: Database,
    pub students: Arc<dyn StudentStore>,
}

impl AppState {
    /// State backed by `database` for every entity
    pub fn new(config: StudentsrvConfig, database: Database) -> Self {
        let students: Arc<dyn StudentStore> = Arc::new(SqliteStudentStore::new(database.clone()));
        Self {
            config: Arc::new(config),
            database,
            students,
        }
    }

    /// Replace the student store (tests)
    pub fn with_student_store(mut self, students: Arc<dyn StudentStore>) -> Self {
        self.students = students;
        self
    }
}

/// Open the configured database, apply the schema and build the state
pub async fn create_app_state(config: StudentsrvConfig) -> Result<Arc<AppState>> {
    let database = Database::new(&config.database.path)?;
    init_school_schema(&database).await?;
    info!("School schema ready at {}", database.path());

    Ok(Arc::new(AppState::new(config, database)))
}

/// Run a SQL script file (seed data, one-off fixes) against the database
pub async fn run_init_script(database: &Database, script_path: &Path) -> Result<()> {
    let script = std::fs::read_to_string(script_path).map_err(|e| {
        StudentSrvError::Config(format!(
            "Failed to read init script {}: {}",
            script_path.display(),
            e
        ))
    })?;

    database.execute_script(&script).await?;
    info!("Init script applied: {}", script_path.display());
    Ok(())
}
