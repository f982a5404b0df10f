//! Test database helpers
//!
//! ```rust,ignore
//! let env = common::test_utils::TestDb::create().await?;
//! let db = env.database();
//! ```

use crate::sqlite::{init_school_schema, Database};
use tempfile::TempDir;

/// Temporary SQLite file with the school schema applied
///
/// The file is removed when this value drops.
pub struct TestDb {
    database: Database,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a fresh database with every table present and empty
    pub async fn create() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let database = Database::new(temp_dir.path().join("test_school.db"))?;
        init_school_schema(&database).await?;
        Ok(Self {
            database,
            _temp_dir: temp_dir,
        })
    }

    /// Connection factory for the temporary file
    pub fn database(&self) -> Database {
        self.database.clone()
    }
}
