//! Connection manager for the school database
//!
//! Every call opens its own connection, runs exactly one statement (or one
//! transaction for `execute_many`), commits, and closes the connection before
//! returning, whether the statement succeeded or not. There is no pool.

use super::params::{bind_all, SqlParam};
use crate::error::{DbError, Result};
use sqlx::{
    sqlite::{
        SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqliteRow, SqliteSynchronous,
    },
    ConnectOptions, Connection,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Result of a write statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOutcome {
    /// Rows changed by the statement
    pub rows_affected: u64,
    /// Rowid generated by an INSERT, `None` when the write produced no row
    pub last_insert_id: Option<i64>,
}

/// Connection factory for a single SQLite file
///
/// Cheap to clone; holds only connect options, never a live connection.
#[derive(Clone, Debug)]
pub struct Database {
    options: SqliteConnectOptions,
    db_path: String,
}

impl Database {
    /// Create a factory for the database file at `db_path`
    ///
    /// The parent directory is created if missing; the file itself is created
    /// on first connect.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path_str = db_path.as_ref().to_string_lossy().to_string();

        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path_str)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .create_if_missing(true)
            .disable_statement_logging();

        info!("SQLite database configured: {}", db_path_str);

        Ok(Self {
            options,
            db_path: db_path_str,
        })
    }

    /// Get database file path
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Run a SELECT and return every row
    pub async fn fetch_all(&self, query: &str, params: &[SqlParam]) -> Result<Vec<SqliteRow>> {
        let mut conn = self.connect().await?;
        let result = bind_all(sqlx::query(query), params)
            .fetch_all(&mut conn)
            .await;
        self.release(conn).await;

        match result {
            Ok(rows) => {
                debug!(rows = rows.len(), "Executed query: {}", query);
                Ok(rows)
            },
            Err(e) => Err(self.classify(query, e)),
        }
    }

    /// Run a single INSERT/UPDATE/DELETE and commit it
    pub async fn execute(&self, query: &str, params: &[SqlParam]) -> Result<ExecuteOutcome> {
        let mut conn = self.connect().await?;
        let result = bind_all(sqlx::query(query), params)
            .execute(&mut conn)
            .await;
        self.release(conn).await;

        match result {
            Ok(done) => {
                let rows_affected = done.rows_affected();
                let rowid = done.last_insert_rowid();
                debug!(rows_affected, "Executed query: {}", query);
                Ok(ExecuteOutcome {
                    rows_affected,
                    last_insert_id: (rows_affected > 0 && rowid > 0).then_some(rowid),
                })
            },
            Err(e) => Err(self.classify(query, e)),
        }
    }

    /// Run one statement once per parameter set inside a single transaction
    ///
    /// Either every set is committed or none is. Returns total rows affected.
    pub async fn execute_many(&self, query: &str, param_sets: &[Vec<SqlParam>]) -> Result<u64> {
        let mut conn = self.connect().await?;
        let result = async {
            let mut tx = conn.begin().await?;
            let mut total = 0;
            for params in param_sets {
                total += bind_all(sqlx::query(query), params)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
            }
            tx.commit().await?;
            Ok::<u64, sqlx::Error>(total)
        }
        .await;
        self.release(conn).await;

        match result {
            Ok(total) => {
                debug!(
                    batches = param_sets.len(),
                    rows_affected = total,
                    "Executed many: {}",
                    query
                );
                Ok(total)
            },
            Err(e) => Err(self.classify(query, e)),
        }
    }

    /// Run a multi-statement SQL script (schema DDL, seed data)
    pub async fn execute_script(&self, script: &str) -> Result<()> {
        let mut conn = self.connect().await?;
        let result = sqlx::raw_sql(script).execute(&mut conn).await;
        self.release(conn).await;

        match result {
            Ok(_) => {
                debug!("Executed script with multiple SQL commands");
                Ok(())
            },
            Err(e) => Err(self.classify("<script>", e)),
        }
    }

    /// Check if database is accessible
    pub async fn ping(&self) -> Result<()> {
        self.fetch_all("SELECT 1", &[]).await.map(|_| ())
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        self.options.connect().await.map_err(|e| {
            error!("Error connecting to database {}: {}", self.db_path, e);
            DbError::Connection(e.to_string())
        })
    }

    async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!("Error closing connection to {}: {}", self.db_path, e);
        }
    }

    fn classify(&self, query: &str, err: sqlx::Error) -> DbError {
        let err = DbError::from(err);
        match &err {
            DbError::Constraint(msg) => warn!("Integrity error: {} (query: {})", msg, query),
            other => error!("Error executing query: {} (query: {})", other, query),
        }
        err
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use sqlx::Row;
    use tracing_test::traced_test;

    const PEOPLE: &str = r#"
        CREATE TABLE people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            active INTEGER NOT NULL DEFAULT 1
        );
    "#;

    async fn setup() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("nested").join("test.db")).unwrap();
        db.execute_script(PEOPLE).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_insert_reports_generated_id() {
        let (_dir, db) = setup().await;

        let first = db
            .execute("INSERT INTO people (email) VALUES (?)", &[SqlParam::from("a@x.io")])
            .await
            .unwrap();
        let second = db
            .execute("INSERT INTO people (email) VALUES (?)", &[SqlParam::from("b@x.io")])
            .await
            .unwrap();

        assert_eq!(first.rows_affected, 1);
        assert_eq!(first.last_insert_id, Some(1));
        assert_eq!(second.last_insert_id, Some(2));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_zero_not_error() {
        let (_dir, db) = setup().await;

        let outcome = db
            .execute("UPDATE people SET active = 0 WHERE id = ?", &[SqlParam::from(42_i64)])
            .await
            .unwrap();

        assert_eq!(outcome.rows_affected, 0);
        assert_eq!(outcome.last_insert_id, None);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_unique_violation_is_constraint_error() {
        let (_dir, db) = setup().await;
        let params = vec![SqlParam::from("dup@x.io")];

        db.execute("INSERT INTO people (email) VALUES (?)", &params)
            .await
            .unwrap();
        let err = db
            .execute("INSERT INTO people (email) VALUES (?)", &params)
            .await
            .unwrap_err();

        assert!(err.is_constraint(), "unexpected error: {err}");
        assert!(logs_contain("Integrity error"));
    }

    #[tokio::test]
    async fn test_bad_statement_is_execution_error() {
        let (_dir, db) = setup().await;

        let err = db
            .fetch_all("SELECT * FROM missing_table", &[])
            .await
            .err()
            .unwrap();

        assert!(matches!(err, DbError::Execution(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_fetch_all_binds_params() {
        let (_dir, db) = setup().await;
        db.execute_many(
            "INSERT INTO people (email, active) VALUES (?, ?)",
            &[
                vec![SqlParam::from("a@x.io"), SqlParam::from(true)],
                vec![SqlParam::from("b@x.io"), SqlParam::from(false)],
                vec![SqlParam::from("c@x.io"), SqlParam::from(true)],
            ],
        )
        .await
        .unwrap();

        let rows = db
            .fetch_all(
                "SELECT email FROM people WHERE active = ? ORDER BY id",
                &[SqlParam::from(1_i64)],
            )
            .await
            .unwrap();
        let emails: Vec<String> = rows.iter().map(|r| r.get("email")).collect();

        assert_eq!(emails, vec!["a@x.io", "c@x.io"]);
    }

    #[tokio::test]
    async fn test_execute_many_rolls_back_on_failure() {
        let (_dir, db) = setup().await;

        let err = db
            .execute_many(
                "INSERT INTO people (email) VALUES (?)",
                &[vec![SqlParam::from("same@x.io")], vec![SqlParam::from("same@x.io")]],
            )
            .await
            .unwrap_err();
        assert!(err.is_constraint());

        let rows = db.fetch_all("SELECT id FROM people", &[]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_ping_and_path() {
        let (dir, db) = setup().await;
        db.ping().await.unwrap();
        assert!(db.path().starts_with(dir.path().to_str().unwrap()));
    }
}
