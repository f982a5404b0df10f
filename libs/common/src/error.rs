use thiserror::Error;

/// Connection manager error type
#[derive(Debug, Error)]
pub enum DbError {
    /// Statement violated a UNIQUE, FOREIGN KEY, NOT NULL or CHECK constraint
    #[error("Integrity error: {0}")]
    Constraint(String),

    /// Statement failed for any other reason
    #[error("Database error: {0}")]
    Execution(String),

    /// Opening or closing the connection failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// IO error (creating the database directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    /// True for constraint violations (duplicate email, dangling foreign key, ...)
    pub fn is_constraint(&self) -> bool {
        matches!(self, DbError::Constraint(_))
    }
}

/// Error result type
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => DbError::Constraint(db_err.message().to_string()),
                // Older SQLite builds report constraints without extended codes
                _ if db_err.message().contains("constraint failed") => {
                    DbError::Constraint(db_err.message().to_string())
                },
                _ => DbError::Execution(db_err.message().to_string()),
            },
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DbError::Connection(err.to_string())
            },
            _ => DbError::Execution(err.to_string()),
        }
    }
}
