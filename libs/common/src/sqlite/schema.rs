//! School database DDL
//!
//! Every statement is `IF NOT EXISTS`, so the script can run on each startup.

/// Students table (soft-deleted via `status = 'archived'`)
pub const STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        address TEXT,
        city TEXT,
        province TEXT,
        country TEXT,
        address_type TEXT NOT NULL DEFAULT 'local',
        status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'archived')),
        is_international INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        archived_at TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_students_status ON students(status);
"#;

/// Course schedule table
pub const COURSE_SCHEDULE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS course_schedule (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_code TEXT NOT NULL,
        course_name TEXT NOT NULL,
        term TEXT NOT NULL,
        day_of_week TEXT,
        start_time TEXT,
        end_time TEXT,
        location TEXT,
        instructor TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"#;

/// Enrollments table (student ↔ course schedule)
pub const ENROLLMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS enrollments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES students(id),
        course_schedule_id INTEGER NOT NULL REFERENCES course_schedule(id),
        status TEXT NOT NULL DEFAULT 'active',
        enrolled_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        UNIQUE (student_id, course_schedule_id)
    );
"#;

/// Full schema script, in dependency order
pub fn school_schema() -> String {
    [STUDENTS_TABLE, COURSE_SCHEDULE_TABLE, ENROLLMENTS_TABLE].concat()
}

/// Apply the full schema
pub async fn init_school_schema(db: &super::Database) -> crate::error::Result<()> {
    db.execute_script(&school_schema()).await
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::sqlite::{Database, SqlParam};

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("school.db")).unwrap();

        init_school_schema(&db).await.unwrap();
        init_school_schema(&db).await.unwrap();

        let tables = db
            .fetch_all(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN (?, ?, ?)",
                &[
                    SqlParam::from("students"),
                    SqlParam::from("course_schedule"),
                    SqlParam::from("enrollments"),
                ],
            )
            .await
            .unwrap();
        assert_eq!(tables.len(), 3);
    }

    #[tokio::test]
    async fn test_enrollment_requires_existing_student() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("school.db")).unwrap();
        init_school_schema(&db).await.unwrap();

        let err = db
            .execute(
                "INSERT INTO enrollments (student_id, course_schedule_id) VALUES (?, ?)",
                &[SqlParam::from(99_i64), SqlParam::from(99_i64)],
            )
            .await
            .unwrap_err();

        assert!(err.is_constraint(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_status_check_constraint() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("school.db")).unwrap();
        init_school_schema(&db).await.unwrap();

        let err = db
            .execute(
                "INSERT INTO students (first_name, last_name, email, status) VALUES ('A', 'B', 'a@b.c', 'deleted')",
                &[],
            )
            .await
            .unwrap_err();

        assert!(err.is_constraint(), "unexpected error: {err}");
    }
}
