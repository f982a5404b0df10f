use super::timestamp;
use chrono::NaiveDateTime;
use common::error::Result;
use common::sqlite::{Database, SqliteRow};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use utoipa::ToSchema;

/// A student's registration in a scheduled course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_schedule_id: i64,
    pub status: String,
    pub enrolled_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// All enrollments with `status = 'active'`
pub async fn read_all_active(db: &Database) -> Result<Vec<Enrollment>> {
    let rows = db
        .fetch_all(
            "SELECT * FROM enrollments WHERE status = 'active' ORDER BY id",
            &[],
        )
        .await?;

    rows.iter().map(hydrate_enrollment).collect()
}

fn hydrate_enrollment(row: &SqliteRow) -> Result<Enrollment> {
    Ok(Enrollment {
        id: row.try_get("id")?,
        student_id: row.try_get("student_id")?,
        course_schedule_id: row.try_get("course_schedule_id")?,
        status: row.try_get("status")?,
        enrolled_at: timestamp(row, "enrolled_at")?,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use common::test_utils::TestDb;

    #[tokio::test]
    async fn test_only_active_enrollments_returned() {
        let env = TestDb::create().await.unwrap();
        let db = env.database();

        db.execute_script(
            r#"
            INSERT INTO students (first_name, last_name, email) VALUES ('Ada', 'Lovelace', 'ada@example.com');
            INSERT INTO students (first_name, last_name, email) VALUES ('Alan', 'Turing', 'alan@example.com');
            INSERT INTO course_schedule (course_code, course_name, term) VALUES ('CS101', 'Intro', '2024F');
            INSERT INTO enrollments (student_id, course_schedule_id, status) VALUES (1, 1, 'active');
            INSERT INTO enrollments (student_id, course_schedule_id, status) VALUES (2, 1, 'dropped');
            "#,
        )
        .await
        .unwrap();

        let enrollments = read_all_active(&db).await.unwrap();
        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].student_id, 1);
        assert_eq!(enrollments[0].status, "active");
    }

    #[tokio::test]
    async fn test_empty_table() {
        let env = TestDb::create().await.unwrap();
        assert!(read_all_active(&env.database()).await.unwrap().is_empty());
    }
}
