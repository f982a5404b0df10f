use super::timestamp;
use chrono::NaiveDateTime;
use common::error::Result;
use common::sqlite::{Database, SqliteRow};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use utoipa::ToSchema;

/// One scheduled offering of a course in a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseSchedule {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub term: String,
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub instructor: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// All schedule entries with `status = 'active'`
pub async fn read_all_active(db: &Database) -> Result<Vec<CourseSchedule>> {
    let rows = db
        .fetch_all(
            "SELECT * FROM course_schedule WHERE status = 'active' ORDER BY id",
            &[],
        )
        .await?;

    rows.iter().map(hydrate_course_schedule).collect()
}

fn hydrate_course_schedule(row: &SqliteRow) -> Result<CourseSchedule> {
    Ok(CourseSchedule {
        id: row.try_get("id")?,
        course_code: row.try_get("course_code")?,
        course_name: row.try_get("course_name")?,
        term: row.try_get("term")?,
        day_of_week: row.try_get("day_of_week")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        location: row.try_get("location")?,
        instructor: row.try_get("instructor")?,
        status: row.try_get("status")?,
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
    async fn test_inactive_courses_filtered() {
        let env = TestDb::create().await.unwrap();
        let db = env.database();

        db.execute_script(
            r#"
            INSERT INTO course_schedule (course_code, course_name, term, day_of_week, start_time, end_time, instructor)
                VALUES ('CS101', 'Intro to Programming', '2024F', 'Mon', '09:00', '10:30', 'Hopper');
            INSERT INTO course_schedule (course_code, course_name, term, status)
                VALUES ('CS999', 'Retired Course', '2019W', 'cancelled');
            "#,
        )
        .await
        .unwrap();

        let courses = read_all_active(&db).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_code, "CS101");
        assert_eq!(courses[0].instructor.as_deref(), Some("Hopper"));
        assert!(courses[0].location.is_none());
    }
}
