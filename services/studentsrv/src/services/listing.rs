//! Read-only listings for enrollments and the course schedule

use crate::models::{course_schedule, enrollment, CourseSchedule, Enrollment};
use common::error::Result;
use common::sqlite::Database;
use tracing::debug;

pub async fn get_active_enrollments(db: &Database) -> Result<Vec<Enrollment>> {
    let enrollments = enrollment::read_all_active(db).await?;
    debug!(count = enrollments.len(), "Fetched active enrollments");
    Ok(enrollments)
}

pub async fn get_active_course_schedules(db: &Database) -> Result<Vec<CourseSchedule>> {
    let schedules = course_schedule::read_all_active(db).await?;
    debug!(count = schedules.len(), "Fetched active course schedule");
    Ok(schedules)
}
