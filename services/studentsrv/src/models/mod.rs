//! Entity types and record access functions
//!
//! Rows are hydrated by column name; nothing here depends on column order.

pub mod course_schedule;
pub mod enrollment;
pub mod student;

use chrono::{NaiveDate, NaiveDateTime};
use common::error::{DbError, Result};
use common::sqlite::SqliteRow;
use sqlx::Row;

pub use course_schedule::CourseSchedule;
pub use enrollment::Enrollment;
pub use student::{
    SqliteStudentStore, Student, StudentFields, StudentStatus, StudentStore, StudentUpdate,
};

/// `?,?,?` with one placeholder per bound value
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

/// Timestamp column that must be present
pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> Result<NaiveDateTime> {
    optional_timestamp(row, column)?
        .ok_or_else(|| DbError::Execution(format!("column {} is NULL", column)))
}

/// Timestamp column stored as SQLite TEXT
///
/// Rows written by hand-made init scripts may carry a bare date or an ISO `T`
/// separator; both are accepted. A bare date reads as midnight.
pub(crate) fn optional_timestamp(row: &SqliteRow, column: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|text| {
        parse_timestamp(&text).ok_or_else(|| {
            DbError::Execution(format!("invalid timestamp in {}: '{}'", column, text))
        })
    })
    .transpose()
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::{parse_timestamp, placeholders};

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?,?,?");
        assert_eq!(placeholders(0), "");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let full = parse_timestamp("2024-09-01 08:30:00").unwrap();
        assert_eq!(full.to_string(), "2024-09-01 08:30:00");

        let iso = parse_timestamp("2024-09-01T08:30:00.250").unwrap();
        assert_eq!(iso.format("%H:%M:%S%.3f").to_string(), "08:30:00.250");

        let date_only = parse_timestamp("2024-09-01").unwrap();
        assert_eq!(date_only.to_string(), "2024-09-01 00:00:00");

        assert!(parse_timestamp("next tuesday").is_none());
    }
}
