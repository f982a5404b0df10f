//! Student records
//!
//! Free functions take the `Database` factory explicitly, the same shape as
//! the other entities. `StudentStore` wraps them so the service layer can be
//! exercised against a fake.

use super::{optional_timestamp, placeholders, timestamp};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::error::{DbError, Result};
use common::serde_helpers::{deserialize_bool_flexible, deserialize_optional_text};
use common::sqlite::{Database, SqlParam, SqliteRow};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::debug;
use utoipa::ToSchema;

/// Soft-delete state of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Archived,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "archived" => Ok(StudentStatus::Archived),
            other => Err(DbError::Execution(format!(
                "Unknown student status '{}'",
                other
            ))),
        }
    }
}

/// A stored student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub address_type: String,
    pub status: StudentStatus,
    /// `false` for domestic students
    pub is_international: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub archived_at: Option<NaiveDateTime>,
}

/// Mutable fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub country: Option<String>,
    #[serde(default = "default_address_type")]
    pub address_type: String,
    #[serde(default, deserialize_with = "deserialize_bool_flexible")]
    pub is_international: bool,
}

fn default_address_type() -> String {
    "local".to_string()
}

/// One item of a bulk update: the target id plus the full field set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentUpdate {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub fields: StudentFields,
}

impl StudentFields {
    fn params(&self) -> Vec<SqlParam> {
        vec![
            SqlParam::from(self.first_name.as_str()),
            SqlParam::from(self.last_name.as_str()),
            SqlParam::from(self.email.as_str()),
            SqlParam::from(self.address.clone()),
            SqlParam::from(self.city.clone()),
            SqlParam::from(self.province.clone()),
            SqlParam::from(self.country.clone()),
            SqlParam::from(self.address_type.as_str()),
            SqlParam::from(self.is_international),
        ]
    }
}

/// Every student, or only those still active
pub async fn read_all(db: &Database, active_only: bool) -> Result<Vec<Student>> {
    let query = if active_only {
        "SELECT * FROM students WHERE status = 'active' ORDER BY id"
    } else {
        "SELECT * FROM students ORDER BY id"
    };

    let rows = db.fetch_all(query, &[]).await?;
    rows.iter().map(hydrate_student).collect()
}

/// A single student regardless of status; `None` when absent
pub async fn read_by_id(db: &Database, id: i64) -> Result<Option<Student>> {
    let rows = db
        .fetch_all("SELECT * FROM students WHERE id = ?", &[SqlParam::from(id)])
        .await?;

    rows.first().map(hydrate_student).transpose()
}

/// Students whose id is in `ids`, in no guaranteed order
pub async fn read_by_ids(db: &Database, ids: &[i64]) -> Result<Vec<Student>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "SELECT * FROM students WHERE id IN ({})",
        placeholders(ids.len())
    );
    let params: Vec<SqlParam> = ids.iter().copied().map(SqlParam::from).collect();

    let rows = db.fetch_all(&query, &params).await?;
    rows.iter().map(hydrate_student).collect()
}

/// Insert a new active student, returning its id
pub async fn insert(db: &Database, fields: &StudentFields) -> Result<Option<i64>> {
    let outcome = db
        .execute(
            r#"
            INSERT INTO students
                (first_name, last_name, email, address, city, province, country,
                 address_type, is_international)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            &fields.params(),
        )
        .await?;

    debug!(id = ?outcome.last_insert_id, "Student inserted");
    Ok(outcome.last_insert_id)
}

/// Overwrite every mutable field of `id`; returns rows modified (0 or 1)
pub async fn update(db: &Database, id: i64, fields: &StudentFields) -> Result<u64> {
    let mut params = fields.params();
    params.push(SqlParam::from(id));

    let outcome = db
        .execute(
            r#"
            UPDATE students SET
                first_name = ?, last_name = ?, email = ?, address = ?, city = ?,
                province = ?, country = ?, address_type = ?, is_international = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
            &params,
        )
        .await?;

    Ok(outcome.rows_affected)
}

/// Soft-delete `id`; an already archived row counts as not modified
pub async fn archive(db: &Database, id: i64) -> Result<u64> {
    let outcome = db
        .execute(
            r#"
            UPDATE students SET
                status = 'archived',
                archived_at = CURRENT_TIMESTAMP,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND status != 'archived'
            "#,
            &[SqlParam::from(id)],
        )
        .await?;

    Ok(outcome.rows_affected)
}

fn hydrate_student(row: &SqliteRow) -> Result<Student> {
    let status: String = row.try_get("status")?;
    let is_international: i64 = row.try_get("is_international")?;

    Ok(Student {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        province: row.try_get("province")?,
        country: row.try_get("country")?,
        address_type: row.try_get("address_type")?,
        status: status.parse()?,
        is_international: is_international != 0,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
        archived_at: optional_timestamp(row, "archived_at")?,
    })
}

/// Student persistence used by the service layer
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn read_all(&self, active_only: bool) -> Result<Vec<Student>>;
    async fn read_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn read_by_ids(&self, ids: &[i64]) -> Result<Vec<Student>>;
    async fn insert(&self, fields: &StudentFields) -> Result<Option<i64>>;
    async fn update(&self, id: i64, fields: &StudentFields) -> Result<u64>;
    async fn archive(&self, id: i64) -> Result<u64>;
}

/// `StudentStore` over the SQLite connection manager
#[derive(Clone, Debug)]
pub struct SqliteStudentStore {
    db: Database,
}

impl SqliteStudentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn read_all(&self, active_only: bool) -> Result<Vec<Student>> {
        read_all(&self.db, active_only).await
    }

    async fn read_by_id(&self, id: i64) -> Result<Option<Student>> {
        read_by_id(&self.db, id).await
    }

    async fn read_by_ids(&self, ids: &[i64]) -> Result<Vec<Student>> {
        read_by_ids(&self.db, ids).await
    }

    async fn insert(&self, fields: &StudentFields) -> Result<Option<i64>> {
        insert(&self.db, fields).await
    }

    async fn update(&self, id: i64, fields: &StudentFields) -> Result<u64> {
        update(&self.db, id, fields).await
    }

    async fn archive(&self, id: i64) -> Result<u64> {
        archive(&self.db, id).await
    }
}
