//! Audit log SQLite storage
//!
//! Append, filterable query, and the administrative purge. The purge is
//! the one destructive bulk operation in the system; it reports the number
//! of rows it removed.

use sqlx::SqlitePool;
use thiserror::Error;

use super::types::{AuditAction, AuditEntry, AuditQuery};

/// Storage errors
#[derive(Debug, Error)]
pub enum AuditStorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for AuditStorageError {
    fn from(err: sqlx::Error) -> Self {
        AuditStorageError::Database(err.to_string())
    }
}

pub type AuditStorageResult<T> = Result<T, AuditStorageError>;

impl From<AuditStorageError> for shared::AppError {
    fn from(err: AuditStorageError) -> Self {
        shared::AppError::internal(err.to_string())
    }
}

/// Row shape as stored (action and details are TEXT)
#[derive(Debug, sqlx::FromRow)]
struct AuditRow {
    id: i64,
    timestamp: i64,
    action: String,
    resource_type: String,
    resource_id: String,
    operator_id: Option<String>,
    operator_name: Option<String>,
    details: String,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = AuditStorageError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let action: AuditAction = serde_json::from_value(serde_json::Value::String(row.action))?;
        let details = serde_json::from_str(&row.details).unwrap_or(serde_json::Value::Null);
        Ok(AuditEntry {
            id: row.id,
            timestamp: row.timestamp,
            action,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            operator_id: row.operator_id,
            operator_name: row.operator_name,
            details,
        })
    }
}

const AUDIT_SELECT: &str = "SELECT id, timestamp, action, resource_type, resource_id, operator_id, operator_name, details FROM audit_log";

const DEFAULT_PAGE_SIZE: i64 = 50;

/// Audit log storage (SQLite)
#[derive(Clone)]
pub struct AuditStorage {
    pool: SqlitePool,
}

impl AuditStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one audit entry
    #[allow(clippy::too_many_arguments)]
    pub async fn append(
        &self,
        action: AuditAction,
        resource_type: String,
        resource_id: String,
        operator_id: Option<String>,
        operator_name: Option<String>,
        details: serde_json::Value,
    ) -> AuditStorageResult<()> {
        let timestamp = shared::util::now_millis();
        let details_json = serde_json::to_string(&details)?;

        sqlx::query(
            "INSERT INTO audit_log (timestamp, action, resource_type, resource_id, operator_id, operator_name, details) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(timestamp)
        .bind(action.as_str())
        .bind(resource_type)
        .bind(resource_id)
        .bind(operator_id)
        .bind(operator_name)
        .bind(details_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Query audit entries, newest first
    pub async fn query(&self, q: &AuditQuery) -> AuditStorageResult<(Vec<AuditEntry>, i64)> {
        let mut conditions: Vec<&str> = Vec::new();
        if q.from.is_some() {
            conditions.push("timestamp >= ?");
        }
        if q.to.is_some() {
            conditions.push("timestamp <= ?");
        }
        if q.action.is_some() {
            conditions.push("action = ?");
        }
        if q.operator_id.is_some() {
            conditions.push("operator_id = ?");
        }
        if q.resource_type.is_some() {
            conditions.push("resource_type = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM audit_log{where_clause}");
        let select_sql =
            format!("{AUDIT_SELECT}{where_clause} ORDER BY id DESC LIMIT ? OFFSET ?");

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AuditRow>(&select_sql);

        if let Some(from) = q.from {
            count_query = count_query.bind(from);
            select_query = select_query.bind(from);
        }
        if let Some(to) = q.to {
            count_query = count_query.bind(to);
            select_query = select_query.bind(to);
        }
        if let Some(action) = q.action {
            count_query = count_query.bind(action.as_str());
            select_query = select_query.bind(action.as_str());
        }
        if let Some(ref operator_id) = q.operator_id {
            count_query = count_query.bind(operator_id.clone());
            select_query = select_query.bind(operator_id.clone());
        }
        if let Some(ref resource_type) = q.resource_type {
            count_query = count_query.bind(resource_type.clone());
            select_query = select_query.bind(resource_type.clone());
        }

        let total = count_query.fetch_one(&self.pool).await?;
        let rows = select_query
            .bind(q.limit.unwrap_or(DEFAULT_PAGE_SIZE))
            .bind(q.offset)
            .fetch_all(&self.pool)
            .await?;

        let entries = rows
            .into_iter()
            .map(AuditEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((entries, total))
    }

    /// Delete every audit entry; returns the number deleted. Irreversible.
    pub async fn purge_all(&self) -> AuditStorageResult<u64> {
        let result = sqlx::query("DELETE FROM audit_log").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
