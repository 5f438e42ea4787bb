//! Audit log service
//!
//! The write half is asynchronous: [`AuditService::log`] pushes onto an
//! mpsc channel and the background worker does the insert, so handlers
//! never wait on the log. Queries and the purge hit storage directly.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::storage::AuditStorage;
use super::types::*;
use shared::AppResult;
use sqlx::SqlitePool;

/// One queued log entry, as handed to the worker
pub struct AuditLogRequest {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub operator_id: Option<String>,
    pub operator_name: Option<String>,
    pub details: serde_json::Value,
}

pub struct AuditService {
    storage: AuditStorage,
    tx: mpsc::Sender<AuditLogRequest>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

impl AuditService {
    /// Build the service plus the receiver half the worker drains
    pub fn new(pool: SqlitePool, buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<AuditLogRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        let service = Arc::new(Self {
            storage: AuditStorage::new(pool),
            tx,
        });
        (service, rx)
    }

    /// Queue an entry, fire and forget. When the channel is full or the
    /// worker is gone the entry is dropped with a warning; audit logging
    /// must never stall a request.
    pub async fn log(
        &self,
        action: AuditAction,
        resource_type: &str,
        resource_id: String,
        operator_id: Option<String>,
        operator_name: Option<String>,
        details: serde_json::Value,
    ) {
        let queued = self.tx.try_send(AuditLogRequest {
            action,
            resource_type: resource_type.to_string(),
            resource_id,
            operator_id,
            operator_name,
            details,
        });
        if let Err(e) = queued {
            tracing::warn!(action = %action, error = %e, "Audit entry dropped");
        }
    }

    pub async fn query(&self, q: &AuditQuery) -> AppResult<(Vec<AuditEntry>, i64)> {
        Ok(self.storage.query(q).await?)
    }

    /// Delete every entry, reporting how many were removed
    pub async fn purge(&self) -> AppResult<u64> {
        let deleted = self.storage.purge_all().await?;
        tracing::warn!(deleted, "Audit log purged");
        Ok(deleted)
    }

    pub(crate) fn storage(&self) -> &AuditStorage {
        &self.storage
    }
}
