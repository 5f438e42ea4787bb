//! Background writer for queued audit entries

use std::sync::Arc;
use tokio::sync::mpsc;

use super::service::{AuditLogRequest, AuditService};

/// Spawn the task that drains the audit channel into storage. Exits once
/// every sender half has been dropped.
pub fn spawn(service: Arc<AuditService>, mut rx: mpsc::Receiver<AuditLogRequest>) {
    tokio::spawn(async move {
        while let Some(req) = rx.recv().await {
            let write = service
                .storage()
                .append(
                    req.action,
                    req.resource_type,
                    req.resource_id,
                    req.operator_id,
                    req.operator_name,
                    req.details,
                )
                .await;
            if let Err(e) = write {
                tracing::error!(error = %e, "Failed to write audit entry");
            }
        }
        tracing::debug!("Audit worker stopped");
    });
}
