//! Audit Log API Handlers

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::audit::{AuditAction, AuditListResponse, AuditQuery, PurgeResponse};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::AppResult;

/// GET /api/audit-log - query audit entries (newest first)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<AuditListResponse>> {
    let (items, total) = state.audit.query(&query).await?;
    Ok(Json(AuditListResponse { items, total }))
}

/// DELETE /api/audit-log - delete every entry, reporting the count.
///
/// Irreversible. The purge itself is recorded as a fresh audit entry
/// after the wipe.
pub async fn purge(
    State(state): State<ServerState>,
    Extension(acting): Extension<CurrentUser>,
) -> AppResult<Json<PurgeResponse>> {
    let deleted = state.audit.purge().await?;

    tracing::warn!(
        deleted,
        operator_id = acting.id,
        operator = %acting.username,
        "Audit log purged by administrator"
    );

    state
        .audit
        .log(
            AuditAction::AuditLogPurged,
            "audit_log",
            "audit_log:all".to_string(),
            Some(acting.id.to_string()),
            Some(acting.username.clone()),
            serde_json::json!({"deleted": deleted}),
        )
        .await;

    Ok(Json(PurgeResponse { deleted }))
}
