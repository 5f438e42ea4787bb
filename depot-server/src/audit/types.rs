//! Audit log types

use serde::{Deserialize, Serialize};

/// Audit action type (enum, not free text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ Authentication ═══
    LoginSuccess,
    LoginFailed,
    Logout,

    // ═══ Catalog ═══
    BrandCreated,
    BrandUpdated,
    BrandDeleted,
    CategoryCreated,
    CategoryUpdated,
    CategoryDeleted,
    UnitCreated,
    UnitUpdated,
    UnitDeleted,

    // ═══ Products ═══
    ProductCreated,
    ProductUpdated,
    ProductDeleted,

    // ═══ Movements ═══
    EntryCreated,
    ExitCreated,

    // ═══ Administration ═══
    UserCreated,
    UserUpdated,
    UserDeleted,
    RoleCreated,
    RoleUpdated,
    RoleDeleted,
    AuditLogPurged,
}

impl AuditAction {
    /// Stable wire/storage form (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginSuccess => "login_success",
            Self::LoginFailed => "login_failed",
            Self::Logout => "logout",
            Self::BrandCreated => "brand_created",
            Self::BrandUpdated => "brand_updated",
            Self::BrandDeleted => "brand_deleted",
            Self::CategoryCreated => "category_created",
            Self::CategoryUpdated => "category_updated",
            Self::CategoryDeleted => "category_deleted",
            Self::UnitCreated => "unit_created",
            Self::UnitUpdated => "unit_updated",
            Self::UnitDeleted => "unit_deleted",
            Self::ProductCreated => "product_created",
            Self::ProductUpdated => "product_updated",
            Self::ProductDeleted => "product_deleted",
            Self::EntryCreated => "entry_created",
            Self::ExitCreated => "exit_created",
            Self::UserCreated => "user_created",
            Self::UserUpdated => "user_updated",
            Self::UserDeleted => "user_deleted",
            Self::RoleCreated => "role_created",
            Self::RoleUpdated => "role_updated",
            Self::RoleDeleted => "role_deleted",
            Self::AuditLogPurged => "audit_log_purged",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    /// Unix millis
    pub timestamp: i64,
    pub action: AuditAction,
    /// Resource type ("product", "movement", "auth", ...)
    pub resource_type: String,
    /// Resource ID ("product:123", "user:45", ...)
    pub resource_id: String,
    /// Acting user ID (None for system events)
    pub operator_id: Option<String>,
    pub operator_name: Option<String>,
    /// Structured details (JSON)
    pub details: serde_json::Value,
}

/// Audit log query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    /// Start time (Unix millis, inclusive)
    pub from: Option<i64>,
    /// End time (Unix millis, inclusive)
    pub to: Option<i64>,
    pub action: Option<AuditAction>,
    pub operator_id: Option<String>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub offset: i64,
    pub limit: Option<i64>,
}

/// Audit log list response
#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditEntry>,
    pub total: i64,
}

/// Purge result - how many entries were deleted
#[derive(Debug, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_form_matches_serde() {
        for action in [
            AuditAction::LoginSuccess,
            AuditAction::ProductCreated,
            AuditAction::EntryCreated,
            AuditAction::ExitCreated,
            AuditAction::AuditLogPurged,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }
}
