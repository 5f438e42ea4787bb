//! Permission Definitions
//!
//! Simplified per-model RBAC:
//! - reads are open to any authenticated user
//! - writes are gated per resource
//! - user management is admin-only (is_system protected)

/// Configurable permission list
/// Does not include "all" and "users:manage" - those are system level.
pub const ALL_PERMISSIONS: &[&str] = &[
    "catalog:manage",   // brands / categories / units of measurement
    "products:manage",  // product CRUD
    "movements:create", // stock entries and exits
    "reports:view",     // movement and audit listings
];

/// Admin-only permissions (not in the configurable list)
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &[
    "users:manage", // user administration
    "all",          // superuser
];

/// Default role permissions
pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    "catalog:manage",
    "products:manage",
    "movements:create",
    "reports:view",
];

pub const DEFAULT_OPERATOR_PERMISSIONS: &[&str] = &["movements:create", "reports:view"];

/// Get permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    match role_name {
        "admin" => DEFAULT_ADMIN_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        "manager" => DEFAULT_MANAGER_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        "operator" => DEFAULT_OPERATOR_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        _ => vec![],
    }
}

/// Validate if a permission string is valid
pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission)
        || ADMIN_ONLY_PERMISSIONS.contains(&permission)
        || permission.ends_with(":*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for perms in [
            DEFAULT_ADMIN_PERMISSIONS,
            DEFAULT_MANAGER_PERMISSIONS,
            DEFAULT_OPERATOR_PERMISSIONS,
        ] {
            for p in perms {
                assert!(is_valid_permission(p), "invalid default permission: {p}");
            }
        }
    }

    #[test]
    fn test_wildcard_is_valid() {
        assert!(is_valid_permission("movements:*"));
        assert!(!is_valid_permission("movements:delete"));
    }

    #[test]
    fn test_unknown_role_has_no_permissions() {
        assert!(get_default_permissions("intern").is_empty());
    }
}
