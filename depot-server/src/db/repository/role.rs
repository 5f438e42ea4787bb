//! Role Repository

use super::{RepoError, RepoResult};
use crate::auth::permissions;
use shared::ErrorCode;
use shared::models::{Role, RoleCreate, RoleUpdate};
use sqlx::SqlitePool;

const ROLE_SELECT: &str =
    "SELECT id, name, display_name, permissions, is_system, is_active FROM role";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Role>> {
    let sql = format!("{ROLE_SELECT} WHERE is_active = 1 ORDER BY name");
    let roles = sqlx::query_as::<_, Role>(&sql).fetch_all(pool).await?;
    Ok(roles)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Role>> {
    let sql = format!("{ROLE_SELECT} WHERE id = ?");
    let role = sqlx::query_as::<_, Role>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(role)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Role>> {
    let sql = format!("{ROLE_SELECT} WHERE name = ? LIMIT 1");
    let role = sqlx::query_as::<_, Role>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(role)
}

fn check_permissions(perms: &[String]) -> RepoResult<()> {
    for p in perms {
        if !permissions::is_valid_permission(p) {
            return Err(RepoError::Validation(format!("unknown permission: {p}")));
        }
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: RoleCreate) -> RepoResult<Role> {
    check_permissions(&data.permissions)?;

    let duplicate: Option<i64> = sqlx::query_scalar("SELECT id FROM role WHERE name = ? LIMIT 1")
        .bind(&data.name)
        .fetch_optional(pool)
        .await?;
    if duplicate.is_some() {
        return Err(RepoError::Business(
            ErrorCode::RoleNameExists,
            format!("Role '{}' already exists", data.name),
        ));
    }

    let display_name = data.display_name.unwrap_or_else(|| data.name.clone());
    let permissions_json =
        serde_json::to_string(&data.permissions).unwrap_or_else(|_| "[]".to_string());
    let id = shared::util::snowflake_id();

    sqlx::query("INSERT INTO role (id, name, display_name, permissions) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(&data.name)
        .bind(display_name)
        .bind(permissions_json)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create role".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoleUpdate) -> RepoResult<Role> {
    let existing = find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::RoleNotFound, format!("Role {id} not found"))
    })?;
    if existing.is_system {
        return Err(RepoError::Business(
            ErrorCode::RoleIsSystem,
            "Cannot modify system role".into(),
        ));
    }

    if let Some(ref perms) = data.permissions {
        check_permissions(perms)?;
    }
    let permissions_json = data
        .permissions
        .as_ref()
        .map(|p| serde_json::to_string(p).unwrap_or_else(|_| "[]".to_string()));

    let rows = sqlx::query(
        "UPDATE role SET name = COALESCE(?1, name), display_name = COALESCE(?2, display_name), permissions = COALESCE(?3, permissions), is_active = COALESCE(?4, is_active) WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.display_name)
    .bind(permissions_json)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::RoleNotFound,
            format!("Role {id} not found"),
        ));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Business(ErrorCode::RoleNotFound, format!("Role {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let existing = find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::RoleNotFound, format!("Role {id} not found"))
    })?;
    if existing.is_system {
        return Err(RepoError::Business(
            ErrorCode::RoleIsSystem,
            "Cannot delete system role".into(),
        ));
    }

    let in_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE role = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if in_use > 0 {
        return Err(RepoError::Business(
            ErrorCode::RoleInUse,
            format!("Role {id} is assigned to {in_use} user(s)"),
        ));
    }

    sqlx::query("DELETE FROM role WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
