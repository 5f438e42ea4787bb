//! User Repository

use super::{RepoError, RepoResult};
use crate::auth::password;
use shared::ErrorCode;
use shared::models::{User, UserCreate, UserResponse, UserUpdate};
use sqlx::SqlitePool;

const USER_RESPONSE_SELECT: &str = "SELECT u.id, u.username, u.role, r.display_name AS role_name, u.is_system, u.is_active, u.created_at FROM user u JOIN role r ON u.role = r.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<UserResponse>> {
    let sql = format!("{USER_RESPONSE_SELECT} WHERE u.is_active = 1 ORDER BY u.username");
    let users = sqlx::query_as::<_, UserResponse>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<UserResponse>> {
    let sql = format!("{USER_RESPONSE_SELECT} ORDER BY u.username");
    let users = sqlx::query_as::<_, UserResponse>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserResponse>> {
    let sql = format!("{USER_RESPONSE_SELECT} WHERE u.id = ?");
    let user = sqlx::query_as::<_, UserResponse>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Full row including the password hash, for authentication only.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, role, is_system, is_active, created_at, updated_at FROM user WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<UserResponse> {
    let duplicate: Option<i64> = sqlx::query_scalar("SELECT id FROM user WHERE username = ? LIMIT 1")
        .bind(&data.username)
        .fetch_optional(pool)
        .await?;
    if duplicate.is_some() {
        return Err(RepoError::Business(
            ErrorCode::UsernameExists,
            format!("Username '{}' already exists", data.username),
        ));
    }

    let role: Option<i64> = sqlx::query_scalar("SELECT id FROM role WHERE id = ?")
        .bind(data.role)
        .fetch_optional(pool)
        .await?;
    if role.is_none() {
        return Err(RepoError::Business(
            ErrorCode::RoleNotFound,
            format!("Role {} not found", data.role),
        ));
    }

    let hash = password::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO user (id, username, password_hash, role, is_system, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, 1, ?5, ?5)",
    )
    .bind(id)
    .bind(&data.username)
    .bind(hash)
    .bind(data.role)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<UserResponse> {
    let existing = find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::UserNotFound, format!("User {id} not found"))
    })?;
    if existing.is_system && (data.role.is_some() || data.is_active.is_some()) {
        return Err(RepoError::Business(
            ErrorCode::UserIsSystem,
            "Cannot modify system user".into(),
        ));
    }

    if let Some(role_id) = data.role {
        let role: Option<i64> = sqlx::query_scalar("SELECT id FROM role WHERE id = ?")
            .bind(role_id)
            .fetch_optional(pool)
            .await?;
        if role.is_none() {
            return Err(RepoError::Business(
                ErrorCode::RoleNotFound,
                format!("Role {role_id} not found"),
            ));
        }
    }

    let hash = match data.password.as_deref() {
        Some(p) => Some(
            password::hash_password(p)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?,
        ),
        None => None,
    };

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE user SET username = COALESCE(?1, username), password_hash = COALESCE(?2, password_hash), role = COALESCE(?3, role), is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.username)
    .bind(hash)
    .bind(data.role)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::UserNotFound,
            format!("User {id} not found"),
        ));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Business(ErrorCode::UserNotFound, format!("User {id} not found")))
}

/// Soft delete a user. Movement history keeps referencing the row.
pub async fn delete(pool: &SqlitePool, id: i64, acting_user_id: i64) -> RepoResult<bool> {
    if id == acting_user_id {
        return Err(RepoError::Business(
            ErrorCode::CannotDeleteSelf,
            "Cannot delete own account".into(),
        ));
    }

    let existing = find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::UserNotFound, format!("User {id} not found"))
    })?;
    if existing.is_system {
        return Err(RepoError::Business(
            ErrorCode::UserIsSystem,
            "Cannot delete system user".into(),
        ));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE user SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
