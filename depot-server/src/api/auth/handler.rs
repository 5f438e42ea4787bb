//! Authentication Handlers
//!
//! Login, current-user lookup and logout.

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::audit::AuditAction;
use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::{role, user};
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Authenticates credentials and returns a JWT. Failures use a single
/// message for unknown-user and bad-password to prevent username
/// enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = user::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay before acting on the lookup result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match found {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::new(shared::ErrorCode::AccountDisabled));
            }

            let password_valid = password::verify_password(&req.password, &u.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                state
                    .audit
                    .log(
                        AuditAction::LoginFailed,
                        "auth",
                        format!("user:{}", req.username),
                        None,
                        None,
                        serde_json::json!({"reason": "invalid_credentials"}),
                    )
                    .await;
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            state
                .audit
                .log(
                    AuditAction::LoginFailed,
                    "auth",
                    format!("user:{}", req.username),
                    None,
                    None,
                    serde_json::json!({"reason": "user_not_found"}),
                )
                .await;
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let role = role::find_by_id(&state.pool, account.role)
        .await?
        .ok_or_else(|| AppError::internal("Role not found"))?;
    if !role.is_active {
        return Err(AppError::forbidden("Role has been disabled"));
    }

    let token = state
        .jwt_service
        .generate_token(account.id, &account.username, &role.name, &role.permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    state
        .audit
        .log(
            AuditAction::LoginSuccess,
            "auth",
            format!("user:{}", account.id),
            Some(account.id.to_string()),
            Some(account.username.clone()),
            serde_json::json!({"username": &account.username}),
        )
        .await;

    tracing::info!(
        user_id = account.id,
        username = %account.username,
        role = %role.name,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.id,
            username: account.username,
            role: role.id,
            role_name: role.name,
            permissions: role.permissions,
            is_system: account.is_system,
            is_active: account.is_active,
            created_at: account.created_at,
        },
    }))
}

/// GET /api/auth/me - current user info
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let account = user::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::with_message(shared::ErrorCode::UserNotFound, "User not found"))?;

    Ok(Json(UserInfo {
        id: account.id,
        username: account.username,
        role: account.role,
        role_name: account.role_name,
        permissions: current.permissions,
        is_system: account.is_system,
        is_active: account.is_active,
        created_at: account.created_at,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<()>> {
    state
        .audit
        .log(
            AuditAction::Logout,
            "auth",
            format!("user:{}", current.id),
            Some(current.id.to_string()),
            Some(current.username.clone()),
            serde_json::json!({"username": &current.username}),
        )
        .await;

    tracing::info!(user_id = current.id, username = %current.username, "User logged out");

    Ok(Json(()))
}
