//! User API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, MAX_USERNAME_LEN, validate_required_text,
};
use shared::AppResult;
use shared::models::{UserCreate, UserResponse, UserUpdate};

const RESOURCE: &str = "user";

/// GET /api/users - active users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = user::find_all(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/all - including inactive
pub async fn list_with_inactive(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = user::find_all_with_inactive(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let found = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| shared::AppError::not_found(format!("User {id}")))?;
    Ok(Json(found))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    Extension(acting): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserResponse>> {
    validate_required_text(&payload.username, "username", MAX_USERNAME_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let created = user::create(&state.pool, payload).await?;

    state
        .audit
        .log(
            AuditAction::UserCreated,
            RESOURCE,
            format!("user:{}", created.id),
            Some(acting.id.to_string()),
            Some(acting.username.clone()),
            serde_json::json!({"username": &created.username, "role": created.role}),
        )
        .await;

    Ok(Json(created))
}

/// PUT /api/users/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(acting): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    if let Some(ref username) = payload.username {
        validate_required_text(username, "username", MAX_USERNAME_LEN)?;
    }
    if let Some(ref pass) = payload.password {
        validate_required_text(pass, "password", MAX_PASSWORD_LEN)?;
    }

    let updated = user::update(&state.pool, id, payload).await?;

    state
        .audit
        .log(
            AuditAction::UserUpdated,
            RESOURCE,
            format!("user:{id}"),
            Some(acting.id.to_string()),
            Some(acting.username.clone()),
            serde_json::json!({"username": &updated.username}),
        )
        .await;

    Ok(Json(updated))
}

/// DELETE /api/users/:id - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Extension(acting): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = user::delete(&state.pool, id, acting.id).await?;

    if result {
        state
            .audit
            .log(
                AuditAction::UserDeleted,
                RESOURCE,
                format!("user:{id}"),
                Some(acting.id.to_string()),
                Some(acting.username.clone()),
                serde_json::Value::Null,
            )
            .await;
    }

    Ok(Json(result))
}
