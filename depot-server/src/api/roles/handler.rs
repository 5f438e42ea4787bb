//! Role API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::role;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::AppResult;
use shared::models::{Role, RoleCreate, RoleUpdate};

const RESOURCE: &str = "role";

/// GET /api/roles - active roles
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Role>>> {
    let roles = role::find_all(&state.pool).await?;
    Ok(Json(roles))
}

/// GET /api/roles/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Role>> {
    let found = role::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| shared::AppError::not_found(format!("Role {id}")))?;
    Ok(Json(found))
}

/// POST /api/roles
pub async fn create(
    State(state): State<ServerState>,
    Extension(acting): Extension<CurrentUser>,
    Json(payload): Json<RoleCreate>,
) -> AppResult<Json<Role>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let created = role::create(&state.pool, payload).await?;

    state
        .audit
        .log(
            AuditAction::RoleCreated,
            RESOURCE,
            format!("role:{}", created.id),
            Some(acting.id.to_string()),
            Some(acting.username.clone()),
            serde_json::json!({"name": &created.name, "permissions": &created.permissions}),
        )
        .await;

    Ok(Json(created))
}

/// PUT /api/roles/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(acting): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Json<Role>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let updated = role::update(&state.pool, id, payload).await?;

    state
        .audit
        .log(
            AuditAction::RoleUpdated,
            RESOURCE,
            format!("role:{id}"),
            Some(acting.id.to_string()),
            Some(acting.username.clone()),
            serde_json::json!({"name": &updated.name, "permissions": &updated.permissions}),
        )
        .await;

    Ok(Json(updated))
}

/// DELETE /api/roles/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(acting): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = role::delete(&state.pool, id).await?;

    state
        .audit
        .log(
            AuditAction::RoleDeleted,
            RESOURCE,
            format!("role:{id}"),
            Some(acting.id.to_string()),
            Some(acting.username.clone()),
            serde_json::Value::Null,
        )
        .await;

    Ok(Json(result))
}
