//! Category API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::AppResult;
use shared::models::{Category, CategoryCreate, CategoryUpdate};

const RESOURCE: &str = "category";

/// GET /api/categories - active categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/categories/all - including inactive
pub async fn list_with_inactive(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all_with_inactive(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let found = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| shared::AppError::not_found(format!("Category {id}")))?;
    Ok(Json(found))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let created = category::create(&state.pool, payload).await?;

    state
        .audit
        .log(
            AuditAction::CategoryCreated,
            RESOURCE,
            format!("category:{}", created.id),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({"name": &created.name}),
        )
        .await;

    Ok(Json(created))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let updated = category::update(&state.pool, id, payload).await?;

    state
        .audit
        .log(
            AuditAction::CategoryUpdated,
            RESOURCE,
            format!("category:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({"name": &updated.name}),
        )
        .await;

    Ok(Json(updated))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = category::delete(&state.pool, id).await?;

    state
        .audit
        .log(
            AuditAction::CategoryDeleted,
            RESOURCE,
            format!("category:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::Value::Null,
        )
        .await;

    Ok(Json(result))
}
