//! Brand API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::brand;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::AppResult;
use shared::models::{Brand, BrandCreate, BrandUpdate};

const RESOURCE: &str = "brand";

/// GET /api/brands - active brands
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Brand>>> {
    let brands = brand::find_all(&state.pool).await?;
    Ok(Json(brands))
}

/// GET /api/brands/all - including inactive
pub async fn list_with_inactive(State(state): State<ServerState>) -> AppResult<Json<Vec<Brand>>> {
    let brands = brand::find_all_with_inactive(&state.pool).await?;
    Ok(Json(brands))
}

/// GET /api/brands/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Brand>> {
    let found = brand::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| shared::AppError::not_found(format!("Brand {id}")))?;
    Ok(Json(found))
}

/// POST /api/brands
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<BrandCreate>,
) -> AppResult<Json<Brand>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let created = brand::create(&state.pool, payload).await?;

    state
        .audit
        .log(
            AuditAction::BrandCreated,
            RESOURCE,
            format!("brand:{}", created.id),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({"name": &created.name}),
        )
        .await;

    Ok(Json(created))
}

/// PUT /api/brands/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<BrandUpdate>,
) -> AppResult<Json<Brand>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let updated = brand::update(&state.pool, id, payload).await?;

    state
        .audit
        .log(
            AuditAction::BrandUpdated,
            RESOURCE,
            format!("brand:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({"name": &updated.name}),
        )
        .await;

    Ok(Json(updated))
}

/// DELETE /api/brands/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = brand::delete(&state.pool, id).await?;

    state
        .audit
        .log(
            AuditAction::BrandDeleted,
            RESOURCE,
            format!("brand:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::Value::Null,
        )
        .await;

    Ok(Json(result))
}
