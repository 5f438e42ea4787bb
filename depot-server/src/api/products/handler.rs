//! Product API Handlers
//!
//! Product `status` is never written through: payloads may request one,
//! and the repository normalizes it through the stock derivation rules.
//! Stock itself only changes through movements (plus the opening balance
//! at creation).

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use shared::AppResult;
use shared::models::{Product, ProductCreate, ProductUpdate};

const RESOURCE: &str = "product";

/// GET /api/products - active products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/all - including inactive
pub async fn list_with_inactive(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_all_with_inactive(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/by-category/:category_id
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_by_category(&state.pool, category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let found = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| shared::AppError::not_found(format!("Product {id}")))?;
    Ok(Json(found))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.dimension, "dimension", MAX_NAME_LEN)?;
    validate_optional_text(&payload.observation, "observation", MAX_NOTE_LEN)?;

    let created = product::create(&state.pool, payload).await?;

    state
        .audit
        .log(
            AuditAction::ProductCreated,
            RESOURCE,
            format!("product:{}", created.id),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({
                "title": &created.title,
                "stock": created.stock,
                "status": created.status.as_str(),
            }),
        )
        .await;

    Ok(Json(created))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.dimension, "dimension", MAX_NAME_LEN)?;
    validate_optional_text(&payload.observation, "observation", MAX_NOTE_LEN)?;

    let updated = product::update(&state.pool, id, payload).await?;

    state
        .audit
        .log(
            AuditAction::ProductUpdated,
            RESOURCE,
            format!("product:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({
                "title": &updated.title,
                "status": updated.status.as_str(),
            }),
        )
        .await;

    Ok(Json(updated))
}

/// DELETE /api/products/:id - removes the product and its movement history
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = product::delete(&state.pool, id).await?;

    state
        .audit
        .log(
            AuditAction::ProductDeleted,
            RESOURCE,
            format!("product:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::Value::Null,
        )
        .await;

    Ok(Json(result))
}
