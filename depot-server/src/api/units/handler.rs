//! Unit of Measurement API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::unit;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SYMBOL_LEN, validate_optional_text, validate_required_text,
};
use shared::AppResult;
use shared::models::{UnitCreate, UnitOfMeasurement, UnitUpdate};

const RESOURCE: &str = "unit_of_measurement";

/// GET /api/units - active units
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UnitOfMeasurement>>> {
    let units = unit::find_all(&state.pool).await?;
    Ok(Json(units))
}

/// GET /api/units/all - including inactive
pub async fn list_with_inactive(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<UnitOfMeasurement>>> {
    let units = unit::find_all_with_inactive(&state.pool).await?;
    Ok(Json(units))
}

/// GET /api/units/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UnitOfMeasurement>> {
    let found = unit::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| shared::AppError::not_found(format!("Unit of measurement {id}")))?;
    Ok(Json(found))
}

/// POST /api/units
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UnitCreate>,
) -> AppResult<Json<UnitOfMeasurement>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.symbol, "symbol", MAX_SYMBOL_LEN)?;

    let created = unit::create(&state.pool, payload).await?;

    state
        .audit
        .log(
            AuditAction::UnitCreated,
            RESOURCE,
            format!("unit_of_measurement:{}", created.id),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({"name": &created.name, "symbol": &created.symbol}),
        )
        .await;

    Ok(Json(created))
}

/// PUT /api/units/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UnitUpdate>,
) -> AppResult<Json<UnitOfMeasurement>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.symbol, "symbol", MAX_SYMBOL_LEN)?;

    let updated = unit::update(&state.pool, id, payload).await?;

    state
        .audit
        .log(
            AuditAction::UnitUpdated,
            RESOURCE,
            format!("unit_of_measurement:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({"name": &updated.name}),
        )
        .await;

    Ok(Json(updated))
}

/// DELETE /api/units/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = unit::delete(&state.pool, id).await?;

    state
        .audit
        .log(
            AuditAction::UnitDeleted,
            RESOURCE,
            format!("unit_of_measurement:{id}"),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::Value::Null,
        )
        .await;

    Ok(Json(result))
}
