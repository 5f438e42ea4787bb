//! Stock Movement API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::movement;
use shared::AppResult;
use shared::models::{MovementCreate, MovementDirection, MovementQuery, StockMovement};

const RESOURCE: &str = "movement";

/// GET /api/movements - newest first, filterable by direction and product
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let movements = movement::find_all(&state.pool, &query).await?;
    Ok(Json(movements))
}

/// GET /api/movements/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StockMovement>> {
    let found = movement::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| shared::AppError::not_found(format!("Movement {id}")))?;
    Ok(Json(found))
}

/// POST /api/movements - validate and commit a stock movement
///
/// The acting user comes from the JWT; id and timestamp are
/// server-assigned. A business-rule violation aborts the whole operation
/// with a 400 carrying the rule's message verbatim.
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MovementCreate>,
) -> AppResult<Json<StockMovement>> {
    let direction = payload.direction;
    let created = movement::create(&state.pool, user.id, payload).await?;

    let action = match direction {
        MovementDirection::Entry => AuditAction::EntryCreated,
        MovementDirection::Exit => AuditAction::ExitCreated,
    };
    state
        .audit
        .log(
            action,
            RESOURCE,
            format!("movement:{}", created.id),
            Some(user.id.to_string()),
            Some(user.username.clone()),
            serde_json::json!({
                "product": created.product,
                "quantity": created.quantity,
                "direction": created.direction.as_str(),
            }),
        )
        .await;

    Ok(Json(created))
}
