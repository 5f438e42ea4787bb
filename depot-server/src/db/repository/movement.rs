//! Stock Movement Repository
//!
//! `create` is the only writer of `product.stock`. Validation read, stock
//! mutation, product write and movement insert all happen inside one
//! transaction, so concurrent movements against the same product serialize
//! and a movement row never goes missing after a stock change.

use super::product::PRODUCT_SELECT;
use super::{RepoError, RepoResult};
use crate::stock;
use shared::ErrorCode;
use shared::models::{MovementCreate, MovementDirection, MovementQuery, Product, StockMovement};
use sqlx::SqlitePool;

const MOVEMENT_SELECT: &str =
    "SELECT id, product, user, quantity, direction, date FROM stock_movement";

const DEFAULT_PAGE_SIZE: i64 = 50;

pub async fn find_all(pool: &SqlitePool, query: &MovementQuery) -> RepoResult<Vec<StockMovement>> {
    let mut conditions: Vec<&str> = Vec::new();
    if query.direction.is_some() {
        conditions.push("direction = ?");
    }
    if query.product.is_some() {
        conditions.push("product = ?");
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    let sql = format!("{MOVEMENT_SELECT}{where_clause} ORDER BY date DESC LIMIT ? OFFSET ?");

    let mut q = sqlx::query_as::<_, StockMovement>(&sql);
    if let Some(direction) = query.direction {
        q = q.bind(direction);
    }
    if let Some(product) = query.product {
        q = q.bind(product);
    }
    let movements = q
        .bind(query.limit.unwrap_or(DEFAULT_PAGE_SIZE))
        .bind(query.offset)
        .fetch_all(pool)
        .await?;
    Ok(movements)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StockMovement>> {
    let sql = format!("{MOVEMENT_SELECT} WHERE id = ?");
    let movement = sqlx::query_as::<_, StockMovement>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(movement)
}

/// Validate and commit a movement.
///
/// Transaction layout:
/// 1. A no-op touch of the product row takes SQLite's write lock before
///    anything is read, so the validation below can never act on a stale
///    stock value under concurrent submissions (the writer queue plus
///    `busy_timeout` is what serializes them). Zero rows here means the
///    product does not exist.
/// 2. Read the product and run the pure validation rules; a violation
///    rolls the transaction back with nothing persisted.
/// 3. Apply the stock delta, derive the new status, update the product.
/// 4. Insert the movement row with a server-assigned id and timestamp.
pub async fn create(
    pool: &SqlitePool,
    acting_user_id: i64,
    data: MovementCreate,
) -> RepoResult<StockMovement> {
    let user_id = data.user.unwrap_or(acting_user_id);
    let known_user: Option<i64> = sqlx::query_scalar("SELECT id FROM user WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    if known_user.is_none() {
        return Err(RepoError::Business(
            ErrorCode::UserNotFound,
            format!("User {user_id} not found"),
        ));
    }

    let mut tx = pool.begin().await?;

    let locked = sqlx::query("UPDATE product SET updated_at = updated_at WHERE id = ?")
        .bind(data.product)
        .execute(&mut *tx)
        .await?;
    if locked.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::ProductNotFound,
            format!("Product {} not found", data.product),
        ));
    }

    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(data.product)
        .fetch_one(&mut *tx)
        .await?;

    match data.direction {
        MovementDirection::Entry => stock::validate_entry(&product, data.quantity),
        MovementDirection::Exit => stock::validate_exit(&product, data.quantity),
    }
    .map_err(|e| RepoError::Validation(e.to_string()))?;

    let new_stock = match data.direction {
        MovementDirection::Entry => product.stock + data.quantity,
        MovementDirection::Exit => product.stock - data.quantity,
    };
    let status = stock::derive_status(product.status, new_stock);

    let now = shared::util::now_millis();
    sqlx::query("UPDATE product SET stock = ?1, status = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(new_stock)
        .bind(status)
        .bind(now)
        .bind(data.product)
        .execute(&mut *tx)
        .await?;

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO stock_movement (id, product, user, quantity, direction, date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(data.product)
    .bind(user_id)
    .bind(data.quantity)
    .bind(data.direction)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        movement_id = id,
        product_id = data.product,
        direction = %data.direction,
        quantity = data.quantity,
        new_stock,
        status = %status,
        "Stock movement committed"
    );

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create movement".into()))
}
