//! Unit of Measurement Repository

use super::{RepoError, RepoResult};
use shared::ErrorCode;
use shared::models::{UnitCreate, UnitOfMeasurement, UnitUpdate};
use sqlx::SqlitePool;

const UNIT_SELECT: &str =
    "SELECT id, name, symbol, is_active, created_at, updated_at FROM unit_of_measurement";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<UnitOfMeasurement>> {
    let sql = format!("{UNIT_SELECT} WHERE is_active = 1 ORDER BY name");
    let units = sqlx::query_as::<_, UnitOfMeasurement>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(units)
}

pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<UnitOfMeasurement>> {
    let sql = format!("{UNIT_SELECT} ORDER BY name");
    let units = sqlx::query_as::<_, UnitOfMeasurement>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(units)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UnitOfMeasurement>> {
    let sql = format!("{UNIT_SELECT} WHERE id = ?");
    let unit = sqlx::query_as::<_, UnitOfMeasurement>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(unit)
}

pub async fn create(pool: &SqlitePool, data: UnitCreate) -> RepoResult<UnitOfMeasurement> {
    let duplicate: Option<i64> =
        sqlx::query_scalar("SELECT id FROM unit_of_measurement WHERE name = ? LIMIT 1")
            .bind(&data.name)
            .fetch_optional(pool)
            .await?;
    if duplicate.is_some() {
        return Err(RepoError::Business(
            ErrorCode::UnitNameExists,
            format!("Unit of measurement '{}' already exists", data.name),
        ));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO unit_of_measurement (id, name, symbol, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.symbol)
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create unit of measurement".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UnitUpdate) -> RepoResult<UnitOfMeasurement> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE unit_of_measurement SET name = COALESCE(?1, name), symbol = COALESCE(?2, symbol), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.symbol)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::UnitNotFound,
            format!("Unit of measurement {id} not found"),
        ));
    }
    find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(
            ErrorCode::UnitNotFound,
            format!("Unit of measurement {id} not found"),
        )
    })
}

/// Hard delete a unit. Blocked while products still reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let in_use: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE unit_of_measurement = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if in_use > 0 {
        return Err(RepoError::Business(
            ErrorCode::UnitHasProducts,
            format!("Unit of measurement {id} has {in_use} associated product(s)"),
        ));
    }

    let rows = sqlx::query("DELETE FROM unit_of_measurement WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::UnitNotFound,
            format!("Unit of measurement {id} not found"),
        ));
    }
    Ok(true)
}
