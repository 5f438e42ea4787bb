//! Category Repository

use super::{RepoError, RepoResult};
use shared::ErrorCode;
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

const CATEGORY_SELECT: &str = "SELECT id, name, is_active, created_at, updated_at FROM category";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE is_active = 1 ORDER BY name");
    let categories = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(categories)
}

pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} ORDER BY name");
    let categories = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE id = ?");
    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO category (id, name, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)")
        .bind(id)
        .bind(&data.name)
        .bind(data.is_active.unwrap_or(true))
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE category SET name = COALESCE(?1, name), is_active = COALESCE(?2, is_active), updated_at = ?3 WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::CategoryNotFound,
            format!("Category {id} not found"),
        ));
    }
    find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
    })
}

/// Hard delete a category. Blocked while products still reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let in_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE category = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if in_use > 0 {
        return Err(RepoError::Business(
            ErrorCode::CategoryHasProducts,
            format!("Category {id} has {in_use} associated product(s)"),
        ));
    }

    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::CategoryNotFound,
            format!("Category {id} not found"),
        ));
    }
    Ok(true)
}
