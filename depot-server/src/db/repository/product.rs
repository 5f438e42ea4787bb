//! Product Repository
//!
//! Every persisting operation runs the status derivation from the stock
//! rules module before writing. Stock itself is only ever written by the
//! movement repository (and by `create` for the opening balance).

use super::{RepoError, RepoResult};
use crate::stock;
use shared::ErrorCode;
use shared::models::{Product, ProductCreate, ProductStatus, ProductUpdate};
use sqlx::SqlitePool;

pub(crate) const PRODUCT_SELECT: &str = "SELECT id, title, brand, category, price, is_active, dimension, stock, unit_of_measurement, observation, status, created_at, updated_at FROM product";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE is_active = 1 ORDER BY title");
    let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(products)
}

pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} ORDER BY title");
    let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(products)
}

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE category = ? AND is_active = 1 ORDER BY title");
    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Verify that referenced catalog records exist
async fn check_references(
    pool: &SqlitePool,
    brand: Option<i64>,
    category: Option<i64>,
    unit: Option<i64>,
) -> RepoResult<()> {
    if let Some(brand_id) = brand {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM brand WHERE id = ?")
            .bind(brand_id)
            .fetch_optional(pool)
            .await?;
        if found.is_none() {
            return Err(RepoError::Business(
                ErrorCode::BrandNotFound,
                format!("Brand {brand_id} not found"),
            ));
        }
    }
    if let Some(category_id) = category {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM category WHERE id = ?")
            .bind(category_id)
            .fetch_optional(pool)
            .await?;
        if found.is_none() {
            return Err(RepoError::Business(
                ErrorCode::CategoryNotFound,
                format!("Category {category_id} not found"),
            ));
        }
    }
    if let Some(unit_id) = unit {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM unit_of_measurement WHERE id = ?")
                .bind(unit_id)
                .fetch_optional(pool)
                .await?;
        if found.is_none() {
            return Err(RepoError::Business(
                ErrorCode::UnitNotFound,
                format!("Unit of measurement {unit_id} not found"),
            ));
        }
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if data.price < 0.0 {
        return Err(RepoError::Business(
            ErrorCode::ProductInvalidPrice,
            "price must not be negative".into(),
        ));
    }
    check_references(pool, data.brand, Some(data.category), Some(data.unit_of_measurement)).await?;

    let opening_stock = data.stock.unwrap_or(0);
    let status = stock::derive_status(
        data.status.unwrap_or(ProductStatus::InStock),
        opening_stock,
    );

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO product (id, title, brand, category, price, is_active, dimension, stock, unit_of_measurement, observation, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(data.brand)
    .bind(data.category)
    .bind(data.price)
    .bind(data.is_active.unwrap_or(true))
    .bind(&data.dimension)
    .bind(opening_stock)
    .bind(data.unit_of_measurement)
    .bind(&data.observation)
    .bind(status)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    if let Some(price) = data.price
        && price < 0.0
    {
        return Err(RepoError::Business(
            ErrorCode::ProductInvalidPrice,
            "price must not be negative".into(),
        ));
    }
    check_references(pool, data.brand, data.category, data.unit_of_measurement).await?;

    let existing = find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::ProductNotFound, format!("Product {id} not found"))
    })?;

    // A requested status is the "previous status" input to derivation;
    // stock is whatever the movement path has left on the row.
    let requested = data.status.unwrap_or(existing.status);
    let status = stock::derive_status(requested, existing.stock);

    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE product SET title = COALESCE(?1, title), brand = COALESCE(?2, brand), category = COALESCE(?3, category), price = COALESCE(?4, price), is_active = COALESCE(?5, is_active), dimension = COALESCE(?6, dimension), unit_of_measurement = COALESCE(?7, unit_of_measurement), observation = COALESCE(?8, observation), status = ?9, updated_at = ?10 WHERE id = ?11",
    )
    .bind(data.title)
    .bind(data.brand)
    .bind(data.category)
    .bind(data.price)
    .bind(data.is_active)
    .bind(data.dimension)
    .bind(data.unit_of_measurement)
    .bind(data.observation)
    .bind(status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::ProductNotFound, format!("Product {id} not found"))
    })
}

/// Hard delete a product together with its movement history.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM stock_movement WHERE product = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::ProductNotFound,
            format!("Product {id} not found"),
        ));
    }

    tx.commit().await?;
    Ok(true)
}
