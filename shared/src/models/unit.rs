//! Unit of Measurement Model

use serde::{Deserialize, Serialize};

/// Unit of measurement entity
///
/// `name` is unique ("Kilogram"); `symbol` is the short printable form ("kg").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UnitOfMeasurement {
    pub id: i64,
    pub name: String,
    pub symbol: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create unit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCreate {
    pub name: String,
    pub symbol: Option<String>,
    pub is_active: Option<bool>,
}

/// Update unit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitUpdate {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub is_active: Option<bool>,
}
