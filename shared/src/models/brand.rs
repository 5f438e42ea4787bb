//! Brand Model

use serde::{Deserialize, Serialize};

/// Brand entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create brand payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCreate {
    pub name: String,
    pub is_active: Option<bool>,
}

/// Update brand payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
