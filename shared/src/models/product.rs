//! Product Model

use serde::{Deserialize, Serialize};

/// Product availability status, derived from stock on every save.
///
/// Wire values (`in_stock`, `temporarily_unavailable`, `out_of_stock`) are
/// stable and user-facing; they are also the TEXT values stored in the
/// `product.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    InStock,
    TemporarilyUnavailable,
    OutOfStock,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
            Self::OutOfStock => "out_of_stock",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Product entity
///
/// `stock` is owned by the movement commit path; it is settable at creation
/// and mutated only by entries/exits afterwards. `status` is always derived
/// (see the server's stock rules).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub title: String,
    /// Brand reference (optional)
    pub brand: Option<i64>,
    /// Category reference (required)
    pub category: i64,
    pub price: f64,
    pub is_active: bool,
    pub dimension: Option<String>,
    pub stock: i64,
    /// Unit of measurement reference (required)
    pub unit_of_measurement: i64,
    pub observation: Option<String>,
    pub status: ProductStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
///
/// `status` defaults to `in_stock` and is normalized through derivation;
/// `stock` defaults to 0 (which derives to `out_of_stock`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub brand: Option<i64>,
    pub category: i64,
    pub price: f64,
    pub is_active: Option<bool>,
    pub dimension: Option<String>,
    pub stock: Option<i64>,
    pub unit_of_measurement: i64,
    pub observation: Option<String>,
    pub status: Option<ProductStatus>,
}

/// Update product payload
///
/// Carries no `stock` field: stock changes flow through movements only.
/// A supplied `status` is the "previous status" input to derivation, which
/// is how an operator parks a product as `temporarily_unavailable`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub brand: Option<i64>,
    pub category: Option<i64>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
    pub dimension: Option<String>,
    pub unit_of_measurement: Option<i64>,
    pub observation: Option<String>,
    pub status: Option<ProductStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::InStock).unwrap(),
            "\"in_stock\""
        );
        assert_eq!(
            serde_json::to_string(&ProductStatus::TemporarilyUnavailable).unwrap(),
            "\"temporarily_unavailable\""
        );
        assert_eq!(
            serde_json::to_string(&ProductStatus::OutOfStock).unwrap(),
            "\"out_of_stock\""
        );
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ProductStatus::InStock,
            ProductStatus::TemporarilyUnavailable,
            ProductStatus::OutOfStock,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let parsed: ProductStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, parsed);
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
