//! Stock Movement Model
//!
//! A movement is an immutable log entry: created once, never updated or
//! deleted through the API. Its creation is the only writer of
//! `product.stock`.

use serde::{Deserialize, Serialize};

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    /// Stock-increasing movement
    Entry,
    /// Stock-decreasing movement
    Exit,
}

impl MovementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

impl std::fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stock movement entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockMovement {
    pub id: i64,
    /// Product reference
    pub product: i64,
    /// Acting user reference
    pub user: i64,
    pub quantity: i64,
    pub direction: MovementDirection,
    /// Server-assigned creation timestamp (Unix millis)
    pub date: i64,
}

/// Create movement payload
///
/// `user` defaults to the authenticated caller; administrators may record
/// a movement on behalf of another user. The timestamp is server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementCreate {
    pub product: i64,
    pub user: Option<i64>,
    pub quantity: i64,
    pub direction: MovementDirection,
}

/// Movement list query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementQuery {
    pub direction: Option<MovementDirection>,
    pub product: Option<i64>,
    #[serde(default)]
    pub offset: i64,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_wire_values() {
        assert_eq!(
            serde_json::to_string(&MovementDirection::Entry).unwrap(),
            "\"entry\""
        );
        assert_eq!(
            serde_json::to_string(&MovementDirection::Exit).unwrap(),
            "\"exit\""
        );
    }
}
