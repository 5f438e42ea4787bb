//! Grouping of error codes by their numeric range

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain an error code belongs to, derived from its thousands digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Catalog,
    Product,
    Movement,
    User,
    System,
}

impl ErrorCategory {
    /// Classify a raw code value
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Catalog,
            4 => Self::Product,
            5 => Self::Movement,
            8 => Self::User,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Catalog => "catalog",
            Self::Product => "product",
            Self::Movement => "movement",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_by_range() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::AdminRequired.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::UnitNameExists.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::ProductNotFound.category(), ErrorCategory::Product);
        assert_eq!(ErrorCode::MovementNotFound.category(), ErrorCategory::Movement);
        assert_eq!(ErrorCode::RoleInUse.category(), ErrorCategory::User);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_wire_name() {
        assert_eq!(ErrorCategory::Catalog.name(), "catalog");
        assert_eq!(
            serde_json::to_string(&ErrorCategory::Movement).unwrap(),
            "\"movement\""
        );
    }
}
