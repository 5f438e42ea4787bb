//! Error codes for the Depot backend
//!
//! Numeric codes are ranged by domain so a client can classify a failure
//! without string matching:
//!
//! - 0xxx general, 1xxx authentication, 2xxx permission
//! - 3xxx catalog (brand / category / unit of measurement)
//! - 4xxx product, 5xxx movement
//! - 8xxx user and role administration, 9xxx system
//!
//! Codes travel on the wire as plain u16 values and are part of the API
//! contract; never renumber an existing code.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    Success = 0,
    /// A business rule rejected the request; the message says which
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,
    AdminRequired = 2003,

    // ==================== 3xxx: Catalog ====================
    BrandNotFound = 3001,
    BrandHasProducts = 3002,
    CategoryNotFound = 3101,
    CategoryHasProducts = 3102,
    UnitNotFound = 3201,
    UnitHasProducts = 3202,
    UnitNameExists = 3203,

    // ==================== 4xxx: Product ====================
    ProductNotFound = 4001,
    ProductInvalidPrice = 4002,

    // ==================== 5xxx: Movement ====================
    MovementNotFound = 5001,

    // ==================== 8xxx: User / Role ====================
    UserNotFound = 8001,
    UsernameExists = 8002,
    CannotDeleteSelf = 8003,
    UserIsSystem = 8004,
    RoleNotFound = 8101,
    RoleNameExists = 8102,
    RoleInUse = 8103,
    RoleIsSystem = 8104,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Every defined code, in numeric order. Single source for the
    /// u16 -> code mapping.
    const ALL: &'static [ErrorCode] = &[
        Self::Success,
        Self::ValidationFailed,
        Self::NotFound,
        Self::AlreadyExists,
        Self::NotAuthenticated,
        Self::InvalidCredentials,
        Self::TokenExpired,
        Self::TokenInvalid,
        Self::AccountDisabled,
        Self::PermissionDenied,
        Self::AdminRequired,
        Self::BrandNotFound,
        Self::BrandHasProducts,
        Self::CategoryNotFound,
        Self::CategoryHasProducts,
        Self::UnitNotFound,
        Self::UnitHasProducts,
        Self::UnitNameExists,
        Self::ProductNotFound,
        Self::ProductInvalidPrice,
        Self::MovementNotFound,
        Self::UserNotFound,
        Self::UsernameExists,
        Self::CannotDeleteSelf,
        Self::UserIsSystem,
        Self::RoleNotFound,
        Self::RoleNameExists,
        Self::RoleInUse,
        Self::RoleIsSystem,
        Self::InternalError,
        Self::DatabaseError,
    ];

    /// Numeric wire value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message, used when no custom message is supplied
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Authentication token has expired",
            Self::TokenInvalid => "Authentication token is invalid",
            Self::AccountDisabled => "Account has been disabled",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Administrator role is required",

            Self::BrandNotFound => "Brand not found",
            Self::BrandHasProducts => "Brand has associated products",
            Self::CategoryNotFound => "Category not found",
            Self::CategoryHasProducts => "Category has associated products",
            Self::UnitNotFound => "Unit of measurement not found",
            Self::UnitHasProducts => "Unit of measurement has associated products",
            Self::UnitNameExists => "Unit of measurement name already exists",

            Self::ProductNotFound => "Product not found",
            Self::ProductInvalidPrice => "Product has invalid price",

            Self::MovementNotFound => "Movement not found",

            Self::UserNotFound => "User not found",
            Self::UsernameExists => "Username already exists",
            Self::CannotDeleteSelf => "Cannot delete own account",
            Self::UserIsSystem => "Cannot modify system user",
            Self::RoleNotFound => "Role not found",
            Self::RoleNameExists => "Role name already exists",
            Self::RoleInUse => "Role is currently in use",
            Self::RoleIsSystem => "Cannot modify system role",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// HTTP status the code maps to in API responses
    pub fn http_status(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Self::Success => StatusCode::OK,

            Self::ValidationFailed | Self::ProductInvalidPrice | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }

            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            Self::PermissionDenied
            | Self::AdminRequired
            | Self::AccountDisabled
            | Self::UserIsSystem
            | Self::RoleIsSystem
            | Self::CannotDeleteSelf => StatusCode::FORBIDDEN,

            Self::NotFound
            | Self::BrandNotFound
            | Self::CategoryNotFound
            | Self::UnitNotFound
            | Self::ProductNotFound
            | Self::MovementNotFound
            | Self::UserNotFound
            | Self::RoleNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::UnitNameExists
            | Self::UsernameExists
            | Self::RoleNameExists
            | Self::BrandHasProducts
            | Self::CategoryHasProducts
            | Self::UnitHasProducts
            | Self::RoleInUse => StatusCode::CONFLICT,

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Raised when a u16 does not name a defined error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values_are_stable() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::BrandNotFound.code(), 3001);
        assert_eq!(ErrorCode::CategoryNotFound.code(), 3101);
        assert_eq!(ErrorCode::UnitNotFound.code(), 3201);
        assert_eq!(ErrorCode::ProductNotFound.code(), 4001);
        assert_eq!(ErrorCode::MovementNotFound.code(), 5001);
        assert_eq!(ErrorCode::UserNotFound.code(), 8001);
        assert_eq!(ErrorCode::RoleNotFound.code(), 8101);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_every_code_round_trips_through_u16() {
        for &code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(777), Err(InvalidErrorCode(777)));
    }

    #[test]
    fn test_serde_uses_the_numeric_form() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::ProductNotFound).unwrap(),
            "4001"
        );
        let parsed: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(parsed, ErrorCode::MovementNotFound);
        assert!(serde_json::from_str::<ErrorCode>("777").is_err());
    }

    #[test]
    fn test_http_status_by_family() {
        use http::StatusCode;
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::TokenExpired.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::AccountDisabled.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::UnitNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::RoleInUse.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
