//! Unified error system
//!
//! [`ErrorCode`] is the numeric contract (ranged by domain - see
//! `codes.rs`), [`AppError`] is what handlers and repositories return,
//! [`ApiResponse`] is the wire envelope, and [`ErrorCategory`] classifies
//! codes by their range.
//!
//! ```
//! use shared::error::{AppError, ApiResponse, ErrorCode};
//!
//! let err = AppError::validation("exit quantity must be greater than 0");
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(ErrorCode::ValidationFailed.code()));
//! assert_eq!(body.message, "exit quantity must be greater than 0");
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
