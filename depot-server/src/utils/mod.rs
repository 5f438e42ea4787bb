//! Utility module
//!
//! - error types re-exported from `shared::error`
//! - logging setup
//! - input validation helpers

pub mod logger;
pub mod validation;

pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
