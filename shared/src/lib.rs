//! Shared types for the Depot inventory backend.
//!
//! Everything the server and its API consumers agree on lives here:
//!
//! - [`error`] - unified error codes, [`AppError`] and [`ApiResponse`]
//! - [`models`] - entity and payload types (db row derives behind the `db` feature)
//! - [`client`] - authentication DTOs
//! - [`util`] - timestamp and ID helpers

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-export the common error types at the crate root
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
