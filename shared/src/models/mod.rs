//! Data models
//!
//! Shared between the server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps Unix millis.

pub mod brand;
pub mod category;
pub mod movement;
pub mod product;
pub mod role;
pub mod unit;
pub mod user;

// Re-exports
pub use brand::*;
pub use category::*;
pub use movement::*;
pub use product::*;
pub use role::*;
pub use unit::*;
pub use user::*;
