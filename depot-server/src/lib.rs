//! Depot Server - inventory management backend
//!
//! # Architecture
//!
//! - **Database** (`db`): SQLite via sqlx (WAL), repositories per table
//! - **Stock rules** (`stock`): status derivation and movement validation
//! - **Authentication** (`auth`): JWT + argon2, per-model permissions
//! - **Audit** (`audit`): asynchronous action log with admin purge
//! - **HTTP API** (`api`): RESTful routers per resource
//!
//! # Module structure
//!
//! ```text
//! depot-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, passwords, permissions, middleware
//! ├── stock/         # business rules (pure)
//! ├── audit/         # audit log service
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, migrations, repositories
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod core;
pub mod db;
pub mod stock;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
