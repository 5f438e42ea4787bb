//! API routing
//!
//! One module per resource, each exposing a `router()` that the top-level
//! [`router`] merges. Authentication applies to everything under `/api`
//! except login and health.
//!
//! - [`health`] - liveness check
//! - [`auth`] - login / me / logout
//! - [`brands`], [`categories`], [`units`] - catalog CRUD
//! - [`products`] - product CRUD (status always derived)
//! - [`movements`] - stock entries and exits
//! - [`users`], [`roles`] - account administration
//! - [`audit_log`] - audit queries and the administrative purge

pub mod audit_log;
pub mod auth;
pub mod brands;
pub mod categories;
pub mod health;
pub mod movements;
pub mod products;
pub mod roles;
pub mod units;
pub mod users;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Build the complete application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(brands::router())
        .merge(categories::router())
        .merge(units::router())
        .merge(products::router())
        .merge(movements::router())
        .merge(users::router())
        .merge(roles::router())
        .merge(audit_log::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
