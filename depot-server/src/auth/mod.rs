//! Authentication and authorization
//!
//! JWT tokens, argon2 password hashing, the permission table and the
//! request middleware.

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_permission};
