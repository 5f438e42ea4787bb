//! Stock rules
//!
//! The business core of the backend: product status derivation and
//! movement validation. Everything here is pure - the transactional
//! commit that applies these rules lives in `db::repository::movement`.

mod rules;
mod status;

pub use rules::{ValidationError, validate_entry, validate_exit};
pub use status::derive_status;
