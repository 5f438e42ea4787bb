//! Text field validation
//!
//! SQLite never enforces TEXT length, so handlers apply these limits
//! before anything reaches a repository.

use shared::AppError;

/// Names and titles: brand, category, unit, product title, role
pub const MAX_NAME_LEN: usize = 200;

/// Free-form fields: observation, dimension
pub const MAX_NOTE_LEN: usize = 500;

/// Unit symbols ("kg", "un", "cx")
pub const MAX_SYMBOL_LEN: usize = 10;

pub const MAX_USERNAME_LEN: usize = 100;

/// Plaintext password length, checked before hashing
pub const MAX_PASSWORD_LEN: usize = 128;

fn too_long(field: &str, len: usize, max_len: usize) -> AppError {
    AppError::validation(format!("{field} is too long ({len} chars, max {max_len})"))
}

/// A required string: non-blank and within the limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(too_long(field, value.len(), max_len));
    }
    Ok(())
}

/// An optional string: absent is fine, present must fit the limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) if v.len() > max_len => Err(too_long(field, v.len(), max_len)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Ambev", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        // Whitespace-only counts as empty
        assert!(validate_required_text("  \t ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN), "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "observation", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("damaged box".into()), "observation", MAX_NOTE_LEN).is_ok());
        let err = validate_optional_text(&Some("x".repeat(MAX_NOTE_LEN + 1)), "observation", MAX_NOTE_LEN)
            .unwrap_err();
        assert!(err.message.contains("observation is too long"));
    }
}
