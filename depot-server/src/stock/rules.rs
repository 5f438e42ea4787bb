//! Movement validation rules
//!
//! The checks run before a movement is committed. Messages are user-visible
//! and surfaced verbatim by the API, so their wording is part of the
//! contract.

use shared::models::{Product, ProductStatus};
use thiserror::Error;

/// The single error kind raised when a movement violates a business rule.
///
/// Carries a human-readable message; the whole movement-creation operation
/// aborts with nothing persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Validate a stock-increasing movement against the product state.
pub fn validate_entry(product: &Product, quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::new(
            "entry quantity must be greater than 0",
        ));
    }
    if !product.is_active {
        return Err(ValidationError::new(
            "cannot add entries for inactive products",
        ));
    }
    Ok(())
}

/// Validate a stock-decreasing movement against the product state.
///
/// `quantity == product.stock` is permitted and drains the product to
/// exactly zero.
pub fn validate_exit(product: &Product, quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::new("exit quantity must be greater than 0"));
    }
    if product.status == ProductStatus::TemporarilyUnavailable {
        return Err(ValidationError::new("cannot withdraw unavailable products"));
    }
    if !product.is_active {
        return Err(ValidationError::new("cannot withdraw inactive products"));
    }
    if quantity > product.stock {
        return Err(ValidationError::new(format!(
            "cannot withdraw more than available stock ({})",
            product.stock
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, status: ProductStatus, is_active: bool) -> Product {
        Product {
            id: 1,
            title: "Test product".to_string(),
            brand: None,
            category: 1,
            price: 9.90,
            is_active,
            dimension: None,
            stock,
            unit_of_measurement: 1,
            observation: None,
            status,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_entry_rejects_non_positive_quantity() {
        let p = product(10, ProductStatus::InStock, true);
        let err = validate_entry(&p, 0).unwrap_err();
        assert_eq!(err.to_string(), "entry quantity must be greater than 0");
        let err = validate_entry(&p, -5).unwrap_err();
        assert_eq!(err.to_string(), "entry quantity must be greater than 0");
    }

    #[test]
    fn test_entry_rejects_inactive_product() {
        let p = product(10, ProductStatus::InStock, false);
        let err = validate_entry(&p, 5).unwrap_err();
        assert_eq!(err.to_string(), "cannot add entries for inactive products");
    }

    #[test]
    fn test_entry_accepts_out_of_stock_product() {
        // Replenishing an empty product is the normal recovery path
        let p = product(0, ProductStatus::OutOfStock, true);
        assert!(validate_entry(&p, 5).is_ok());
    }

    #[test]
    fn test_exit_rejects_non_positive_quantity() {
        let p = product(10, ProductStatus::InStock, true);
        let err = validate_exit(&p, 0).unwrap_err();
        assert_eq!(err.to_string(), "exit quantity must be greater than 0");
    }

    #[test]
    fn test_exit_rejects_unavailable_product() {
        // Rejected regardless of how much stock there is
        let p = product(100, ProductStatus::TemporarilyUnavailable, true);
        let err = validate_exit(&p, 1).unwrap_err();
        assert_eq!(err.to_string(), "cannot withdraw unavailable products");
    }

    #[test]
    fn test_exit_rejects_inactive_product() {
        let p = product(10, ProductStatus::InStock, false);
        let err = validate_exit(&p, 1).unwrap_err();
        assert_eq!(err.to_string(), "cannot withdraw inactive products");
    }

    #[test]
    fn test_exit_rejects_over_withdrawal_with_stock_value() {
        let p = product(7, ProductStatus::InStock, true);
        let err = validate_exit(&p, 8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot withdraw more than available stock (7)"
        );
    }

    #[test]
    fn test_exit_permits_draining_to_zero() {
        let p = product(10, ProductStatus::InStock, true);
        assert!(validate_exit(&p, 10).is_ok());
    }

    #[test]
    fn test_unavailable_check_precedes_stock_check() {
        // An unavailable product reports unavailability, not insufficiency
        let p = product(0, ProductStatus::TemporarilyUnavailable, true);
        let err = validate_exit(&p, 5).unwrap_err();
        assert_eq!(err.to_string(), "cannot withdraw unavailable products");
    }
}
