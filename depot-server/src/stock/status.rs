//! Product status derivation

use shared::models::ProductStatus;

/// Recompute a product's status from its stock.
///
/// Applied by every product-persisting operation, with `previous` being the
/// status on the instance at save time (a manually requested status counts
/// as "previous" here):
///
/// - stock <= 0 forces `out_of_stock`, whatever was set before
/// - a product that was `out_of_stock` recovers to `in_stock` once stock
///   is positive again
/// - otherwise the status is left alone, so a manually parked
///   `temporarily_unavailable` product stays parked while stock is positive
pub fn derive_status(previous: ProductStatus, stock: i64) -> ProductStatus {
    if stock <= 0 {
        ProductStatus::OutOfStock
    } else if previous == ProductStatus::OutOfStock {
        ProductStatus::InStock
    } else {
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProductStatus::*;

    #[test]
    fn test_zero_stock_forces_out_of_stock() {
        assert_eq!(derive_status(InStock, 0), OutOfStock);
        assert_eq!(derive_status(TemporarilyUnavailable, 0), OutOfStock);
        assert_eq!(derive_status(OutOfStock, 0), OutOfStock);
    }

    #[test]
    fn test_negative_stock_forces_out_of_stock() {
        assert_eq!(derive_status(InStock, -3), OutOfStock);
        assert_eq!(derive_status(TemporarilyUnavailable, -1), OutOfStock);
    }

    #[test]
    fn test_recovery_from_out_of_stock() {
        assert_eq!(derive_status(OutOfStock, 1), InStock);
        assert_eq!(derive_status(OutOfStock, 500), InStock);
    }

    #[test]
    fn test_positive_stock_preserves_status() {
        assert_eq!(derive_status(InStock, 10), InStock);
        assert_eq!(
            derive_status(TemporarilyUnavailable, 10),
            TemporarilyUnavailable
        );
    }
}
