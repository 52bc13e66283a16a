//! # Error Types
//!
//! Domain-specific error types for trolley-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trolley-core errors (this file)                                       │
//! │  └── CartError        - Cart invariant violations                      │
//! │                                                                         │
//! │  trolley-store errors (separate crate)                                 │
//! │  ├── LookupError      - Stock/product fetch failures                   │
//! │  ├── StorageError     - Snapshot read/write failures                   │
//! │  └── StoreError       - Aggregate of all of the above                  │
//! │                                                                         │
//! │  Flow: CartError → StoreError → Notifier message (never the caller)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Errors are enum variants, never String
//! 4. The store maps each variant to a user-facing notification (or to
//!    silence, for the no-signal paths)

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart invariant violations.
///
/// These are the recoverable rejection reasons for cart mutations. None
/// of them is fatal to the store; every path leaves the cart in a valid,
/// previously-established state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested in-cart amount exceeds the stock amount observed
    /// during this operation.
    ///
    /// ## When This Occurs
    /// - Incrementing a line past the available stock
    /// - Adding a product whose stock is zero
    /// - Setting an absolute amount above the available stock
    #[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The targeted product has no line in the cart.
    #[error("product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },

    /// A non-positive amount was requested for a line.
    ///
    /// Lines with amount <= 0 must never exist; removal is the only way
    /// to reach zero.
    #[error("invalid line amount: {amount}")]
    InvalidAmount { amount: i64 },
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::OutOfStock {
            product_id: 7,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product 7: available 3, requested 5"
        );

        let err = CartError::NotInCart { product_id: 9 };
        assert_eq!(err.to_string(), "product 9 is not in the cart");

        let err = CartError::InvalidAmount { amount: -2 };
        assert_eq!(err.to_string(), "invalid line amount: -2");
    }
}
