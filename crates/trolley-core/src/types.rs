//! # Domain Types
//!
//! Core domain types shared by the cart logic and the store layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Stock       │   │    CartLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  product        │       │
//! │  │  title          │   │  amount         │   │  amount         │       │
//! │  │  price (cents)  │   │  (remote view)  │   │  (in cart)      │       │
//! │  │  image          │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘        (cart.rs)                                  │
//! │                                                                         │
//! │  Stock.amount and CartLine.amount are DIFFERENT quantities:             │
//! │  stock is what the remote source has available, the line amount is      │
//! │  what this session has selected.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Product identifier as issued by the remote catalog.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// An immutable product descriptor.
///
/// Once a product is added to the cart, the descriptor is owned by the
/// cart line and is never mutated; quantity changes go through the line's
/// `amount`, not through this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier from the remote catalog.
    pub id: ProductId,

    /// Display name shown to the user.
    pub title: String,

    /// Unit price in cents.
    pub price: Money,

    /// Image URL for display.
    pub image: String,
}

// =============================================================================
// Stock
// =============================================================================

/// Available quantity for a product at the remote source.
///
/// A read-only snapshot fetched on demand. It is never persisted and may
/// be stale by the time a mutation commits; the stock bound is a
/// best-effort check, not a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product this snapshot refers to.
    pub product_id: ProductId,

    /// Units available at the remote source.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serde_shape() {
        let product = Product {
            id: 1,
            title: "Sneaker".to_string(),
            price: Money::from_cents(17990),
            image: "https://cdn.example/sneaker.jpg".to_string(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Sneaker",
                "price": 17990,
                "image": "https://cdn.example/sneaker.jpg",
            })
        );
    }
}
