//! # Cart
//!
//! The cart collection and its invariant-preserving operations.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Invariants                                 │
//! │                                                                         │
//! │  1. UNIQUE BY ID     at most one line per product id; multiplicity     │
//! │                      goes through the line amount, never through       │
//! │                      duplicate lines                                   │
//! │                                                                         │
//! │  2. POSITIVE AMOUNT  every line amount is >= 1; a line that would      │
//! │                      reach 0 is removed instead                        │
//! │                                                                         │
//! │  3. STOCK BOUND      a mutation never commits a line amount above      │
//! │                      the stock amount observed for that operation      │
//! │                      (best-effort: the remote side may still change    │
//! │                      concurrently)                                     │
//! │                                                                         │
//! │  4. COPY-ON-WRITE    mutations build a new line and a new sequence;    │
//! │                      lines of the previous cart are never mutated in   │
//! │                      place, so a previously handed-out snapshot stays  │
//! │                      valid                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation here is pure: it takes the observed stock amount as a
//! plain integer and returns either a new `Cart` or a [`CartError`]. The
//! lookups, persistence, and notification around these calls live in
//! trolley-store.

use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// A product in the cart together with its in-cart amount.
///
/// ## Serialized Shape
/// The product fields are flattened, so a line persists as one flat JSON
/// object: `{"id": 1, "title": "...", "price": 17990, "image": "...",
/// "amount": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Frozen product descriptor captured when the line was created.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity of this product in the cart. Always >= 1.
    pub amount: i64,
}

impl CartLine {
    /// Creates a line for a product with the given amount.
    fn new(product: Product, amount: i64) -> Self {
        CartLine { product, amount }
    }

    /// The id of the product this line holds.
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Line total (unit price × in-cart amount).
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_amount(self.amount)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered sequence of cart lines, unique by product id.
///
/// Serializes transparently as a JSON array of flattened lines, which is
/// the persisted snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Read-only view of the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Finds the line for a product id, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Checks whether a product id has a line in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    pub fn total_amount(&self) -> i64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Cart subtotal (sum of line totals).
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    // =========================================================================
    // Copy-on-Write Mutations
    // =========================================================================
    //
    // Each of these returns a NEW cart; `self` is never modified. The
    // caller commits the returned cart only after it has been persisted.

    /// Returns a cart with the line for `product_id` incremented by
    /// exactly 1, checked against the observed stock amount.
    ///
    /// ## Errors
    /// - [`CartError::NotInCart`] if no line holds `product_id`
    /// - [`CartError::OutOfStock`] if `available <= current` (one more
    ///   unit would exceed the observed stock)
    pub fn incremented(&self, product_id: ProductId, available: i64) -> CartResult<Cart> {
        let current = self
            .line(product_id)
            .map(|l| l.amount)
            .ok_or(CartError::NotInCart { product_id })?;

        if available <= current {
            return Err(CartError::OutOfStock {
                product_id,
                available,
                requested: current + 1,
            });
        }

        let lines = self
            .lines
            .iter()
            .map(|l| {
                if l.product_id() == product_id {
                    CartLine::new(l.product.clone(), l.amount + 1)
                } else {
                    l.clone()
                }
            })
            .collect();

        Ok(Cart { lines })
    }

    /// Returns a cart with a new line `{product, amount: 1}` appended,
    /// checked against the observed stock amount.
    ///
    /// The caller must have checked that `product.id` is not already in
    /// the cart; appending is the not-in-cart branch of an add.
    ///
    /// ## Errors
    /// - [`CartError::OutOfStock`] if `available <= 0`
    pub fn appended(&self, product: Product, available: i64) -> CartResult<Cart> {
        debug_assert!(
            !self.contains(product.id),
            "appended() requires the product to be absent"
        );

        if available <= 0 {
            return Err(CartError::OutOfStock {
                product_id: product.id,
                available,
                requested: 1,
            });
        }

        let mut lines = self.lines.clone();
        lines.push(CartLine::new(product, 1));
        Ok(Cart { lines })
    }

    /// Returns a cart with the line for `product_id` set to exactly
    /// `amount` (absolute set, not an increment), checked against the
    /// observed stock amount.
    ///
    /// ## Errors
    /// - [`CartError::InvalidAmount`] if `amount <= 0` (removal is the
    ///   only way to reach zero)
    /// - [`CartError::NotInCart`] if no line holds `product_id`
    /// - [`CartError::OutOfStock`] if `available < amount`
    pub fn with_amount(
        &self,
        product_id: ProductId,
        amount: i64,
        available: i64,
    ) -> CartResult<Cart> {
        if amount <= 0 {
            return Err(CartError::InvalidAmount { amount });
        }

        if !self.contains(product_id) {
            return Err(CartError::NotInCart { product_id });
        }

        if available < amount {
            return Err(CartError::OutOfStock {
                product_id,
                available,
                requested: amount,
            });
        }

        let lines = self
            .lines
            .iter()
            .map(|l| {
                if l.product_id() == product_id {
                    CartLine::new(l.product.clone(), amount)
                } else {
                    l.clone()
                }
            })
            .collect();

        Ok(Cart { lines })
    }

    /// Returns a cart with the line for `product_id` filtered out.
    ///
    /// ## Errors
    /// - [`CartError::NotInCart`] if no line holds `product_id`
    pub fn without(&self, product_id: ProductId) -> CartResult<Cart> {
        if !self.contains(product_id) {
            return Err(CartError::NotInCart { product_id });
        }

        let lines = self
            .lines
            .iter()
            .filter(|l| l.product_id() != product_id)
            .cloned()
            .collect();

        Ok(Cart { lines })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: ProductId, price_cents: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            image: format!("https://cdn.example/{}.jpg", id),
        }
    }

    fn cart_with(entries: &[(ProductId, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (id, amount) in entries {
            cart = cart.appended(test_product(*id, 999), i64::MAX).unwrap();
            if *amount > 1 {
                cart = cart.with_amount(*id, *amount, i64::MAX).unwrap();
            }
        }
        cart
    }

    #[test]
    fn test_appended_creates_line_with_amount_one() {
        let cart = Cart::new();
        let next = cart.appended(test_product(1, 999), 5).unwrap();

        assert_eq!(next.len(), 1);
        assert_eq!(next.line(1).unwrap().amount, 1);
        // The original cart is untouched
        assert!(cart.is_empty());
    }

    #[test]
    fn test_appended_rejects_zero_stock() {
        let cart = Cart::new();
        let err = cart.appended(test_product(1, 999), 0).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: 1,
                available: 0,
                requested: 1,
            }
        );
    }

    #[test]
    fn test_incremented_adds_exactly_one() {
        let cart = cart_with(&[(1, 2)]);
        let next = cart.incremented(1, 3).unwrap();

        assert_eq!(next.line(1).unwrap().amount, 3);
        assert_eq!(cart.line(1).unwrap().amount, 2);
    }

    #[test]
    fn test_incremented_rejects_when_stock_equals_current() {
        let cart = cart_with(&[(1, 1)]);
        let err = cart.incremented(1, 1).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: 1,
                available: 1,
                requested: 2,
            }
        );
    }

    #[test]
    fn test_incremented_missing_line() {
        let cart = Cart::new();
        let err = cart.incremented(42, 10).unwrap_err();
        assert_eq!(err, CartError::NotInCart { product_id: 42 });
    }

    #[test]
    fn test_with_amount_absolute_set() {
        let cart = cart_with(&[(1, 1)]);
        let next = cart.with_amount(1, 3, 3).unwrap();
        assert_eq!(next.line(1).unwrap().amount, 3);
    }

    #[test]
    fn test_with_amount_rejects_above_stock() {
        let cart = cart_with(&[(1, 1)]);
        let err = cart.with_amount(1, 4, 3).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: 1,
                available: 3,
                requested: 4,
            }
        );
    }

    #[test]
    fn test_with_amount_rejects_non_positive() {
        let cart = cart_with(&[(1, 1)]);
        assert_eq!(
            cart.with_amount(1, 0, 10).unwrap_err(),
            CartError::InvalidAmount { amount: 0 }
        );
        assert_eq!(
            cart.with_amount(1, -3, 10).unwrap_err(),
            CartError::InvalidAmount { amount: -3 }
        );
    }

    #[test]
    fn test_without_removes_whole_line() {
        let cart = cart_with(&[(1, 2), (2, 1)]);
        let next = cart.without(1).unwrap();

        assert_eq!(next.len(), 1);
        assert!(!next.contains(1));
        assert!(next.contains(2));
    }

    #[test]
    fn test_without_missing_line() {
        let cart = Cart::new();
        let err = cart.without(99).unwrap_err();
        assert_eq!(err, CartError::NotInCart { product_id: 99 });
    }

    #[test]
    fn test_uniqueness_preserved_across_operations() {
        let cart = cart_with(&[(1, 1)]);
        let cart = cart.incremented(1, 10).unwrap();
        let cart = cart.with_amount(1, 5, 10).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.lines()
                .iter()
                .filter(|l| l.product_id() == 1)
                .count(),
            1
        );
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart = cart.appended(test_product(1, 1000), 10).unwrap();
        cart = cart.with_amount(1, 2, 10).unwrap();
        cart = cart.appended(test_product(2, 550), 10).unwrap();

        assert_eq!(cart.total_amount(), 3);
        assert_eq!(cart.subtotal(), Money::from_cents(2550));
    }

    #[test]
    fn test_copy_on_write_does_not_alias_lines() {
        let cart = cart_with(&[(1, 1)]);
        let before = cart.line(1).unwrap().clone();

        let next = cart.incremented(1, 10).unwrap();

        // The previous snapshot still reads the old amount
        assert_eq!(cart.line(1).unwrap(), &before);
        assert_eq!(next.line(1).unwrap().amount, 2);
    }

    #[test]
    fn test_snapshot_shape_round_trip() {
        let cart = cart_with(&[(1, 2)]);
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {
                    "id": 1,
                    "title": "Product 1",
                    "price": 999,
                    "image": "https://cdn.example/1.jpg",
                    "amount": 2,
                }
            ])
        );

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
