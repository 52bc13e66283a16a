//! # Cart Store
//!
//! The per-session cart orchestrator.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operation Flow                             │
//! │                                                                         │
//! │   add_product(id)                                                       │
//! │   ├─ in cart?  ──yes──► stock lookup ──► incremented line               │
//! │   │            └─no───► stock lookup ──► amount <= 0? reject            │
//! │   │                                   └► product fetch ──► new line     │
//! │   │                                                                     │
//! │   update_product_amount{id, amount}                                     │
//! │   ├─ amount <= 0?        silently ignore                                │
//! │   ├─ stock lookup        (always first, even if id is absent)           │
//! │   ├─ id not in cart?     silently ignore                                │
//! │   └─ set absolute amount                                                │
//! │                                                                         │
//! │   remove_product(id)     no lookups; absent id → "removal failed"       │
//! │                                                                         │
//! │   Every accepted mutation: encode ─► write snapshot ─► commit memory.   │
//! │   A failed write aborts the mutation entirely.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Notes
//! - Operations return `()`. Failures surface through the [`Notifier`]
//!   only, and each failed operation produces at most one message.
//! - `&mut self` encodes the single-session model: one cart, one owner,
//!   no concurrent mutations to reason about.

use tracing::{debug, info, warn};
use trolley_core::{Cart, CartError, ProductId};

use crate::error::StoreError;
use crate::lookup::StockLookup;
use crate::notify::{self, Notifier};
use crate::storage::{decode_snapshot, encode_snapshot, PersistedState};

// =============================================================================
// Amount Update
// =============================================================================

/// A request to set a cart line to an absolute amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountUpdate {
    /// Product whose line is targeted.
    pub product_id: ProductId,

    /// Desired absolute in-cart amount.
    pub amount: i64,
}

// =============================================================================
// Operation Kinds
// =============================================================================

/// Which operation failed, for notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Remove,
    AmountChange,
}

impl Op {
    /// The generic failure message for this operation.
    fn failure_message(self) -> &'static str {
        match self {
            Op::Add => notify::ADD_FAILED,
            Op::Remove => notify::REMOVAL_FAILED,
            Op::AmountChange => notify::AMOUNT_CHANGE_FAILED,
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Owns one session's cart and keeps it consistent with storage.
///
/// Generic over its three seams so hosts pick transports and tests plug
/// in doubles. See the crate root for the wiring used in production.
pub struct CartStore<L, P, N> {
    cart: Cart,
    lookup: L,
    storage: P,
    notifier: N,
    storage_key: String,
}

impl<L, P, N> CartStore<L, P, N>
where
    L: StockLookup,
    P: PersistedState,
    N: Notifier,
{
    /// Opens a store, restoring the previous session's cart if a readable
    /// snapshot exists.
    ///
    /// ## Recovery Policy
    /// A missing snapshot starts an empty cart. So does an unreadable or
    /// corrupt one, with a warning; a shopping cart is not worth refusing
    /// to start over.
    pub fn open(lookup: L, storage: P, notifier: N, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let cart = match storage.read(&storage_key) {
            Ok(Some(blob)) => match decode_snapshot(&blob) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(key = %storage_key, error = %e, "discarding unreadable snapshot");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %storage_key, error = %e, "snapshot read failed, starting empty");
                Cart::new()
            }
        };
        info!(key = %storage_key, lines = cart.len(), "cart store opened");

        CartStore {
            cart,
            lookup,
            storage,
            notifier,
            storage_key,
        }
    }

    /// The current cart snapshot.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Public Operations
    // =========================================================================

    /// Adds one unit of a product, creating its line if necessary.
    pub async fn add_product(&mut self, product_id: ProductId) {
        if let Err(e) = self.try_add(product_id).await {
            self.surface(Op::Add, e);
        }
    }

    /// Removes a product's line entirely.
    pub fn remove_product(&mut self, product_id: ProductId) {
        if let Err(e) = self.try_remove(product_id) {
            self.surface(Op::Remove, e);
        }
    }

    /// Sets a line to an absolute amount.
    ///
    /// Requests with `amount <= 0` and requests targeting a product that
    /// is not in the cart are ignored without any signal.
    pub async fn update_product_amount(&mut self, update: AmountUpdate) {
        if let Err(e) = self.try_update(update).await {
            self.surface(Op::AmountChange, e);
        }
    }

    // =========================================================================
    // Internal Fallible Paths
    // =========================================================================

    async fn try_add(&mut self, product_id: ProductId) -> Result<(), StoreError> {
        let stock = self.lookup.stock(product_id).await?;

        let next = if self.cart.contains(product_id) {
            debug!(product_id, "incrementing existing line");
            self.cart.incremented(product_id, stock.amount)?
        } else {
            // Gate on stock before paying for the product fetch.
            if stock.amount <= 0 {
                return Err(CartError::OutOfStock {
                    product_id,
                    available: stock.amount,
                    requested: 1,
                }
                .into());
            }
            let product = self.lookup.product(product_id).await?;
            debug!(product_id, title = %product.title, "appending new line");
            self.cart.appended(product, stock.amount)?
        };

        self.commit(next)
    }

    fn try_remove(&mut self, product_id: ProductId) -> Result<(), StoreError> {
        debug!(product_id, "removing line");
        let next = self.cart.without(product_id)?;
        self.commit(next)
    }

    async fn try_update(&mut self, update: AmountUpdate) -> Result<(), StoreError> {
        if update.amount <= 0 {
            debug!(
                product_id = update.product_id,
                amount = update.amount,
                "ignoring non-positive amount request"
            );
            return Ok(());
        }

        // Stock is fetched before the presence check; the observed amount
        // must be from this operation, not a stale earlier one.
        let stock = self.lookup.stock(update.product_id).await?;

        if !self.cart.contains(update.product_id) {
            debug!(
                product_id = update.product_id,
                "ignoring amount request for absent product"
            );
            return Ok(());
        }

        let next = self
            .cart
            .with_amount(update.product_id, update.amount, stock.amount)?;
        self.commit(next)
    }

    // =========================================================================
    // Commit and Surfacing
    // =========================================================================

    /// Persists `next` and only then makes it the live cart.
    fn commit(&mut self, next: Cart) -> Result<(), StoreError> {
        let blob = encode_snapshot(&next)?;
        self.storage.write(&self.storage_key, &blob)?;
        self.cart = next;
        Ok(())
    }

    /// Maps a failure to its single user-facing message.
    fn surface(&self, op: Op, error: StoreError) {
        warn!(?op, error = %error, "cart operation rejected");
        let message = match error {
            StoreError::Cart(CartError::OutOfStock { .. }) => notify::OUT_OF_STOCK,
            _ => op.failure_message(),
        };
        self.notifier.error(message);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
