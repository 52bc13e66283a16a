//! # In-Memory Test Doubles
//!
//! Mock implementations of the store's trait seams.
//!
//! ## What Lives Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Test Doubles                                     │
//! │                                                                         │
//! │  MockStockLookup     - scripted stock/product answers + call counters  │
//! │  MemoryStore         - HashMap-backed PersistedState, failable writes  │
//! │  CollectingNotifier  - records every message for assertion             │
//! │                                                                         │
//! │  All three are Clone and share state through Arc<Mutex<..>> so a test  │
//! │  can keep a handle while the CartStore owns the other.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Compiled for our own tests and exported under the `mock` feature for
//! downstream hosts that drive a [`CartStore`](crate::CartStore) in theirs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use trolley_core::{Product, ProductId, Stock};

use crate::error::{LookupError, StorageError};
use crate::lookup::StockLookup;
use crate::notify::Notifier;
use crate::storage::PersistedState;

// =============================================================================
// Mock Stock Lookup
// =============================================================================

#[derive(Debug, Default)]
struct LookupInner {
    stock: HashMap<ProductId, i64>,
    products: HashMap<ProductId, Product>,
    fail_stock: bool,
    fail_product: bool,
    stock_calls: u32,
    product_calls: u32,
}

/// Scripted [`StockLookup`] with call counters.
///
/// Unknown ids answer like the real catalog does for a missing resource:
/// status 404.
#[derive(Debug, Clone, Default)]
pub struct MockStockLookup {
    inner: Arc<Mutex<LookupInner>>,
}

impl MockStockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the available amount for a product.
    pub fn set_stock(&self, product_id: ProductId, amount: i64) {
        let mut inner = self.inner.lock().expect("lookup mock lock poisoned");
        inner.stock.insert(product_id, amount);
    }

    /// Scripts the product descriptor.
    pub fn set_product(&self, product: Product) {
        let mut inner = self.inner.lock().expect("lookup mock lock poisoned");
        inner.products.insert(product.id, product);
    }

    /// Makes every subsequent stock fetch fail with a transport error.
    pub fn fail_stock(&self) {
        let mut inner = self.inner.lock().expect("lookup mock lock poisoned");
        inner.fail_stock = true;
    }

    /// Makes every subsequent product fetch fail with a transport error.
    pub fn fail_product(&self) {
        let mut inner = self.inner.lock().expect("lookup mock lock poisoned");
        inner.fail_product = true;
    }

    /// Number of stock fetches observed so far.
    pub fn stock_calls(&self) -> u32 {
        self.inner.lock().expect("lookup mock lock poisoned").stock_calls
    }

    /// Number of product fetches observed so far.
    pub fn product_calls(&self) -> u32 {
        self.inner.lock().expect("lookup mock lock poisoned").product_calls
    }
}

#[async_trait]
impl StockLookup for MockStockLookup {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, LookupError> {
        let mut inner = self.inner.lock().expect("lookup mock lock poisoned");
        inner.stock_calls += 1;
        if inner.fail_stock {
            return Err(LookupError::Transport("scripted failure".to_string()));
        }
        match inner.stock.get(&product_id) {
            Some(&amount) => Ok(Stock { product_id, amount }),
            None => Err(LookupError::Status { status: 404 }),
        }
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, LookupError> {
        let mut inner = self.inner.lock().expect("lookup mock lock poisoned");
        inner.product_calls += 1;
        if inner.fail_product {
            return Err(LookupError::Transport("scripted failure".to_string()));
        }
        inner
            .products
            .get(&product_id)
            .cloned()
            .ok_or(LookupError::Status { status: 404 })
    }
}

// =============================================================================
// Memory Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreInner {
    entries: HashMap<String, Vec<u8>>,
    fail_writes: bool,
    writes: u32,
}

/// HashMap-backed [`PersistedState`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loads a blob, as if a previous session had written it.
    pub fn seed(&self, key: &str, blob: &[u8]) {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        inner.entries.insert(key.to_string(), blob.to_vec());
    }

    /// Makes every subsequent write fail.
    pub fn fail_writes(&self) {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        inner.fail_writes = true;
    }

    /// Returns the blob currently stored under `key`.
    pub fn snapshot(&self, key: &str) -> Option<Vec<u8>> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        inner.entries.get(key).cloned()
    }

    /// Number of successful writes observed so far.
    pub fn write_count(&self) -> u32 {
        self.inner.lock().expect("memory store lock poisoned").writes
    }
}

impl PersistedState for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(inner.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        if inner.fail_writes {
            return Err(StorageError::Write("scripted failure".to_string()));
        }
        inner.entries.insert(key.to_string(), blob.to_vec());
        inner.writes += 1;
        Ok(())
    }
}

// =============================================================================
// Collecting Notifier
// =============================================================================

/// [`Notifier`] that records every message it receives.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .clone()
    }
}

impl Notifier for CollectingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .push(message.to_string());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_core::Money;

    #[tokio::test]
    async fn test_mock_lookup_scripts_and_counts() {
        let lookup = MockStockLookup::new();
        lookup.set_stock(3, 2);
        lookup.set_product(Product {
            id: 3,
            title: "Sneaker".to_string(),
            price: Money::from_cents(17990),
            image: "https://cdn.example/sneaker.jpg".to_string(),
        });

        let stock = lookup.stock(3).await.unwrap();
        assert_eq!(stock.amount, 2);
        let product = lookup.product(3).await.unwrap();
        assert_eq!(product.title, "Sneaker");
        assert_eq!(lookup.stock_calls(), 1);
        assert_eq!(lookup.product_calls(), 1);

        let err = lookup.stock(99).await.unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 404 }));
        assert_eq!(lookup.stock_calls(), 2);
    }

    #[test]
    fn test_memory_store_failable_writes() {
        let mut store = MemoryStore::new();
        store.write("k", b"one").unwrap();
        assert_eq!(store.snapshot("k").unwrap(), b"one");
        assert_eq!(store.write_count(), 1);

        store.fail_writes();
        assert!(store.write("k", b"two").is_err());
        assert_eq!(store.snapshot("k").unwrap(), b"one");
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_collecting_notifier_orders_messages() {
        let notifier = CollectingNotifier::new();
        notifier.error("first");
        notifier.error("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }
}
