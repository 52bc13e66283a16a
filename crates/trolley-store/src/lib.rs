//! # trolley-store: I/O Layer for Trolley
//!
//! This crate connects the pure cart logic in `trolley-core` to the
//! outside world: the remote stock/product service, persisted snapshots,
//! and the user-facing notifier.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trolley Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Host application                            │   │
//! │  │    owns one CartStore per session, renders cart() snapshots     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ trolley-store (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │  lookup   │  │  storage  │  │  notify   │  │   │
//! │  │   │ CartStore │  │HttpStock- │  │ FileStore │  │ Tracing-  │  │   │
//! │  │   │AmountUpd. │  │  Lookup   │  │ snapshots │  │ Notifier  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │  config   │  │   error   │     mock (feature-gated doubles)│   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                trolley-core (pure cart logic)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The CartStore session orchestrator
//! - [`lookup`] - StockLookup trait and the HTTP implementation
//! - [`storage`] - PersistedState trait, snapshot codec, FileStore
//! - [`notify`] - Notifier trait, message catalog, TracingNotifier
//! - [`config`] - StoreConfig resolution (env > file > defaults)
//! - [`error`] - I/O-layer error types
//! - [`mock`] - In-memory doubles (tests and the `mock` feature)
//!
//! ## Quick Start
//! ```no_run
//! use trolley_store::{
//!     CartStore, FileStore, HttpStockLookup, StoreConfig, TracingNotifier,
//! };
//!
//! # async fn run() -> Result<(), trolley_store::StorageError> {
//! let config = StoreConfig::load();
//! let mut store = CartStore::open(
//!     HttpStockLookup::new(&config.service_url),
//!     FileStore::at_default_location()?,
//!     TracingNotifier,
//!     &config.storage_key,
//! );
//!
//! store.add_product(3).await;
//! println!("{} line(s) in cart", store.cart().len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod lookup;
pub mod notify;
pub mod storage;
pub mod store;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::StoreConfig;
pub use error::{LookupError, StorageError, StoreError};
pub use lookup::{HttpStockLookup, StockLookup};
pub use notify::{Notifier, TracingNotifier};
pub use storage::{FileStore, PersistedState};
pub use store::{AmountUpdate, CartStore};
