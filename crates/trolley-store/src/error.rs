//! # Error Types
//!
//! Error types for the I/O layer.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  StoreError (aggregate)                                                 │
//! │  ├── Cart(CartError)        - invariant rejections from trolley-core   │
//! │  ├── Lookup(LookupError)    - stock/product fetch failures             │
//! │  └── Storage(StorageError)  - snapshot read/write failures             │
//! │                                                                         │
//! │  Flow: any of these → CartStore::surface() → Notifier message.         │
//! │  StoreError never crosses the CartStore public API.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. `#[from]` conversions so `?` composes the layers
//! 3. Transport details are kept as display strings; the store only ever
//!    branches on the variant, never on the payload

use thiserror::Error;
use trolley_core::CartError;

// =============================================================================
// Lookup Error
// =============================================================================

/// Failure while fetching stock or product data from the remote service.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request never produced a usable response (connection refused,
    /// timeout, DNS failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    ///
    /// ## When This Occurs
    /// - Unknown product id (404 from the catalog)
    /// - Service-side errors (5xx)
    #[error("unexpected status code {status}")]
    Status { status: u16 },

    /// The response body could not be decoded into the expected payload.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Storage Error
// =============================================================================

/// Failure while reading or writing the persisted cart snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The snapshot blob could not be read.
    #[error("snapshot read failed: {0}")]
    Read(String),

    /// The snapshot blob could not be written.
    #[error("snapshot write failed: {0}")]
    Write(String),

    /// The cart could not be serialized into a snapshot blob.
    #[error("snapshot encode failed: {0}")]
    Encode(String),

    /// A stored blob exists but is not a valid cart snapshot.
    ///
    /// ## When This Occurs
    /// - Truncated file from an interrupted write by another program
    /// - A different application's data under the same storage key
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

// =============================================================================
// Store Error
// =============================================================================

/// Aggregate error for cart store operations.
///
/// Internal only: every operation catches this at the dispatch point and
/// converts it into a notification (or silence). Callers of the store
/// never see it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Cart invariant violation from the pure layer.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Remote stock/product lookup failure.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Snapshot persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LookupError::Status { status: 404 };
        assert_eq!(err.to_string(), "unexpected status code 404");

        let err = StorageError::Corrupt("expected an array".to_string());
        assert_eq!(err.to_string(), "corrupt snapshot: expected an array");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: StoreError = CartError::NotInCart { product_id: 4 }.into();
        assert_eq!(err.to_string(), "product 4 is not in the cart");

        let err: StoreError = LookupError::Transport("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
