//! # Notifier
//!
//! The user-facing failure channel.
//!
//! ## The Silent-Failure Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Failure Surfacing                                 │
//! │                                                                         │
//! │   CartStore operation ──► Ok        ──► commit, say nothing             │
//! │                      └──► Err(e)    ──► leave cart untouched,           │
//! │                                         notifier.error(message)         │
//! │                                                                         │
//! │   Operations NEVER return errors to the caller. The notifier is the     │
//! │   only failure signal a host observes.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Catalog
//! The store emits exactly four messages. Hosts that want localized or
//! styled output match on these constants.

use tracing::warn;

// =============================================================================
// Message Catalog
// =============================================================================

/// The requested in-cart amount exceeds the observed stock.
pub const OUT_OF_STOCK: &str = "requested quantity out of stock";

/// Adding a product failed for a reason other than stock.
pub const ADD_FAILED: &str = "add failed";

/// Removing a product failed.
pub const REMOVAL_FAILED: &str = "removal failed";

/// Changing a line amount failed for a reason other than stock.
pub const AMOUNT_CHANGE_FAILED: &str = "quantity-change failed";

// =============================================================================
// Notifier Trait
// =============================================================================

/// Receives user-facing failure messages from the store.
///
/// Implementations decide presentation: a desktop host might raise a
/// toast, a CLI prints to stderr. The store guarantees at most one call
/// per failed operation and none for successful or silently-ignored ones.
pub trait Notifier {
    /// Reports a failed operation to the user.
    fn error(&self, message: &str);
}

// =============================================================================
// Tracing Notifier
// =============================================================================

/// A [`Notifier`] that forwards messages to the `tracing` pipeline.
///
/// Useful for headless hosts and as a default while wiring up a real UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(target: "trolley::notify", notification = message, "cart operation failed");
    }
}
