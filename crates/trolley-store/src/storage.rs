//! # Snapshot Storage
//!
//! Persists the cart between sessions.
//!
//! ## Snapshot Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Snapshot Lifecycle                                 │
//! │                                                                         │
//! │   open()                       every committed mutation                 │
//! │   ───────                      ────────────────────────                 │
//! │   read(key) ─► Some(blob)      encode(cart) ─► blob                     │
//! │              │    │            write(key, blob)                         │
//! │              │    ▼                 │                                   │
//! │              │  decode ─► Cart      ▼ only on Ok                        │
//! │              │    │ corrupt?    commit in-memory cart                   │
//! │              ▼    ▼                                                     │
//! │            empty cart          Write failures abort the whole           │
//! │                                mutation: memory and disk never          │
//! │                                diverge.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Notes
//! - The blob format is the cart's JSON form: a flat array of lines. No
//!   envelope, no version field; an unreadable blob is treated as absent.
//! - [`PersistedState`] is synchronous. Snapshots are small and local;
//!   async storage backends can buffer internally if they need to.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use directories::ProjectDirs;
use trolley_core::Cart;

use crate::error::StorageError;

// =============================================================================
// Snapshot Codec
// =============================================================================

/// Serializes a cart into its snapshot blob.
pub fn encode_snapshot(cart: &Cart) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(cart).map_err(|e| StorageError::Encode(e.to_string()))
}

/// Deserializes a snapshot blob back into a cart.
pub fn decode_snapshot(blob: &[u8]) -> Result<Cart, StorageError> {
    serde_json::from_slice(blob).map_err(|e| StorageError::Corrupt(e.to_string()))
}

// =============================================================================
// PersistedState Trait
// =============================================================================

/// Key-value blob storage for cart snapshots.
///
/// One snapshot per storage key; the key namespaces carts so several
/// stores (or several applications) can share a backend.
pub trait PersistedState {
    /// Returns the blob stored under `key`, or `None` if nothing has been
    /// written there yet.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `blob` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError>;
}

// =============================================================================
// File Store
// =============================================================================

/// A [`PersistedState`] backed by one JSON file per key.
///
/// Keys are sanitized into file names (`trolley:cart` → `trolley_cart.json`)
/// so they stay portable across filesystems.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on the
    /// first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Creates a store in the platform data directory
    /// (e.g. `~/.local/share/trolley` on Linux).
    pub fn at_default_location() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("com", "trolley", "trolley")
            .ok_or_else(|| StorageError::Read("no home directory available".to_string()))?;
        Ok(FileStore::new(dirs.data_dir()))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl PersistedState for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(e.to_string())),
        }
    }

    fn write(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::write(self.path_for(key), blob).map_err(|e| StorageError::Write(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_core::{Money, Product};

    fn sample_cart() -> Cart {
        Cart::new()
            .appended(
                Product {
                    id: 1,
                    title: "Sneaker".to_string(),
                    price: Money::from_cents(17990),
                    image: "https://cdn.example/sneaker.jpg".to_string(),
                },
                5,
            )
            .unwrap()
    }

    #[test]
    fn test_snapshot_round_trip() {
        let cart = sample_cart();
        let blob = encode_snapshot(&cart).unwrap();
        let back = decode_snapshot(&blob).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_snapshot(b"{not json").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_file_store_read_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        assert!(store.read("trolley:cart").unwrap().is_none());
    }

    #[test]
    fn test_file_store_write_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested"));

        store.write("trolley:cart", b"[]").unwrap();
        assert_eq!(store.read("trolley:cart").unwrap().unwrap(), b"[]");

        // Key sanitization is stable: same key, same file.
        store.write("trolley:cart", b"[1]").unwrap();
        assert_eq!(store.read("trolley:cart").unwrap().unwrap(), b"[1]");
    }

    #[test]
    fn test_keys_are_sanitized_to_file_names() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        assert_eq!(
            store.path_for("trolley:cart"),
            tmp.path().join("trolley_cart.json")
        );
    }

    #[test]
    fn test_line_shape_survives_codec() {
        let cart = sample_cart();
        let blob = encode_snapshot(&cart).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["amount"], 1);
        assert_eq!(json[0]["price"], 17990);
    }
}
