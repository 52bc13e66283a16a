//! # Store Configuration
//!
//! Where the store finds the remote service and the snapshot key.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │   1. Environment variables     TROLLEY_SERVICE_URL                      │
//! │      (highest priority)        TROLLEY_STORAGE_KEY                      │
//! │                                                                         │
//! │   2. Config file               {config_dir}/trolley/trolley.toml        │
//! │                                                                         │
//! │   3. Built-in defaults         http://localhost:3333                    │
//! │      (lowest priority)         trolley:cart                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing config file is normal and silently skipped; a present but
//! unparsable one is reported, because it means the user tried to
//! configure something and failed.

use std::env;
use std::fs;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, warn};

// =============================================================================
// Defaults
// =============================================================================

/// Default catalog service (a local json-server style instance).
const DEFAULT_SERVICE_URL: &str = "http://localhost:3333";

/// Default snapshot storage key.
const DEFAULT_STORAGE_KEY: &str = "trolley:cart";

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

// =============================================================================
// StoreConfig
// =============================================================================

/// Runtime configuration for a [`CartStore`](crate::CartStore) host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the stock/product catalog service.
    pub service_url: String,

    /// Key the cart snapshot is persisted under.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            service_url: default_service_url(),
            storage_key: default_storage_key(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from all sources in priority order.
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env();
        debug!(
            service_url = %config.service_url,
            storage_key = %config.storage_key,
            "configuration resolved"
        );
        config
    }

    /// Parses the platform config file, if one exists.
    fn from_file() -> Option<Self> {
        let dirs = ProjectDirs::from("com", "trolley", "trolley")?;
        let path = dirs.config_dir().join("trolley.toml");
        let raw = fs::read_to_string(&path).ok()?;
        match toml::from_str(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
                None
            }
        }
    }

    /// Applies environment variable overrides in place.
    fn apply_env(&mut self) {
        if let Ok(url) = env::var("TROLLEY_SERVICE_URL") {
            if !url.is_empty() {
                self.service_url = url;
            }
        }
        if let Ok(key) = env::var("TROLLEY_STORAGE_KEY") {
            if !key.is_empty() {
                self.storage_key = key;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.service_url, "http://localhost:3333");
        assert_eq!(config.storage_key, "trolley:cart");
    }

    #[test]
    fn test_toml_partial_override_keeps_defaults() {
        let config: StoreConfig = toml::from_str(r#"service_url = "http://shop.internal:8080""#)
            .expect("valid config");
        assert_eq!(config.service_url, "http://shop.internal:8080");
        assert_eq!(config.storage_key, "trolley:cart");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StoreConfig::default();
        env::set_var("TROLLEY_SERVICE_URL", "http://example.test");
        config.apply_env();
        env::remove_var("TROLLEY_SERVICE_URL");
        assert_eq!(config.service_url, "http://example.test");
        assert_eq!(config.storage_key, "trolley:cart");
    }
}
