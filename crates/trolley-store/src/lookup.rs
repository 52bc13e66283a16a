//! # Stock and Product Lookup
//!
//! The remote-catalog client seam.
//!
//! ## Wire Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Remote Service Endpoints                           │
//! │                                                                         │
//! │  GET {base}/stock/{id}      →  { "id": 3, "amount": 2 }                 │
//! │  GET {base}/products/{id}   →  { "id": 3, "title": "...",               │
//! │                                  "price": 179.9, "image": "..." }       │
//! │                                                                         │
//! │  The service serves prices as DECIMALS. They are converted to           │
//! │  integer cents right here, at the wire boundary, and never leave        │
//! │  this module as floats.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Notes
//! - [`StockLookup`] is an `async_trait` so the store stays generic over
//!   transports and tests can run against an in-memory double.
//! - Stock and product are separate endpoints and separate calls. The
//!   store relies on that split to skip the product fetch when stock is
//!   already known to be zero.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use trolley_core::{Money, Product, ProductId, Stock};

use crate::error::LookupError;

// =============================================================================
// StockLookup Trait
// =============================================================================

/// Read-only access to the remote stock and product catalog.
#[async_trait]
pub trait StockLookup {
    /// Fetches the currently available amount for a product.
    async fn stock(&self, product_id: ProductId) -> Result<Stock, LookupError>;

    /// Fetches the product descriptor.
    async fn product(&self, product_id: ProductId) -> Result<Product, LookupError>;
}

// =============================================================================
// Wire Payloads
// =============================================================================

/// `GET /stock/{id}` response body.
#[derive(Debug, Deserialize)]
struct StockPayload {
    id: ProductId,
    amount: i64,
}

/// `GET /products/{id}` response body.
///
/// `price` arrives as a decimal; see [`ProductPayload::into_product`].
#[derive(Debug, Deserialize)]
struct ProductPayload {
    id: ProductId,
    title: String,
    price: f64,
    image: String,
}

impl ProductPayload {
    /// Converts the decimal wire price into integer cents.
    ///
    /// Rounding happens exactly once, here. 179.9 becomes 17990 even
    /// though the float is not exactly representable.
    fn into_product(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: Money::from_cents((self.price * 100.0).round() as i64),
            image: self.image,
        }
    }
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`StockLookup`] over HTTP against the catalog service.
#[derive(Debug, Clone)]
pub struct HttpStockLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStockLookup {
    /// Creates a lookup against `base_url` (no trailing slash required).
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpStockLookup {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, LookupError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "catalog request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl StockLookup for HttpStockLookup {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, LookupError> {
        let payload: StockPayload = self.get_json(&format!("stock/{product_id}")).await?;
        Ok(Stock {
            product_id: payload.id,
            amount: payload.amount,
        })
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, LookupError> {
        let payload: ProductPayload = self.get_json(&format!("products/{product_id}")).await?;
        Ok(payload.into_product())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
