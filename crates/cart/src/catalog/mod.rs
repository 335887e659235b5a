//! Catalog API access: stock lookups and product details.
//!
//! # Architecture
//!
//! - [`Catalog`] is the seam the cart store depends on
//! - [`HttpCatalog`] talks to the REST API with `reqwest`
//! - Product details are cached via `moka`; stock is always fetched fresh
//!
//! # Endpoints
//!
//! - `GET /stock/{id}` - `{ "amount": 3 }`
//! - `GET /products/{id}` - `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`

mod http;

use std::future::Future;

pub use http::HttpCatalog;
use shoe_shop_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },
}

/// Read-only source of stock levels and product details.
pub trait Catalog: Send + Sync {
    /// Current maximum purchasable quantity for a product.
    fn stock(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Stock, CatalogError>> + Send;

    /// Full product details.
    fn product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

impl<T: Catalog + ?Sized> Catalog for std::sync::Arc<T> {
    fn stock(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Stock, CatalogError>> + Send {
        (**self).stock(product_id)
    }

    fn product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send {
        (**self).product(product_id)
    }
}
