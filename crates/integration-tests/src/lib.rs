//! Integration tests for the Shoe Shop cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoe-shop-integration-tests
//! ```
//!
//! No external services are needed: the catalog API is served by a
//! `wiremock` server and storage lives in a temp directory.
//!
//! # Test Categories
//!
//! - `cart_store` - Store operations over HTTP and file storage
//! - `catalog_http` - Catalog client status handling and caching

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::path::PathBuf;

use serde_json::json;
use shoe_shop_cart::{
    CartStore, CatalogConfig, DEFAULT_STORAGE_KEY, FileStorage, HttpCatalog, MemoryStorage,
};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock catalog API plus a scratch directory for storage.
pub struct TestContext {
    pub server: MockServer,
    pub dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Catalog settings pointing at the mock server.
    #[must_use]
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(Url::parse(&self.server.uri()).unwrap())
    }

    /// A fresh catalog client for the mock server.
    #[must_use]
    pub fn catalog(&self) -> HttpCatalog {
        HttpCatalog::new(&self.catalog_config()).unwrap()
    }

    /// Path of the storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Open the cart persisted in this context's storage file.
    #[must_use]
    pub fn open_store(&self) -> CartStore<HttpCatalog, FileStorage> {
        CartStore::open(
            self.catalog(),
            FileStorage::new(self.storage_path()),
            DEFAULT_STORAGE_KEY,
        )
        .unwrap()
    }

    /// Open an in-memory cart against the mock catalog.
    #[must_use]
    pub fn open_memory_store(&self) -> CartStore<HttpCatalog, MemoryStorage> {
        CartStore::open(self.catalog(), MemoryStorage::new(), DEFAULT_STORAGE_KEY).unwrap()
    }

    /// Serve `GET /stock/{id}`.
    pub async fn mount_stock(&self, id: i32, amount: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": id, "amount": amount })),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /products/{id}`.
    pub async fn mount_product(&self, id: i32, title: &str, price: f64) {
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "title": title,
                "price": price,
                "image": format!("https://cdn.example.com/tenis{id}.jpg"),
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve both stock and product details.
    pub async fn mount_catalog_entry(&self, id: i32, title: &str, price: f64, stock: u32) {
        self.mount_stock(id, stock).await;
        self.mount_product(id, title, price).await;
    }
}
