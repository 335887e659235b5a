//! Test doubles shared by the unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::io;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rust_decimal::Decimal;
use shoe_shop_core::{LineItem, Product, ProductId, Stock};
use url::Url;

use crate::catalog::{Catalog, CatalogError};
use crate::config::DEFAULT_STORAGE_KEY;
use crate::storage::{CartStorage, StorageError};

const TITLES: [&str; 3] = [
    "Tênis de Caminhada Leve Confortável",
    "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
    "Tênis Adidas Duramo Lite 2.0",
];

/// Product fixture with a deterministic title, price and image.
pub fn product(id: i32) -> Product {
    let index = usize::try_from(id.unsigned_abs()).unwrap() % TITLES.len();
    Product {
        id: ProductId::new(id),
        title: TITLES.get(index).copied().unwrap().to_string(),
        price: Decimal::from_str("179.9").unwrap() + Decimal::from(id),
        image: Url::parse(&format!("https://cdn.example.com/tenis{id}.jpg")).unwrap(),
    }
}

/// Line item fixture for product `id` with the given amount.
pub fn line_item(id: i32, amount: u32) -> LineItem {
    LineItem::from(product(id)).with_amount(amount)
}

/// In-memory catalog with call counters and a failure switch.
///
/// Each lookup yields to the runtime once so concurrent callers interleave.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    stock: Mutex<HashMap<ProductId, u32>>,
    products: HashMap<ProductId, Product>,
    failing: AtomicBool,
    stock_calls: AtomicUsize,
    product_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with the given stock.
    pub fn with_stock(mut self, id: i32, amount: u32) -> Self {
        self.products.insert(ProductId::new(id), product(id));
        self.with_stock_only(id, amount)
    }

    /// Register stock without product details.
    pub fn with_stock_only(self, id: i32, amount: u32) -> Self {
        self.set_stock(id, amount);
        self
    }

    pub fn set_stock(&self, id: i32, amount: u32) {
        self.stock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(ProductId::new(id), amount);
    }

    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn product_title(&self, id: i32) -> String {
        self.products
            .get(&ProductId::new(id))
            .map(|p| p.title.clone())
            .unwrap_or_default()
    }

    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Catalog for FakeCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_failing()?;

        let amount = self
            .stock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&product_id)
            .copied()
            .ok_or_else(|| CatalogError::NotFound(format!("stock/{product_id}")))?;
        Ok(Stock {
            id: product_id,
            amount,
        })
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_failing()?;

        self.products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("products/{product_id}")))
    }
}

/// Storage that reads a fixed cart and refuses every write.
#[derive(Debug)]
pub struct FailingStorage {
    json: String,
}

impl FailingStorage {
    pub fn with_items(items: &[LineItem]) -> Self {
        Self {
            json: serde_json::to_string(items).unwrap(),
        }
    }
}

impl CartStorage for FailingStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok((key == DEFAULT_STORAGE_KEY).then(|| self.json.clone()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: "storage.json".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}
