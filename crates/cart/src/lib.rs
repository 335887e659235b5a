//! Shoe Shop Cart - stock-checked shopping cart with durable storage.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the ordered list of line items and is the only
//!   way to mutate it. Each add / remove / update checks the catalog's stock,
//!   then persists the whole list before the change becomes visible.
//! - [`catalog`] fetches stock levels and product details over HTTP.
//! - [`storage`] provides local-storage style key/value persistence.
//! - [`view`] derives formatted display state and turns user actions into
//!   store calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use shoe_shop_cart::{CartConfig, CartStore, FileStorage, HttpCatalog};
//!
//! let config = CartConfig::from_env()?;
//! let catalog = HttpCatalog::new(&config.api)?;
//! let storage = FileStorage::new(&config.storage_path);
//! let store = CartStore::open(catalog, storage, &config.storage_key)?;
//!
//! if let Err(e) = store.add_product(ProductId::new(1)).await {
//!     eprintln!("{}", e.notice());
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notice;
pub mod storage;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;

pub use catalog::{Catalog, CatalogError, HttpCatalog};
pub use config::{CartConfig, CatalogConfig, ConfigError, DEFAULT_STORAGE_KEY};
pub use error::{CartError, CartOperation};
pub use notice::Notice;
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, UpdateProductAmount};
pub use view::{CartIntent, CartItemView, CartView};
