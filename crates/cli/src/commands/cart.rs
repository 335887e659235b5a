//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! shoe-cart show
//!
//! # Add one unit of product 3
//! shoe-cart add 3
//!
//! # Set product 3 to two units
//! shoe-cart set 3 2
//!
//! # Step a line up or down by one
//! shoe-cart increment 3
//! shoe-cart decrement 3
//!
//! # Drop product 3
//! shoe-cart remove 3
//! ```
//!
//! Every mutating command prints the updated cart on success. On failure the
//! user-facing notice is returned as `CommandError::Cart`.

use shoe_shop_cart::{
    CartConfig, CartError, CartIntent, CartOperation, CartStore, CartView, CatalogError,
    FileStorage, HttpCatalog, StorageError, UpdateProductAmount,
};
use shoe_shop_core::{PriceFormatter, ProductId};
use thiserror::Error;

/// Errors from running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// A cart operation was rejected or failed; carries the user notice.
    #[error("{}", .0.notice())]
    Cart(#[from] CartError),
}

/// A mutation requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add(ProductId),
    Remove(ProductId),
    Set(ProductId, u32),
    Increment(ProductId),
    Decrement(ProductId),
}

/// The cart store wired to the HTTP catalog and file storage.
pub struct CartApp {
    store: CartStore<HttpCatalog, FileStorage>,
    formatter: PriceFormatter,
}

impl CartApp {
    /// Build the catalog client and open the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the HTTP client cannot be built or storage
    /// cannot be read.
    pub fn open(config: &CartConfig) -> Result<Self, CommandError> {
        let catalog = HttpCatalog::new(&config.api)?;
        let storage = FileStorage::new(&config.storage_path);
        tracing::debug!(path = %storage.path().display(), "Opening cart storage");

        Ok(Self {
            store: CartStore::open(catalog, storage, config.storage_key.as_str())?,
            formatter: PriceFormatter::new(config.locale),
        })
    }

    /// Current cart as a plain-text table.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Render` if the template fails.
    pub async fn show(&self) -> Result<String, CommandError> {
        let view = self.view().await;
        Ok(view.render()?)
    }

    /// Apply `action`, then render the updated cart.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Cart` when the store rejects the action.
    pub async fn apply(&self, action: CartAction) -> Result<String, CommandError> {
        match action {
            CartAction::Add(product_id) => self.store.add_product(product_id).await?,
            CartAction::Remove(product_id) => self.store.remove_product(product_id).await?,
            CartAction::Set(product_id, amount) => {
                self.store
                    .update_product_amount(UpdateProductAmount::new(product_id, amount))
                    .await?;
            }
            CartAction::Increment(product_id) | CartAction::Decrement(product_id) => {
                let view = self.view().await;
                let item = view.item(product_id).ok_or(CartError::NotInCart {
                    operation: CartOperation::UpdateAmount,
                    product_id,
                })?;
                let intent = if matches!(action, CartAction::Increment(_)) {
                    CartIntent::increment(item)
                } else {
                    // Decrement is disabled at one; report it like an invalid amount
                    CartIntent::decrement(item).ok_or(CartError::InvalidAmount {
                        product_id,
                        amount: 0,
                    })?
                };
                intent.dispatch(&self.store).await?;
            }
        }

        self.show().await
    }

    async fn view(&self) -> CartView {
        CartView::new(&self.store.items().await, &self.formatter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use shoe_shop_cart::{CatalogConfig, DEFAULT_STORAGE_KEY};
    use shoe_shop_core::Locale;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn app(server: &MockServer, dir: &tempfile::TempDir) -> CartApp {
        let config = CartConfig {
            api: CatalogConfig::new(Url::parse(&server.uri()).unwrap()),
            storage_path: dir.path().join("storage.json"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            locale: Locale::EnUs,
        };
        CartApp::open(&config).unwrap()
    }

    async fn mount_product(server: &MockServer, id: i32, stock: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": id, "amount": stock })),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://cdn.example.com/tenis1.jpg"
            })))
            .mount(server)
            .await;
    }

    async fn stock_requests(server: &MockServer, id: i32) -> usize {
        let stock_path = format!("/stock/{id}");
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|request| request.url.path() == stock_path)
            .count()
    }

    #[tokio::test]
    async fn test_show_empty_cart() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = app(&server, &dir);

        assert!(app.show().await.unwrap().contains("Your cart is empty."));
    }

    #[tokio::test]
    async fn test_add_increment_decrement() {
        let server = MockServer::start().await;
        mount_product(&server, 1, 3).await;
        let dir = tempfile::tempdir().unwrap();
        let app = app(&server, &dir);

        let out = app.apply(CartAction::Add(ProductId::new(1))).await.unwrap();
        assert!(out.contains("$179.90 x 1 = $179.90"));

        let out = app
            .apply(CartAction::Increment(ProductId::new(1)))
            .await
            .unwrap();
        assert!(out.contains("$179.90 x 2 = $359.80"));

        let out = app
            .apply(CartAction::Decrement(ProductId::new(1)))
            .await
            .unwrap();
        assert!(out.contains("x 1 ="));
    }

    #[tokio::test]
    async fn test_decrement_at_one_is_rejected() {
        let server = MockServer::start().await;
        mount_product(&server, 1, 3).await;
        let dir = tempfile::tempdir().unwrap();
        let app = app(&server, &dir);

        app.apply(CartAction::Add(ProductId::new(1))).await.unwrap();
        let err = app
            .apply(CartAction::Decrement(ProductId::new(1)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Cart(CartError::InvalidAmount { amount: 0, .. })
        ));
        assert_eq!(err.to_string(), "Error changing product quantity");
        // Only the add checked stock; the rejected decrement never reached the API
        assert_eq!(stock_requests(&server, 1).await, 1);
    }

    #[tokio::test]
    async fn test_increment_absent_product_is_rejected() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = app(&server, &dir);

        let err = app
            .apply(CartAction::Increment(ProductId::new(8)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error changing product quantity");
    }

    #[tokio::test]
    async fn test_set_beyond_stock_reports_out_of_stock() {
        let server = MockServer::start().await;
        mount_product(&server, 1, 2).await;
        let dir = tempfile::tempdir().unwrap();
        let app = app(&server, &dir);

        app.apply(CartAction::Add(ProductId::new(1))).await.unwrap();
        let err = app
            .apply(CartAction::Set(ProductId::new(1), 5))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Requested quantity is out of stock");
    }
}
