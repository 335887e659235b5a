//! The cart store: a stock-checked, persisted list of line items.
//!
//! The store is an explicit object built once by the application root and
//! handed to whatever needs it. Every mutation runs as a single-writer
//! transaction: the list lock is held across the stock lookup, the mutation
//! and the write to storage, so two intents fired back to back are applied
//! one after the other instead of racing on a stale copy.
//!
//! The in-memory list is only replaced after the new list has been written to
//! storage, so a failed operation leaves both untouched.
//!
//! ```rust,ignore
//! let store = CartStore::open(catalog, storage, DEFAULT_STORAGE_KEY)?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! store
//!     .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
//!     .await?;
//! store.remove_product(ProductId::new(1)).await?;
//! ```

use shoe_shop_core::{LineItem, ProductId};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{CartError, CartOperation, Result};
use crate::storage::{CartStorage, StorageError};

/// Request to set a line item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

impl UpdateProductAmount {
    #[must_use]
    pub const fn new(product_id: ProductId, amount: u32) -> Self {
        Self { product_id, amount }
    }
}

/// Cart state container backed by a [`Catalog`] and a [`CartStorage`].
pub struct CartStore<C, S> {
    catalog: C,
    storage: S,
    storage_key: String,
    items: Mutex<Vec<LineItem>>,
}

impl<C: Catalog, S: CartStorage> CartStore<C, S> {
    /// Open the cart persisted under `storage_key`.
    ///
    /// A missing key yields an empty cart. A value that does not decode as a
    /// line-item list is logged and also yields an empty cart; it is
    /// overwritten by the next successful mutation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend cannot be read.
    pub fn open(
        catalog: C,
        storage: S,
        storage_key: impl Into<String>,
    ) -> std::result::Result<Self, StorageError> {
        let storage_key = storage_key.into();
        let items = load_items(&storage, &storage_key)?;
        debug!(key = %storage_key, items = items.len(), "Cart loaded");

        Ok(Self {
            catalog,
            storage,
            storage_key,
            items: Mutex::new(items),
        })
    }

    /// Snapshot of the current line items, in insertion order.
    pub async fn items(&self) -> Vec<LineItem> {
        self.items.lock().await.clone()
    }

    /// Number of distinct products in the cart.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Whether the cart has no line items.
    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line item, or fetches the product and appends
    /// a new line item with amount 1.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if one more unit exceeds stock
    /// - `CartError::Catalog` / `CartError::Storage` on infrastructure failure
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<()> {
        self.try_add_product(product_id)
            .await
            .inspect_err(log_failure)
    }

    /// Remove a product's line item entirely.
    ///
    /// # Errors
    ///
    /// - `CartError::NotInCart` if the product is not in the cart
    /// - `CartError::Storage` if persisting fails
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<()> {
        self.try_remove_product(product_id)
            .await
            .inspect_err(log_failure)
    }

    /// Set a line item's quantity.
    ///
    /// # Errors
    ///
    /// - `CartError::NotInCart` if the product is not in the cart
    /// - `CartError::OutOfStock` if `amount` exceeds stock
    /// - `CartError::InvalidAmount` if `amount` is zero
    /// - `CartError::Catalog` / `CartError::Storage` on infrastructure failure
    #[instrument(skip_all, fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<()> {
        self.try_update_product_amount(update)
            .await
            .inspect_err(log_failure)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<()> {
        const OP: CartOperation = CartOperation::Add;

        let mut items = self.items.lock().await;
        let current = find(&items, product_id).map_or(0, |item| item.amount);

        let stock = self
            .catalog
            .stock(product_id)
            .await
            .map_err(CartError::catalog(OP))?;

        let requested = current.saturating_add(1);
        if requested > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        let mut next = items.clone();
        if let Some(item) = next.iter_mut().find(|item| item.id == product_id) {
            item.amount = requested;
        } else {
            let product = self
                .catalog
                .product(product_id)
                .await
                .map_err(CartError::catalog(OP))?;
            // Keyed by the requested id so the list stays unique
            next.push(LineItem {
                id: product_id,
                ..LineItem::from(product)
            });
        }

        self.commit(&mut items, next, OP)
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<()> {
        const OP: CartOperation = CartOperation::Remove;

        let mut items = self.items.lock().await;
        if find(&items, product_id).is_none() {
            return Err(CartError::NotInCart {
                operation: OP,
                product_id,
            });
        }

        let next = items
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        self.commit(&mut items, next, OP)
    }

    async fn try_update_product_amount(&self, update: UpdateProductAmount) -> Result<()> {
        const OP: CartOperation = CartOperation::UpdateAmount;
        let UpdateProductAmount { product_id, amount } = update;

        let mut items = self.items.lock().await;
        if find(&items, product_id).is_none() {
            return Err(CartError::NotInCart {
                operation: OP,
                product_id,
            });
        }

        let stock = self
            .catalog
            .stock(product_id)
            .await
            .map_err(CartError::catalog(OP))?;

        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }
        if amount < 1 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }

        let next = items
            .iter()
            .map(|item| {
                if item.id == product_id {
                    item.with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect();

        self.commit(&mut items, next, OP)
    }

    /// Persist `next`, then make it the current list.
    fn commit(
        &self,
        items: &mut Vec<LineItem>,
        next: Vec<LineItem>,
        operation: CartOperation,
    ) -> Result<()> {
        let json = serde_json::to_string(&next)
            .map_err(|e| CartError::storage(operation)(StorageError::from(e)))?;
        self.storage
            .set_item(&self.storage_key, &json)
            .map_err(CartError::storage(operation))?;

        *items = next;
        debug!(items = items.len(), "Cart persisted");
        Ok(())
    }
}

fn find(items: &[LineItem], product_id: ProductId) -> Option<&LineItem> {
    items.iter().find(|item| item.id == product_id)
}

fn load_items<S: CartStorage>(
    storage: &S,
    key: &str,
) -> std::result::Result<Vec<LineItem>, StorageError> {
    let Some(json) = storage.get_item(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&json) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable persisted cart");
            Ok(Vec::new())
        }
    }
}

fn log_failure(err: &CartError) {
    if err.is_infrastructure() {
        tracing::error!(error = %err, notice = %err.notice(), "Cart operation failed");
    } else {
        warn!(error = %err, notice = %err.notice(), "Cart operation rejected");
    }
}
