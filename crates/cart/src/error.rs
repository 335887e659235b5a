//! Cart operation errors.
//!
//! Two families of failure share one type:
//! - business-rule rejections (out of stock, invalid amount, not in cart)
//! - infrastructure failures (catalog or storage)
//!
//! Both abort the operation without touching the cart. [`CartError::notice`]
//! maps every error to the message the user sees.

use std::fmt;

use shoe_shop_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::notice::Notice;
use crate::storage::StorageError;

/// The store operation an error arose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Notice shown for a generic failure of this operation.
    #[must_use]
    pub const fn failure_notice(self) -> Notice {
        match self {
            Self::Add => Notice::AddFailed,
            Self::Remove => Notice::RemoveFailed,
            Self::UpdateAmount => Notice::UpdateFailed,
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add product",
            Self::Remove => "remove product",
            Self::UpdateAmount => "update product amount",
        })
    }
}

/// Error returned by cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds the stock reported by the catalog.
    #[error("Product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("Cannot {operation}: product {product_id} is not in the cart")]
    NotInCart {
        operation: CartOperation,
        product_id: ProductId,
    },

    /// Quantities below one are rejected.
    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: u32 },

    /// Catalog lookup failed.
    #[error("Failed to {operation}: {source}")]
    Catalog {
        operation: CartOperation,
        #[source]
        source: CatalogError,
    },

    /// Persisting the cart failed.
    #[error("Failed to {operation}: {source}")]
    Storage {
        operation: CartOperation,
        #[source]
        source: StorageError,
    },
}

impl CartError {
    /// The notice to show the user for this error.
    #[must_use]
    pub const fn notice(&self) -> Notice {
        match self {
            Self::OutOfStock { .. } => Notice::OutOfStock,
            Self::InvalidAmount { .. } => Notice::UpdateFailed,
            Self::NotInCart { operation, .. }
            | Self::Catalog { operation, .. }
            | Self::Storage { operation, .. } => operation.failure_notice(),
        }
    }

    /// Whether this is an infrastructure failure rather than a rejection.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Catalog { .. } | Self::Storage { .. })
    }

    pub(crate) fn catalog(operation: CartOperation) -> impl Fn(CatalogError) -> Self {
        move |source| Self::Catalog { operation, source }
    }

    pub(crate) fn storage(operation: CartOperation) -> impl Fn(StorageError) -> Self {
        move |source| Self::Storage { operation, source }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
