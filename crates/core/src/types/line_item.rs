//! Cart line items and the remote records they are built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use super::id::ProductId;

/// Product details as served by the catalog (`GET /products/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price, serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Url,
}

/// Maximum purchasable quantity for a product.
///
/// The stock endpoint only guarantees an `amount` field; the id is taken
/// from the request path by the catalog client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// One product entry in the cart with its purchased quantity.
///
/// Line items are unique by `id` within a cart. `amount` is at least 1 and
/// at most the stock observed when the item was last mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Url,
    pub amount: u32,
}

impl LineItem {
    /// Price of this line: unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }

    /// Copy of this line item with a different amount.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

impl From<Product> for LineItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }
}
