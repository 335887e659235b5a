//! Cart view: derived display state and user intents.
//!
//! The view holds no state of its own. It is rebuilt from the store's line
//! items after every operation, and user actions are turned into
//! [`CartIntent`]s that are dispatched back to the store.

use askama::Template;
use shoe_shop_core::{LineItem, PriceFormatter, ProductId};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::storage::CartStorage;
use crate::store::{CartStore, UpdateProductAmount};

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub amount: u32,
    /// Formatted unit price.
    pub unit_price: String,
    /// Formatted `price × amount`.
    pub subtotal: String,
    /// Decrement is disabled at an amount of one.
    pub can_decrement: bool,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Formatted sum of all subtotals.
    pub total: String,
    /// Sum of all amounts.
    pub item_count: u32,
}

impl CartView {
    /// Build the view for `items`.
    #[must_use]
    pub fn new(items: &[LineItem], formatter: &PriceFormatter) -> Self {
        let total = items.iter().map(LineItem::subtotal).sum();
        let item_count = items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.amount));

        Self {
            items: items
                .iter()
                .map(|item| CartItemView::new(item, formatter))
                .collect(),
            total: formatter.format(total),
            item_count,
        }
    }

    /// The view of one product's line, if it is in the cart.
    #[must_use]
    pub fn item(&self, product_id: ProductId) -> Option<&CartItemView> {
        self.items.iter().find(|item| item.id == product_id)
    }

    /// Render the cart as a plain-text table.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if rendering fails.
    pub fn render(&self) -> askama::Result<String> {
        CartTemplate { cart: self }.render()
    }
}

impl CartItemView {
    fn new(item: &LineItem, formatter: &PriceFormatter) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            image: item.image.to_string(),
            amount: item.amount,
            unit_price: formatter.format(item.price),
            subtotal: formatter.format(item.subtotal()),
            can_decrement: item.amount > 1,
        }
    }
}

/// Plain-text cart template.
#[derive(Template)]
#[template(path = "cart.txt")]
struct CartTemplate<'a> {
    cart: &'a CartView,
}

/// A user action on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartIntent {
    /// One more unit than `amount`.
    Increment { product_id: ProductId, amount: u32 },
    /// One fewer unit than `amount`.
    Decrement { product_id: ProductId, amount: u32 },
    /// Drop the line.
    Remove { product_id: ProductId },
}

impl CartIntent {
    #[must_use]
    pub const fn increment(item: &CartItemView) -> Self {
        Self::Increment {
            product_id: item.id,
            amount: item.amount,
        }
    }

    /// `None` when the line is at its minimum amount.
    #[must_use]
    pub const fn decrement(item: &CartItemView) -> Option<Self> {
        if !item.can_decrement {
            return None;
        }
        Some(Self::Decrement {
            product_id: item.id,
            amount: item.amount,
        })
    }

    #[must_use]
    pub const fn remove(item: &CartItemView) -> Self {
        Self::Remove {
            product_id: item.id,
        }
    }

    /// Apply this intent to the store.
    ///
    /// # Errors
    ///
    /// Returns the store's `CartError` unchanged.
    pub async fn dispatch<C: Catalog, S: CartStorage>(
        self,
        store: &CartStore<C, S>,
    ) -> Result<()> {
        match self {
            Self::Increment { product_id, amount } => {
                store
                    .update_product_amount(UpdateProductAmount::new(
                        product_id,
                        amount.saturating_add(1),
                    ))
                    .await
            }
            Self::Decrement { product_id, amount } => {
                store
                    .update_product_amount(UpdateProductAmount::new(
                        product_id,
                        amount.saturating_sub(1),
                    ))
                    .await
            }
            Self::Remove { product_id } => store.remove_product(product_id).await,
        }
    }
}
