//! Core types for the Shoe Shop cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;

pub use id::*;
pub use line_item::{LineItem, Product, Stock};
pub use price::{Locale, LocaleError, PriceFormatter};
