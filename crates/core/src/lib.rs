//! Shoe Shop Core - Shared domain types.
//!
//! This crate provides the types shared by every Shoe Shop component:
//! - `cart` - Cart store, catalog client, storage and cart view
//! - `cli` - The `shoe-cart` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, line items, stock records and price formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
