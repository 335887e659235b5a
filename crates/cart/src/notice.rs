//! User-facing notices for failed cart operations.
//!
//! Notices are transient: the front end shows them once (a toast in a
//! browser, a line on stderr in the CLI) and nothing is logged to storage.

use std::fmt;

/// A short message shown to the user when a cart operation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The requested quantity exceeds available stock.
    OutOfStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed or it was not in the cart.
    RemoveFailed,
    /// Changing a quantity failed, the quantity was invalid, or the product
    /// was not in the cart.
    UpdateFailed,
}

impl Notice {
    /// The message text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AddFailed => "Error adding product",
            Self::RemoveFailed => "Error removing product",
            Self::UpdateFailed => "Error changing product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
