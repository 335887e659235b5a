//! Locale-aware price formatting using decimal arithmetic.
//!
//! Cart prices are kept as [`Decimal`] and only turned into strings at the
//! view boundary. Formatting rounds half away from zero to two places.
//!
//! ```rust
//! # use std::str::FromStr;
//! # use rust_decimal::Decimal;
//! # use shoe_shop_core::{Locale, PriceFormatter};
//! let formatter = PriceFormatter::new(Locale::EnUs);
//! assert_eq!(formatter.format(Decimal::from_str("1234.5").unwrap()), "$1,234.50");
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Brazilian Portuguese, Brazilian real (`R$ 1.234,56`).
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// US English, US dollar (`$1,234.56`).
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// BCP 47 language tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
        }
    }

    /// Currency prefix, including any separator before the digits.
    const fn currency_prefix(self) -> &'static str {
        match self {
            // Intl places a non-breaking space between symbol and amount
            Self::PtBr => "R$\u{a0}",
            Self::EnUs => "$",
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::PtBr => ',',
            Self::EnUs => '.',
        }
    }

    const fn group_separator(self) -> char {
        match self {
            Self::PtBr => '.',
            Self::EnUs => ',',
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unsupported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported locale: {0} (expected pt-BR or en-US)")]
pub struct LocaleError(pub String);

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" | "pt" => Ok(Self::PtBr),
            "en-us" | "en" => Ok(Self::EnUs),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

/// Formats decimal amounts as currency strings for a [`Locale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceFormatter {
    locale: Locale,
}

impl PriceFormatter {
    /// Create a formatter for the given locale.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The locale this formatter renders for.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Format an amount, e.g. `R$ 179,90` or `$179.90`.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut out = String::with_capacity(digits.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(self.locale.currency_prefix());
        out.push_str(&group_thousands(whole, self.locale.group_separator()));
        out.push(self.locale.decimal_separator());
        out.push_str(cents);
        out
    }
}

/// Insert `separator` between every group of three digits, from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
