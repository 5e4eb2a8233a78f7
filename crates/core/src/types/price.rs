//! Price representation for display.
//!
//! Amounts are plain `f64` values exactly as coerced from the catalog API.
//! No rounding or minor-unit handling is applied anywhere: a cart total is the
//! straight sum of its line amounts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: f64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: f64, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the default catalog currency.
    #[must_use]
    pub fn from_amount(amount: f64) -> Self {
        Self::new(amount, CurrencyCode::default())
    }
}

/// Formats as symbol followed by the shortest amount form (`৳120`, `৳12.5`).
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Bangladeshi Taka, the catalog's native currency.
    #[default]
    BDT,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BDT => "৳",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Price::from_amount(120.0).to_string(), "৳120");
    }

    #[test]
    fn test_display_fractional_amount() {
        assert_eq!(Price::from_amount(12.5).to_string(), "৳12.5");
    }

    #[test]
    fn test_default_currency_is_taka() {
        let price = Price::new(3.0, CurrencyCode::default());
        assert_eq!(price, Price::from_amount(3.0));
        assert_eq!(price.to_string(), "৳3");
    }
}
