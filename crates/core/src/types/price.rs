//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are `rust_decimal::Decimal` in the currency's standard unit
//! (riyals, not halalas) so that line totals never pick up float error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., riyals, not halalas).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store currency (Saudi riyal).
    #[must_use]
    pub const fn sar(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::SAR)
    }

    /// Format for display in the given locale (e.g., `299.00 SAR`, `299.00 ريال`).
    #[must_use]
    pub fn display(&self, locale: Locale) -> String {
        format!(
            "{:.2} {}",
            self.amount.round_dp(2),
            self.currency_code.label(locale)
        )
    }
}

/// ISO 4217 currency codes accepted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    SAR,
    USD,
}

impl CurrencyCode {
    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SAR => "SAR",
            Self::USD => "USD",
        }
    }

    /// The label shown next to amounts in the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::SAR, Locale::En) => "SAR",
            (Self::SAR, Locale::Ar) => "ريال",
            (Self::USD, Locale::En) => "USD",
            (Self::USD, Locale::Ar) => "دولار",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_english() {
        let price = Price::sar(Decimal::new(299, 0));
        assert_eq!(price.display(Locale::En), "299.00 SAR");
    }

    #[test]
    fn test_display_arabic() {
        let price = Price::sar(Decimal::new(8950, 2));
        assert_eq!(price.display(Locale::Ar), "89.50 ريال");
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        let price = Price::new(Decimal::new(19_999, 3), CurrencyCode::USD);
        assert_eq!(price.display(Locale::En), "20.00 USD");
    }

    #[test]
    fn test_default_currency_is_riyal() {
        assert_eq!(CurrencyCode::default().code(), "SAR");
    }
}
