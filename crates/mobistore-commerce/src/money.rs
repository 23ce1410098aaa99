//! Money type for cart prices and totals.
//!
//! Amounts are integers in the smallest unit of the currency. The product
//! API speaks decimal major units, so conversion happens once, when a
//! record is hydrated into the cart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol shown next to cart totals.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (e.g., cents).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert a decimal amount in major units.
    ///
    /// Returns `None` for NaN, infinities and values that do not fit in
    /// minor units.
    ///
    /// ```
    /// use mobistore_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(499.99, Currency::USD).unwrap();
    /// assert_eq!(price.amount_minor, 49999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let multiplier = 10_i64.pow(currency.decimal_places()) as f64;
        let scaled = (amount * multiplier).round();
        if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$1500.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without the symbol (e.g., "1500.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add another amount, returning `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum amounts, returning `None` on currency mismatch or overflow.
    ///
    /// An empty iterator sums to zero in `currency`.
    pub fn checked_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(500.0, Currency::USD).unwrap();
        assert_eq!(m.amount_minor, 50000);

        let m = Money::from_decimal(100.0, Currency::JPY).unwrap();
        assert_eq!(m.amount_minor, 100);
    }

    #[test]
    fn test_money_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN, Currency::USD).is_none());
        assert!(Money::from_decimal(f64::INFINITY, Currency::USD).is_none());
        assert!(Money::from_decimal(1e300, Currency::USD).is_none());
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(150000, Currency::USD);
        assert_eq!(m.display(), "$1500.00");

        let m = Money::new(100, Currency::JPY);
        assert_eq!(m.display(), "\u{00a5}100");
    }

    #[test]
    fn test_checked_mul_overflow() {
        let m = Money::new(i64::MAX / 2 + 1, Currency::USD);
        assert!(m.checked_mul(2).is_none());
        assert_eq!(Money::new(500, Currency::USD).checked_mul(3).unwrap().amount_minor, 1500);
    }

    #[test]
    fn test_checked_sum() {
        let amounts = [Money::new(1000, Currency::USD), Money::new(500, Currency::USD)];
        let total = Money::checked_sum(amounts.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_minor, 1500);

        let empty: [Money; 0] = [];
        assert!(Money::checked_sum(empty.iter(), Currency::EUR).unwrap().is_zero());
    }

    #[test]
    fn test_checked_sum_currency_mismatch() {
        let amounts = [Money::new(1000, Currency::USD), Money::new(500, Currency::EUR)];
        assert!(Money::checked_sum(amounts.iter(), Currency::USD).is_none());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
