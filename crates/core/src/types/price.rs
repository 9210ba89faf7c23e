//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog API sends prices as JSON numbers (`109.95`). They are parsed
//! into a [`Decimal`] so that cart totals add up exactly, and written back as
//! JSON numbers so the durable cart keeps the catalog's wire shape.

use std::fmt;
use std::iter::Sum;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price in the catalog's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero, the total of an empty cart.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for negative amounts.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The exact decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format with exactly two decimals, rounding half away from zero.
    ///
    /// `10` becomes `"10.00"` and `0.125` becomes `"0.13"`.
    #[must_use]
    pub fn to_fixed(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_negative() {
        assert_eq!(
            Price::from_cents(-1),
            Err(PriceError::Negative(Decimal::new(-1, 2)))
        );
        assert!(Price::from_cents(0).is_ok());
    }

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(Price::from_cents(1000).unwrap().to_fixed(), "10.00");
        assert_eq!(Price::new(Decimal::new(125, 3)).unwrap().to_fixed(), "0.13");
        assert_eq!(Price::ZERO.to_fixed(), "0.00");
    }

    #[test]
    fn test_display_drops_trailing_zeros() {
        assert_eq!(Price::from_cents(1000).unwrap().to_string(), "10");
        assert_eq!(Price::from_cents(10995).unwrap().to_string(), "109.95");
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995).unwrap());

        let price: Price = serde_json::from_str("10").unwrap();
        assert_eq!(price, Price::from_cents(1000).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3.5").is_err());
    }

    #[test]
    fn test_sum_is_exact() {
        let prices = [
            Price::from_cents(10).unwrap(),
            Price::from_cents(20).unwrap(),
        ];
        assert_eq!(prices.iter().sum::<Price>().amount(), Decimal::new(30, 2));
    }
}
