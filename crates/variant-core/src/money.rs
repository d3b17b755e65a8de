//! # Money Module
//!
//! Decimal money for the price fields of a [`ProductVariant`](crate::types::ProductVariant).
//!
//! The engine never computes prices. Synthesized variants carry
//! [`Money::zero`] and existing variants pass their amounts through
//! untouched. On the wire an amount is a plain JSON number, integer or
//! fractional, in whatever unit the catalog API uses.
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use variant_core::money::Money;
//!
//! let mrp = Money::new(Decimal::new(4995, 1)); // 499.5
//! assert_eq!(mrp.to_string(), "499.5");
//! assert_eq!(serde_json::to_string(&mrp).unwrap(), "499.5");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount, exact as received.
///
/// Reads any JSON number and writes a JSON number back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero amount, the default for every synthesized variant.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money)
    }
}

/// Plain number without a currency symbol; the dashboard owns
/// localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(Decimal::new(1099, 2)).to_string(), "10.99");
        assert_eq!(Money::from(500).to_string(), "500");
        assert_eq!(Money::new(Decimal::new(-55, 1)).to_string(), "-5.5");
        assert_eq!(Money::zero().to_string(), "0");
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Money::default().is_zero());
        assert!(!Money::from(1).is_zero());
    }

    #[test]
    fn test_reads_integer_and_fractional_numbers() {
        let whole: Money = serde_json::from_str("49900").unwrap();
        assert_eq!(whole.amount(), Decimal::from(49_900));

        let fractional: Money = serde_json::from_str("499.5").unwrap();
        assert_eq!(fractional.amount(), Decimal::new(4995, 1));
    }

    #[test]
    fn test_fractional_amount_round_trips() {
        let json = serde_json::to_string(&Money::new(Decimal::new(1299, 2))).unwrap();
        assert_eq!(json, "12.99");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount(), Decimal::new(1299, 2));
    }
}
