//! Fixed-point money type with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so balances never
//! accumulate binary floating-point error.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a string could not be read as [`Money`].
#[derive(Error, Debug)]
pub enum ParseMoneyError {
    /// Not a decimal number at all
    #[error("Not a decimal amount: {0}")]
    Malformed(#[from] rust_decimal::Error),

    /// More fractional digits than a cent can hold
    #[error("Amount {0} has more than 2 decimal places")]
    TooPrecise(String),
}

/// A monetary amount that maintains exactly 2 decimal places.
///
/// Parsing pads to 2 places and refuses anything finer than a cent, so an
/// amount is never silently rounded on its way into the ledger.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use account_ledger::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates a new `Money` from a `Decimal`, rounding to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Money(normalized)
    }

    /// Returns `true` if this amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if this amount is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money::new)
    }

    /// Subtracts `rhs`, returning `None` on overflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money::new)
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        // Trailing zeros are fine ("1.500"), significant sub-cent digits are not.
        if decimal.normalize().scale() > Self::SCALE {
            return Err(ParseMoneyError::TooPrecise(trimmed.to_string()));
        }
        Ok(Money::new(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        let m = Money::from_str("1").unwrap();
        assert_eq!(m.to_string(), "1.00");

        let m = Money::from_str("1.5").unwrap();
        assert_eq!(m.to_string(), "1.50");

        let m = Money::from_str("  2.25  ").unwrap();
        assert_eq!(m.to_string(), "2.25");
    }

    #[test]
    fn test_decimal_sums_are_exact() {
        let a = Money::from_str("0.1").unwrap();
        let b = Money::from_str("0.2").unwrap();

        let sum = a.checked_add(b).unwrap();
        assert_eq!(sum, Money::from_str("0.3").unwrap());
        assert_eq!(sum.to_string(), "0.30");
    }

    #[test]
    fn test_from_str_rejects_sub_cent_precision() {
        for raw in ["0.005", "100.004", "0.001", "-1.999"] {
            assert!(
                matches!(Money::from_str(raw), Err(ParseMoneyError::TooPrecise(_))),
                "amount {}",
                raw
            );
        }
    }

    #[test]
    fn test_from_str_accepts_trailing_zeros() {
        assert_eq!(Money::from_str("1.500").unwrap().to_string(), "1.50");
        assert_eq!(Money::from_str("7.0000").unwrap().to_string(), "7.00");
    }

    #[test]
    fn test_positivity() {
        assert!(Money::from_str("0.01").unwrap().is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert!(Money::from_str("-0.01").unwrap().is_negative());
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        let max = Money::new(Decimal::MAX);
        assert!(max.checked_add(Money::from_str("1").unwrap()).is_none());
        assert_eq!(
            Money::from_str("1.25")
                .unwrap()
                .checked_add(Money::from_str("0.75").unwrap()),
            Some(Money::from_str("2").unwrap())
        );
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::from_str("1.00").unwrap();
        let b = Money::from_str("3.00").unwrap();
        assert_eq!(a.checked_sub(b).unwrap().to_string(), "-2.00");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Money::from_str("ten"),
            Err(ParseMoneyError::Malformed(_))
        ));
        assert!(Money::from_str("").is_err());
    }
}
