//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point:  0.1 + 0.2 = 0.30000000000000004
//! In integer cents:   10 + 20 = 30
//! ```
//! Every price, line total and bill total in the system flows through
//! this type. The database stores the cent count; the API transmits a
//! decimal string with two fraction digits ("2.50"), which is also how
//! `Money` serializes.
//!
//! ## Usage
//! ```rust
//! use atrium_core::money::Money;
//!
//! let price: Money = "2.50".parse().unwrap();
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.to_string(), "7.50");
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals and aggregates never overflow in practice,
///   and subtraction stays closed under the type
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **String wire format**: serializes as `"12.50"`, never as a float
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use atrium_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(250); // 2.50
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 750);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Major-unit portion (truncated toward zero).
    #[inline]
    const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Minor-unit portion (always 0-99).
    #[inline]
    const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }
}

// =============================================================================
// Parsing & Formatting
// =============================================================================

/// Error produced when parsing a decimal money string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    /// Input was empty or whitespace.
    #[error("amount is empty")]
    Empty,

    /// Input contained a character outside `[0-9.-]` or was malformed.
    #[error("amount is not a decimal number")]
    Invalid,

    /// More than two fraction digits; the system works in cents.
    #[error("amount has more than two decimal places")]
    TooPrecise,

    /// Value does not fit in the cent representation.
    #[error("amount is out of range")]
    Overflow,
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses a decimal string such as `"12"`, `"12.5"` or `"12.50"`.
    ///
    /// Exactly 0, 1 or 2 fraction digits are accepted; a lone `.` or a
    /// trailing `.` is rejected. A leading `-` is allowed so the type
    /// stays usable for adjustments, though catalog validation rejects
    /// negative prices before they get here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_part, minor_part) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (unsigned, None),
        };

        if major_part.is_empty() || !major_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMoneyError::Invalid);
        }

        let minor_cents = match minor_part {
            None => 0,
            Some(minor) => {
                if minor.is_empty() || !minor.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseMoneyError::Invalid);
                }
                match minor.len() {
                    1 => minor.parse::<i64>().map_err(|_| ParseMoneyError::Invalid)? * 10,
                    2 => minor.parse::<i64>().map_err(|_| ParseMoneyError::Invalid)?,
                    _ => return Err(ParseMoneyError::TooPrecise),
                }
            }
        };

        let major_units: i64 = major_part
            .parse()
            .map_err(|_| ParseMoneyError::Overflow)?;
        let cents = major_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor_cents))
            .ok_or(ParseMoneyError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Formats as a plain decimal string with two fraction digits: `"7.50"`.
///
/// This is the wire format, not a display nicety, so there is no
/// currency symbol and no localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Serde: decimal string on the wire
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!("2.50".parse::<Money>().unwrap().cents(), 250);
        assert_eq!("2.5".parse::<Money>().unwrap().cents(), 250);
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("0.05".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("80.00".parse::<Money>().unwrap().cents(), 8000);
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!("-5.50".parse::<Money>().unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("  ".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("abc".parse::<Money>(), Err(ParseMoneyError::Invalid));
        assert_eq!("1.".parse::<Money>(), Err(ParseMoneyError::Invalid));
        assert_eq!(".5".parse::<Money>(), Err(ParseMoneyError::Invalid));
        assert_eq!("1.2.3".parse::<Money>(), Err(ParseMoneyError::Invalid));
        assert_eq!("1.999".parse::<Money>(), Err(ParseMoneyError::TooPrecise));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_display_parse_round_trip() {
        for cents in [0, 1, 99, 100, 250, 1200, 999_999] {
            let money = Money::from_cents(cents);
            let parsed: Money = money.to_string().parse().unwrap();
            assert_eq!(parsed, money);
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut acc = Money::zero();
        acc += Money::from_cents(250).multiply_quantity(3);
        assert_eq!(acc.cents(), 750);
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::from_cents(100).is_negative());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_serde_is_string() {
        let json = serde_json::to_string(&Money::from_cents(750)).unwrap();
        assert_eq!(json, "\"7.50\"");

        let back: Money = serde_json::from_str("\"7.50\"").unwrap();
        assert_eq!(back.cents(), 750);
    }
}
