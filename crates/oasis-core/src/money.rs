//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                        │
//! │                                                                     │
//! │  A register that sums session totals in floats will eventually      │
//! │  show a closing total that is off by a cent.                        │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    Every amount is an i64 count of centavos. Only display code      │
//! │    ever renders a decimal point.                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use oasis_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(5000); // 50.00 Bs
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // 100.00 Bs
//! let total = price + Money::from_cents(2550);   // 75.50 Bs
//!
//! // NEVER do this:
//! // let bad = Money::from_float(50.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic intermediate values may dip negative even
///   though persisted totals never do
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for slice serialization
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use oasis_core::money::Money;
    ///
    /// let price = Money::from_cents(5000); // Represents 50.00 Bs
    /// assert_eq!(price.cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use oasis_core::money::Money;
    ///
    /// let price = Money::from_major_minor(50, 25); // 50.25 Bs
    /// assert_eq!(price.cents(), 5025);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
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
    /// use oasis_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(5000); // 50.00 Bs
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 10_000); // 100.00 Bs
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Subtracts, flooring the result at zero.
    ///
    /// Daily closing totals must never go negative: deleting a historical
    /// sale whose amount exceeds the remaining total for its day clamps the
    /// day to zero instead of underflowing.
    ///
    /// ## Example
    /// ```rust
    /// use oasis_core::money::Money;
    ///
    /// let total = Money::from_cents(3000);
    /// assert_eq!(total.saturating_sub(Money::from_cents(5000)), Money::zero());
    /// assert_eq!(total.saturating_sub(Money::from_cents(1000)).cents(), 2000);
    /// ```
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with two decimals and the currency
/// label, e.g. `50.00 Bs`.
///
/// ## Note
/// This is the format used by the history report. Front ends may apply
/// their own localized formatting instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02} Bs", sign, self.major().abs(), self.minor())
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sum over an iterator of Money values (session totals, report totals).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
