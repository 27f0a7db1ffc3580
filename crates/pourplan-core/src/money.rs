//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  12 bottles × 10.10 as f64 = 121.19999999999999                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    12 × 1010 cents = 12120 cents = 121.20                              │
//! │    Every line cost is "rounded to 2 decimals" by construction          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Settings and catalog documents store amounts as decimal numbers in major
//! units (`12.5`). `Money` serializes the same way and decodes by rounding to
//! the nearest cent.
//!
//! Catalog prices are [`UnitPrice`] instead: they keep whatever precision the
//! document gives (a napkin at `0.005`) and only a line cost
//! (`quantity × price`) is rounded to the cent.
//!
//! ## Usage
//! ```rust
//! use pourplan_core::money::{Money, UnitPrice};
//!
//! let bottle = Money::from_cents(1099); // 10.99
//! let line = bottle.multiply_quantity(3);
//! assert_eq!(line.cents(), 3297);
//!
//! let napkin = UnitPrice::new(0.005);
//! assert_eq!(napkin.line_cost(200).cents(), 100);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit bounds can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Single currency**: there is no currency code on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pourplan_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// Only used at the document boundary, where prices arrive as JSON
    /// numbers. Rounds half away from zero to the nearest cent.
    ///
    /// ## Example
    /// ```rust
    /// use pourplan_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(12.5).cents(), 1250);
    /// assert_eq!(Money::from_major(-5.5).cents(), -550);
    /// ```
    pub fn from_major(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount in major units.
    ///
    /// For ratios (per-guest averages, break-even) and serialization only;
    /// never feed the result back into money arithmetic.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a purchase or guest count.
    ///
    /// ## Example
    /// ```rust
    /// use pourplan_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("monetary amount must be finite"));
        }
        Ok(Money::from_major(amount))
    }
}

// =============================================================================
// Unit Price
// =============================================================================

/// A catalog price per purchase unit, in major units at full precision.
///
/// Sub-cent prices are common for unit-counted extras, so the price is not
/// rounded on decode. [`UnitPrice::line_cost`] rounds once, on the product.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct UnitPrice(f64);

impl UnitPrice {
    /// Creates a price from a decimal amount in major units.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        UnitPrice(amount)
    }

    #[inline]
    pub const fn zero() -> Self {
        UnitPrice(0.0)
    }

    /// Returns the price as a decimal amount in major units.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Checks if the price is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Cost of `quantity` units, rounded to the nearest cent.
    ///
    /// ## Example
    /// ```rust
    /// use pourplan_core::money::UnitPrice;
    ///
    /// assert_eq!(UnitPrice::new(0.125).line_cost(200).cents(), 2500);
    /// assert_eq!(UnitPrice::new(10.10).line_cost(12).cents(), 12120);
    /// ```
    pub fn line_cost(&self, quantity: u64) -> Money {
        Money::from_major(quantity as f64 * self.0)
    }
}

impl From<Money> for UnitPrice {
    fn from(money: Money) -> Self {
        UnitPrice(money.to_major())
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for UnitPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("price must be finite"));
        }
        Ok(UnitPrice(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
