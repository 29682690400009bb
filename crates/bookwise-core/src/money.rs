//! # Money Module
//!
//! Provides the `Money` and `Percent` types for handling monetary values and
//! rates safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The dashboard frontend computes in IEEE doubles:                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A booking total drifting by a cent between the create flow, the edit  │
//! │  flow, and the invoice is a support ticket every time.                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    Money    = i64 cents   (10_000 = 100.00)                            │
//! │    Percent  = u32 bps     (825    = 8.25%)                             │
//! │    Rounding happens in exactly one place, deterministically.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookwise_core::money::{Money, Percent};
//!
//! let subtotal = Money::from_cents(30_000);
//! let tax = subtotal.percent_of(Percent::from_bps(1_000)); // 10%
//! assert_eq!(tax.cents(), 3_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results may be negative before the
///   pipeline clamps them; the clamp is explicit, not hidden in the type
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **No float constructor**: conversion from the dashboard's major-unit
///   numbers happens only at the persisted-blob boundary (`details` module)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
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

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtraction clamped at zero.
    ///
    /// The totals pipeline never lets a discount push an amount negative:
    /// `post = max(0, subtotal − discount)`. This is that `max(0, …)`.
    ///
    /// ## Example
    /// ```rust
    /// use bookwise_core::money::Money;
    ///
    /// let sub = Money::from_cents(10_000);
    /// assert_eq!(sub.sub_clamped(Money::from_cents(15_000)), Money::zero());
    /// assert_eq!(sub.sub_clamped(Money::from_cents(4_000)).cents(), 6_000);
    /// ```
    #[inline]
    pub fn sub_clamped(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Clamps a (possibly negative) value to zero.
    #[inline]
    pub fn clamp_non_negative(&self) -> Money {
        Money(self.0.max(0))
    }

    /// Applies a percentage and returns the resulting amount.
    ///
    /// ## Rounding
    /// Half-up integer rounding in one place:
    /// `(cents × bps + 5000) / 10000`, computed in i128 to prevent overflow
    /// on large amounts. Re-running on the same inputs always reproduces the
    /// same cents - no drift across recomputations.
    ///
    /// ## Example
    /// ```rust
    /// use bookwise_core::money::{Money, Percent};
    ///
    /// let amount = Money::from_cents(1_000);
    /// let rate = Percent::from_bps(825); // 8.25%
    /// assert_eq!(amount.percent_of(rate).cents(), 83); // 82.5 rounds up
    /// ```
    pub fn percent_of(&self, rate: Percent) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5_000) / 10_000;
        Money(cents as i64)
    }

    /// Multiplies money by a quantity (line totals, day multipliers).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Money Trait Implementations
// =============================================================================

/// Debug-friendly display. Frontend formatting handles localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (fee lists, line totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Percent Type
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25%; 10000 bps = 100%
///
/// Used for the flat tax percentage, percentage discounts, and the
/// down-payment cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// 100% expressed in basis points.
    pub const HUNDRED_BPS: u32 = 10_000;

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from a plain percent number (DTO boundary only).
    ///
    /// `from_percentage(8.25)` = 825 bps. Negative input clamps to zero.
    pub fn from_percentage(pct: f64) -> Self {
        Percent((pct.max(0.0) * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a plain percent number (display/DTO only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True when the rate exceeds 100%.
    ///
    /// Percentage discounts above 100% are a validation error; the tax rate
    /// has no hard upper bound beyond input-layer convention.
    #[inline]
    pub const fn exceeds_hundred(&self) -> bool {
        self.0 > Self::HUNDRED_BPS
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
