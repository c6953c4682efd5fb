//! # Money Module
//!
//! Provides the `Money` type for handling peso amounts safely, and the
//! `VatRate` type for VAT math.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    ₱25.00 is stored as 2500. Every subtotal, discount, VAT component    │
//! │    and change amount is exact integer arithmetic.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## VAT Policy
//! Philippine retail prices are VAT-inclusive. There is exactly one VAT
//! computation in this system: [`Money::vat_component`] backs the net
//! amount out of an inclusive total and reports the difference.
//! `₱67.50 at 12% → net ₱60.27, VAT ₱7.23`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::VAT_RATE_BPS;

// =============================================================================
// Money Type
// =============================================================================

/// A peso amount in centavos (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values model returns and refunds
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde as plain integer**: persisted JSON carries centavos
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use sari_core::Money;
    ///
    /// let price = Money::from_centavos(2500); // ₱25.00
    /// assert_eq!(price.centavos(), 2500);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99, sign stripped).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero pesos.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the larger of `self` and `other`.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// Returns the smaller of `self` and `other`.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// Multiplies by a quantity (line total = unit price × qty).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Takes a percentage of this amount, given in basis points.
    ///
    /// Rounds half away from zero, symmetrically for negative amounts.
    /// This is the discount calculation: a 10% discount on ₱75.00 is
    /// `percentage_of(1000)` = ₱7.50.
    ///
    /// Percentages above 100% are NOT clamped; `percentage_of(15000)`
    /// on ₱10.00 yields ₱15.00. Callers clamp the resulting total at
    /// zero instead.
    pub fn percentage_of(&self, bps: u32) -> Money {
        Money(round_div(self.0 as i128 * bps as i128, 10_000))
    }

    /// Returns the VAT component of this VAT-inclusive amount.
    ///
    /// ## The Back-Out Calculation
    /// ```text
    /// total = net × (1 + rate)
    /// net   = total / (1 + rate)        (rounded to the centavo)
    /// vat   = total - net
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use sari_core::{Money, VatRate};
    ///
    /// let total = Money::from_centavos(6750); // ₱67.50
    /// let vat = total.vat_component(VatRate::philippine());
    /// assert_eq!(vat.centavos(), 723); // ₱7.23
    /// ```
    pub fn vat_component(&self, rate: VatRate) -> Money {
        if rate.is_zero() {
            return Money::zero();
        }
        let divisor = 10_000 + rate.bps() as i128;
        let net = round_div(self.0 as i128 * 10_000, divisor);
        Money(self.0 - net)
    }
}

/// Divides with round-half-away-from-zero, symmetric in sign.
///
/// Sign symmetry matters for returns: the VAT component of a negated
/// total must be the exact negation of the original component.
fn round_div(numerator: i128, divisor: i128) -> i64 {
    let half = divisor / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / divisor
    } else {
        (numerator - half) / divisor
    };
    rounded as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `₱1,234.56`: peso sign, two decimals, thousands separators.
///
/// This is the canonical receipt/report formatting; negative amounts
/// render as `-₱5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₱{}.{:02}",
            sign,
            group_thousands(self.pesos().abs()),
            self.centavos_part()
        )
    }
}

/// Inserts comma separators into a non-negative whole-peso amount.
fn group_thousands(pesos: i64) -> String {
    let digits = pesos.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
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

/// Negation models return processing: every monetary field of a
/// returned sale is the exact negation of the original.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Vat Rate
// =============================================================================

/// A VAT rate in basis points (1 bps = 0.01%; 1200 bps = 12%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// The standard Philippine VAT rate (12%).
    #[inline]
    pub const fn philippine() -> Self {
        VatRate(VAT_RATE_BPS)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::philippine()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
