//! Money type for representing monetary values.
//!
//! The store sells in a single currency (Brazilian reais). Amounts are kept
//! as integer centavos to avoid floating-point precision issues.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// ISO code of the store currency.
pub const CURRENCY_CODE: &str = "BRL";

/// Display symbol of the store currency.
pub const CURRENCY_SYMBOL: &str = "R$";

const CENTS_PER_UNIT: i64 = 100;

/// A monetary value in centavos.
///
/// Serializes as a bare integer number of centavos.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in centavos.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from centavos.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from whole reais, clamping at the numeric bounds.
    pub const fn from_reais(reais: i64) -> Self {
        Self::new(reais.saturating_mul(CENTS_PER_UNIT))
    }

    /// Create a Money value from whole reais, returning None when the amount
    /// does not fit in centavos.
    pub const fn checked_from_reais(reais: i64) -> Option<Self> {
        match reais.checked_mul(CENTS_PER_UNIT) {
            Some(cents) => Some(Self::new(cents)),
            None => None,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use shopfront_commerce::money::Money;
    /// let price = Money::from_decimal(4999.90);
    /// assert_eq!(price.amount_cents, 499_990);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * CENTS_PER_UNIT as f64).round() as i64)
    }

    /// Zero reais.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "R$ 1.234,56").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{} {}", sign, CURRENCY_SYMBOL, self.abs_amount())
    }

    /// Format without symbol (e.g., "1.234,56").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}", sign, self.abs_amount())
    }

    fn abs_amount(&self) -> String {
        let cents = self.amount_cents.unsigned_abs();
        let whole = cents / CENTS_PER_UNIT as u64;
        let frac = cents % CENTS_PER_UNIT as u64;
        format!("{},{:02}", group_thousands(whole), frac)
    }

    /// Try to add another value, returning None on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Try to subtract another value, returning None on overflow.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_sub(other.amount_cents).map(Money::new)
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).map(Money::new)
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }

    /// Calculate a whole-number percentage of this amount.
    ///
    /// Rounds half away from zero to the nearest centavo.
    pub fn percentage(&self, percent: u32) -> Money {
        let scaled = self.amount_cents as i128 * percent as i128;
        let rounded = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        Money::new(rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Clamp negative amounts to zero.
    pub fn non_negative(self) -> Money {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }
}

/// Insert `.` thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Saturating addition.
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

/// Saturating subtraction.
impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_mul(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
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
    fn test_money_from_reais() {
        assert_eq!(Money::from_reais(100).amount_cents, 10_000);
    }

    #[test]
    fn test_money_from_reais_out_of_range() {
        let huge = 100_000_000_000_000_000;
        assert_eq!(Money::checked_from_reais(huge), None);
        assert_eq!(Money::checked_from_reais(-huge), None);
        assert_eq!(Money::checked_from_reais(7), Some(Money::new(700)));
        assert_eq!(Money::from_reais(huge).amount_cents, i64::MAX);
        assert_eq!(Money::from_reais(-huge).amount_cents, i64::MIN);
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).amount_cents, 4999);
        assert_eq!(Money::from_decimal(0.1 + 0.2).amount_cents, 30);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).display(), "R$ 49,99");
        assert_eq!(Money::new(123_456_78).display(), "R$ 123.456,78");
        assert_eq!(Money::new(5).display(), "R$ 0,05");
        assert_eq!(Money::new(-1050).display(), "-R$ 10,50");
        assert_eq!(Money::from_reais(1_000_000).display_amount(), "1.000.000,00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(300);
        assert_eq!((a + b).amount_cents, 1300);
        assert_eq!((a - b).amount_cents, 700);
        assert_eq!((a * 3).amount_cents, 3000);
    }

    #[test]
    fn test_money_overflow() {
        let max = Money::new(i64::MAX);
        assert!(max.checked_add(Money::new(1)).is_none());
        assert!(max.checked_mul(2).is_none());
        assert_eq!(max.saturating_mul(2).amount_cents, i64::MAX);
        assert_eq!((max + Money::new(1)).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_percentage_rounds_half_up() {
        assert_eq!(Money::new(10_000).percentage(10).amount_cents, 1000);
        // 5% of 0,99 = 4,95 centavos -> 5
        assert_eq!(Money::new(99).percentage(5).amount_cents, 5);
        // 5% of 0,89 = 4,45 centavos -> 4
        assert_eq!(Money::new(89).percentage(5).amount_cents, 4);
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::new(100), Money::new(250)];
        let total: Money = values.iter().sum();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_money_serializes_as_integer() {
        let json = serde_json::to_string(&Money::new(4999)).unwrap();
        assert_eq!(json, "4999");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::new(4999));
    }
}
