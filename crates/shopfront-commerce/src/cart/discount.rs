//! Coupon codes.
//!
//! A coupon is a flat percentage off the cart subtotal, applied when the
//! totals are shown. It is never stored with the cart.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A percentage coupon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coupon {
    /// Code the customer types, matched case-insensitively.
    pub code: String,
    /// Percent off the subtotal, at most 100.
    pub percent_off: u32,
    /// Inactive coupons are rejected at redemption.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Coupon {
    /// Create an active coupon. The percentage is capped at 100.
    pub fn new(code: impl Into<String>, percent_off: u32) -> Self {
        Self {
            code: code.into().trim().to_uppercase(),
            percent_off: percent_off.min(100),
            active: true,
        }
    }

    /// Amount taken off `subtotal`.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if !self.active || !subtotal.is_positive() {
            return Money::zero();
        }
        subtotal.percentage(self.percent_off.min(100))
    }

    /// Label such as "BEMVINDO10 (-10%)".
    pub fn label(&self) -> String {
        format!("{} (-{}%)", self.code, self.percent_off)
    }

    fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

/// The set of coupons the store accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    /// Create a book from a list of coupons.
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// Look up an active coupon by code.
    pub fn redeem(&self, code: &str) -> Result<&Coupon, CommerceError> {
        self.coupons
            .iter()
            .find(|c| c.active && c.matches(code))
            .ok_or_else(|| CommerceError::InvalidCouponCode(code.trim().to_string()))
    }

    /// All coupons, active or not.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Check if the book has no coupons.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl FromIterator<Coupon> for CouponBook {
    fn from_iter<I: IntoIterator<Item = Coupon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
