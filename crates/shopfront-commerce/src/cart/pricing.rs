//! Cart totals shown on the cart and checkout pages.

use crate::cart::{Cart, Coupon};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Coupon discount.
    pub discount: Money,
    /// Code of the applied coupon, if any.
    pub coupon_code: Option<String>,
    /// Shipping cost.
    pub shipping: Money,
    /// `subtotal - discount + shipping`, never negative.
    pub total: Money,
    /// Number of units in the cart.
    pub item_count: u64,
}

impl CartPricing {
    /// Compute totals for `cart` with an optional coupon and a shipping cost.
    pub fn compute(cart: &Cart, coupon: Option<&Coupon>, shipping: Money) -> Self {
        let subtotal = cart.subtotal();
        let discount = coupon
            .map(|c| c.discount_for(subtotal))
            .unwrap_or_default()
            .non_negative();
        let shipping = shipping.non_negative();
        let total = (subtotal - discount).non_negative() + shipping;

        Self {
            subtotal,
            discount,
            coupon_code: coupon.filter(|_| discount.is_positive()).map(|c| c.code.clone()),
            shipping,
            total,
            item_count: cart.item_count(),
        }
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    /// Check if shipping is free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
