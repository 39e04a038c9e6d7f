//! Shopping cart module.
//!
//! Contains the cart aggregate, the persisted cart store, coupons and totals.

mod cart;
mod discount;
mod pricing;
mod store;

pub use cart::{Cart, CartItem, CartLine, MAX_QUANTITY_PER_LINE};
pub use discount::{Coupon, CouponBook};
pub use pricing::CartPricing;
pub use store::{default_cart_key, CartSnapshots, CartStore, ListenerId};
