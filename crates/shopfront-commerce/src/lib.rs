//! Storefront domain types and logic for Shopfront.
//!
//! This crate provides the pieces of a phone retailer's storefront:
//!
//! - **Catalog**: Static products and category pages
//! - **Search**: In-memory filters, sorting, pagination
//! - **Cart**: Cart aggregate, persisted cart store, coupons, totals
//! - **Checkout**: Address and postal lookup, shipping, WhatsApp handoff
//! - **Customer**: Signed-in state from the identity provider
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_cache::FileStore;
//! use shopfront_commerce::prelude::*;
//!
//! let catalog = Catalog::bundled()?;
//! let mut cart = CartStore::open(CartSnapshots::new(FileStore::open(".shopfront")?));
//!
//! let phone = catalog.product("iphone-15-128")?;
//! cart.add(phone.to_cart_item(Some("Preto"), None), 1);
//!
//! println!("Subtotal: {}", cart.subtotal().display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product};

    // Cart
    pub use crate::cart::{
        Cart, CartItem, CartLine, CartPricing, CartSnapshots, CartStore, Coupon, CouponBook,
    };

    // Checkout
    pub use crate::checkout::{
        Address, CheckoutFlow, CheckoutStep, Contact, OrderSummary, PaymentPreference,
        PostalAddress, PostalCode, PostalLookup, ShippingMethod, ShippingQuote, ShippingRates,
        ViaCepLookup, WhatsAppHandoff,
    };

    // Customer
    pub use crate::customer::{Customer, CustomerProfile, IdentityProvider, StaticIdentity};

    // Search
    pub use crate::search::{Filter, Pagination, SearchQuery, SearchResults, SortOption};
}
