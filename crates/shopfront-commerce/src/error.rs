//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found in the catalog.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Catalog data could not be loaded.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Postal code is not made of exactly eight digits.
    #[error("Invalid postal code: {0}")]
    InvalidPostalCode(String),

    /// Postal code is well formed but unknown to the lookup service.
    #[error("Postal code not found: {0}")]
    PostalCodeNotFound(String),

    /// Postal lookup failed in transit.
    #[error("Postal lookup failed: {0}")]
    PostalLookupFailed(String),

    /// Invalid coupon code.
    #[error("Invalid coupon code: {0}")]
    InvalidCouponCode(String),

    /// Messaging recipient number is unusable.
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<shopfront_cache::CacheError> for CommerceError {
    fn from(e: shopfront_cache::CacheError) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}

impl From<shopfront_data::FetchError> for CommerceError {
    fn from(e: shopfront_data::FetchError) -> Self {
        CommerceError::PostalLookupFailed(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
