//! Checkout module.
//!
//! Contains the checkout flow, delivery address and postal lookup, shipping
//! options and the messaging-app handoff that replaces order submission.

mod address;
mod flow;
mod handoff;
mod payment;
mod postal;
mod shipping;

pub use address::{Address, PostalCode};
pub use flow::{CheckoutFlow, CheckoutStep, Contact};
pub use handoff::{OrderSummary, WhatsAppHandoff, WHATSAPP_LINK_BASE};
pub use payment::PaymentPreference;
pub use postal::{
    lookup_or_none, AutofillTask, PostalAddress, PostalLookup, ViaCepLookup, VIACEP_BASE_URL,
};
pub use shipping::{ShippingMethod, ShippingQuote, ShippingRate, ShippingRates};
