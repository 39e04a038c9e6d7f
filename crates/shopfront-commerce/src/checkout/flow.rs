//! Checkout flow state machine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::{Cart, CartPricing, Coupon, CouponBook};
use crate::checkout::{
    Address, OrderSummary, PaymentPreference, PostalAddress, ShippingQuote, WhatsAppHandoff,
};
use crate::customer::Customer;
use crate::ids::OrderRef;
use crate::money::Money;
use crate::CommerceError;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Cart review.
    Cart,
    /// Name, phone and e-mail.
    Contact,
    /// Address and shipping option.
    Delivery,
    /// Final review before opening the chat.
    Review,
    /// The order message was handed to the messaging app.
    HandedOff,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "cart",
            CheckoutStep::Contact => "contact",
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Review => "review",
            CheckoutStep::HandedOff => "handed_off",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "Carrinho",
            CheckoutStep::Contact => "Identificação",
            CheckoutStep::Delivery => "Entrega",
            CheckoutStep::Review => "Revisão",
            CheckoutStep::HandedOff => "Enviado",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Cart => 1,
            CheckoutStep::Contact => 2,
            CheckoutStep::Delivery => 3,
            CheckoutStep::Review => 4,
            CheckoutStep::HandedOff => 5,
        }
    }

    fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => Some(CheckoutStep::Contact),
            CheckoutStep::Contact => Some(CheckoutStep::Delivery),
            CheckoutStep::Delivery => Some(CheckoutStep::Review),
            CheckoutStep::Review => Some(CheckoutStep::HandedOff),
            CheckoutStep::HandedOff => None,
        }
    }

    fn prev(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => None,
            CheckoutStep::Contact => Some(CheckoutStep::Cart),
            CheckoutStep::Delivery => Some(CheckoutStep::Contact),
            CheckoutStep::Review => Some(CheckoutStep::Delivery),
            // The chat is already open; there is nothing to go back to.
            CheckoutStep::HandedOff => None,
        }
    }
}

/// Contact fields of the checkout form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    /// Name and a phone number with at least ten digits are required.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the required fields that are still missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("nome");
        }
        if self.phone.chars().filter(char::is_ascii_digit).count() < 10 {
            missing.push("telefone");
        }
        missing
    }
}

/// Checkout state for one visit to the checkout page.
///
/// The cart is passed in rather than owned, so the flow always sees the
/// store's current lines. Handing off leaves the cart untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Reference quoted in the order message.
    pub order_ref: OrderRef,
    /// Current step.
    pub step: CheckoutStep,
    /// Completed steps.
    pub completed_steps: Vec<CheckoutStep>,
    pub contact: Contact,
    pub address: Address,
    /// Selected shipping option.
    pub shipping: Option<ShippingQuote>,
    pub payment: PaymentPreference,
    /// Redeemed coupon.
    pub coupon: Option<Coupon>,
    /// Free-text notes for the seller.
    pub notes: Option<String>,
    /// Local time the flow started.
    pub started_at: NaiveDateTime,
}

impl CheckoutFlow {
    /// Start a checkout at the cart step.
    pub fn new() -> Self {
        Self::started_at(chrono::Local::now().naive_local())
    }

    /// Start a checkout with a fixed start time.
    pub fn started_at(started_at: NaiveDateTime) -> Self {
        Self {
            order_ref: OrderRef::generate(),
            step: CheckoutStep::Cart,
            completed_steps: Vec::new(),
            contact: Contact::default(),
            address: Address::default(),
            shipping: None,
            payment: PaymentPreference::default(),
            coupon: None,
            notes: None,
            started_at,
        }
    }

    /// Fill empty contact fields from the signed-in profile.
    pub fn prefill(&mut self, customer: &Customer) {
        let Some(profile) = customer.profile() else {
            return;
        };
        if self.contact.name.trim().is_empty() {
            self.contact.name = profile.name.clone();
        }
        if self.contact.email.as_deref().map_or(true, |e| e.trim().is_empty()) {
            self.contact.email = Some(profile.email.clone());
        }
    }

    /// Check if checkout can advance to a step.
    pub fn can_advance_to(&self, step: CheckoutStep, cart: &Cart) -> bool {
        self.missing_for_step(step, cart).is_empty()
    }

    /// Advance to the next step.
    pub fn advance(&mut self, cart: &Cart) -> Result<CheckoutStep, CommerceError> {
        let next = self.step.next().ok_or_else(|| CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: "none".to_string(),
        })?;

        let missing = self.missing_for_step(next, cart);
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }

        if !self.completed_steps.contains(&self.step) {
            self.completed_steps.push(self.step);
        }
        self.step = next;

        Ok(next)
    }

    /// Go back to the previous step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = self.step.prev().ok_or_else(|| CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: "none".to_string(),
        })?;
        self.step = prev;
        Ok(prev)
    }

    /// Go to a specific step (if allowed).
    pub fn go_to(&mut self, step: CheckoutStep, cart: &Cart) -> Result<(), CommerceError> {
        if self.step == CheckoutStep::HandedOff {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: step.as_str().to_string(),
            });
        }
        if step == self.step || self.completed_steps.contains(&step) {
            self.step = step;
            Ok(())
        } else if self.step.next() == Some(step) && step != CheckoutStep::HandedOff {
            self.advance(cart)?;
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: step.as_str().to_string(),
            })
        }
    }

    /// Get what's missing to reach a step.
    fn missing_for_step(&self, step: CheckoutStep, cart: &Cart) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if step == CheckoutStep::Cart {
            return missing;
        }
        if cart.is_empty() {
            missing.push("itens no carrinho");
        }
        if step.number() >= CheckoutStep::Delivery.number() {
            missing.extend(self.contact.missing_fields());
        }
        if step.number() >= CheckoutStep::Review.number() {
            missing.extend(self.address.missing_fields());
            if self.shipping.is_none() {
                missing.push("frete");
            }
        }
        missing
    }

    pub fn set_contact(&mut self, contact: Contact) {
        self.contact = contact;
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    /// Fill the address from a postal lookup result.
    pub fn apply_postal_lookup(&mut self, found: &PostalAddress) {
        self.address.apply_lookup(found);
    }

    pub fn select_shipping(&mut self, quote: ShippingQuote) {
        self.shipping = Some(quote);
    }

    pub fn set_payment(&mut self, payment: PaymentPreference) {
        self.payment = payment;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
    }

    /// Redeem a coupon code from `book`.
    ///
    /// An invalid code leaves any previously applied coupon in place.
    pub fn apply_coupon(&mut self, book: &CouponBook, code: &str) -> Result<&Coupon, CommerceError> {
        let coupon = book.redeem(code)?.clone();
        Ok(&*self.coupon.insert(coupon))
    }

    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Totals for `cart` with the applied coupon and selected shipping.
    pub fn pricing(&self, cart: &Cart) -> CartPricing {
        let shipping = self.shipping.map(|q| q.price).unwrap_or(Money::zero());
        CartPricing::compute(cart, self.coupon.as_ref(), shipping)
    }

    /// Build the order summary for `cart`.
    pub fn summary(&self, cart: &Cart, store_name: &str) -> OrderSummary {
        OrderSummary {
            store_name: store_name.to_string(),
            order_ref: self.order_ref.clone(),
            placed_at: self.started_at,
            lines: cart.lines().to_vec(),
            pricing: self.pricing(cart),
            shipping: self.shipping,
            contact: self.contact.clone(),
            address: self.address.clone(),
            payment: self.payment,
            notes: self.notes.clone(),
        }
    }

    /// Finish checkout: move to [`CheckoutStep::HandedOff`] and return the
    /// deep link the browser should open.
    ///
    /// Only allowed from the review step. The cart is left as it is.
    pub fn hand_off(
        &mut self,
        cart: &Cart,
        handoff: &WhatsAppHandoff,
        store_name: &str,
    ) -> Result<String, CommerceError> {
        if self.step != CheckoutStep::Review {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::HandedOff.as_str().to_string(),
            });
        }
        let summary = self.summary(cart, store_name);
        self.advance(cart)?;

        info!(
            order = %self.order_ref,
            items = cart.item_count(),
            total = %summary.pricing.total,
            "order handed off"
        );
        Ok(handoff.link_for(&summary))
    }

    /// Check if the order was handed off.
    pub fn is_handed_off(&self) -> bool {
        self.step == CheckoutStep::HandedOff
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        self.step.number() * 20
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}
