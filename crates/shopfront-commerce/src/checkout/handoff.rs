//! Messaging-app handoff.
//!
//! Checkout ends by opening a WhatsApp chat with the store, pre-filled with
//! the order. Nothing is stored server-side; the message is the order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CartPricing};
use crate::checkout::{Address, Contact, PaymentPreference, ShippingQuote};
use crate::ids::OrderRef;
use crate::CommerceError;

/// Base of the click-to-chat deep link.
pub const WHATSAPP_LINK_BASE: &str = "https://wa.me";

/// Brazilian country calling code, prepended to local numbers.
const BRAZIL_CALLING_CODE: &str = "55";

/// The store's WhatsApp recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppHandoff {
    number: String,
}

impl WhatsAppHandoff {
    /// Validate a recipient number such as `+55 (11) 99999-0000`.
    ///
    /// Separators are ignored. Ten or eleven digits are taken as a local
    /// number with area code and get the Brazilian calling code prepended;
    /// twelve or thirteen digits must already start with it.
    pub fn new(number: &str) -> Result<Self, CommerceError> {
        let invalid = || CommerceError::InvalidPhoneNumber(number.trim().to_string());

        let mut digits = String::new();
        for ch in number.trim().chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '+' | '(' | ')' | '-' | '.' => {}
                _ => return Err(invalid()),
            }
        }

        let digits = match digits.len() {
            10 | 11 => format!("{}{}", BRAZIL_CALLING_CODE, digits),
            12 | 13 if digits.starts_with(BRAZIL_CALLING_CODE) => digits,
            _ => return Err(invalid()),
        };
        Ok(Self { number: digits })
    }

    /// Digits including the calling code.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Deep link that opens a chat pre-filled with `message`.
    pub fn link(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            WHATSAPP_LINK_BASE,
            self.number,
            urlencoding::encode(message)
        )
    }

    /// Deep link for an order summary.
    pub fn link_for(&self, summary: &OrderSummary) -> String {
        self.link(&summary.message())
    }
}

/// Everything the seller needs to complete an order by chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub store_name: String,
    pub order_ref: OrderRef,
    pub placed_at: NaiveDateTime,
    pub lines: Vec<CartLine>,
    pub pricing: CartPricing,
    pub shipping: Option<ShippingQuote>,
    pub contact: Contact,
    pub address: Address,
    pub payment: PaymentPreference,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderSummary {
    /// Render the pre-filled chat message.
    pub fn message(&self) -> String {
        let mut out = Vec::new();

        out.push(format!("*Novo pedido - {}*", self.store_name));
        out.push(format!("Pedido: {}", self.order_ref));
        out.push(format!("Data: {}", self.placed_at.format("%d/%m/%Y %H:%M")));
        out.push(String::new());

        out.push("*Itens*".to_string());
        for line in &self.lines {
            let variant = line
                .variant_label()
                .map(|v| format!(" ({})", v))
                .unwrap_or_default();
            out.push(format!(
                "{}x {}{} - {}",
                line.quantity,
                line.item.name,
                variant,
                line.total().display()
            ));
        }
        out.push(String::new());

        out.push(format!("Subtotal: {}", self.pricing.subtotal.display()));
        if let Some(code) = &self.pricing.coupon_code {
            out.push(format!("Cupom {}: -{}", code, self.pricing.discount.display()));
        }
        match &self.shipping {
            Some(quote) => out.push(format!(
                "Frete ({}): {}",
                quote.method.display_name(),
                quote.price_label()
            )),
            None => out.push("Frete: a combinar".to_string()),
        }
        out.push(format!("*Total: {}*", self.pricing.total.display()));
        out.push(String::new());

        out.push("*Cliente*".to_string());
        out.push(format!("Nome: {}", self.contact.name.trim()));
        out.push(format!("Telefone: {}", self.contact.phone.trim()));
        if let Some(email) = self.contact.email.as_deref().filter(|e| !e.trim().is_empty()) {
            out.push(format!("E-mail: {}", email.trim()));
        }
        out.push(String::new());

        out.push("*Entrega*".to_string());
        out.push(self.address.one_line());
        out.push(String::new());

        out.push(format!("Pagamento: {}", self.payment.display_name()));
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            out.push(format!("Observações: {}", notes.trim()));
        }

        out.join("\n")
    }
}
