//! Payment preference.
//!
//! The storefront takes no payment. The customer's preferred method is
//! quoted in the handed-off message and settled by the seller in chat.

use serde::{Deserialize, Serialize};

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPreference {
    #[default]
    Pix,
    Card,
    Boleto,
}

impl PaymentPreference {
    pub const ALL: [PaymentPreference; 3] = [
        PaymentPreference::Pix,
        PaymentPreference::Card,
        PaymentPreference::Boleto,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentPreference::Pix => "Pix",
            PaymentPreference::Card => "Cartão de crédito",
            PaymentPreference::Boleto => "Boleto",
        }
    }

    /// Parse a preference name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pix" => Some(PaymentPreference::Pix),
            "card" | "cartao" | "cartão" => Some(PaymentPreference::Card),
            "boleto" => Some(PaymentPreference::Boleto),
            _ => None,
        }
    }
}
