//! Shipping options.
//!
//! Rates are fixed placeholders from the store configuration; nothing here
//! talks to a carrier.

use crate::cart::Cart;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Correios delivery services offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    /// Economy service.
    Pac,
    /// Express service.
    Sedex,
}

impl ShippingMethod {
    /// Display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShippingMethod::Pac => "PAC",
            ShippingMethod::Sedex => "SEDEX",
        }
    }

    /// Parse a method name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pac" => Some(ShippingMethod::Pac),
            "sedex" => Some(ShippingMethod::Sedex),
            _ => None,
        }
    }
}

/// Placeholder price and delivery window for one method.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingRate {
    /// Price in centavos.
    pub price: Money,
    /// Minimum business days.
    pub min_days: u32,
    /// Maximum business days.
    pub max_days: u32,
}

/// The configured placeholder rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingRates {
    pub pac: ShippingRate,
    pub sedex: ShippingRate,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            pac: ShippingRate {
                price: Money::new(2_490),
                min_days: 6,
                max_days: 10,
            },
            sedex: ShippingRate {
                price: Money::new(4_590),
                min_days: 2,
                max_days: 4,
            },
        }
    }
}

impl ShippingRates {
    /// Quote every method for `cart`.
    ///
    /// PAC is free when the whole cart is free-shipping eligible; SEDEX is
    /// always charged.
    pub fn quotes(&self, cart: &Cart) -> Vec<ShippingQuote> {
        vec![
            self.quote(ShippingMethod::Pac, cart),
            self.quote(ShippingMethod::Sedex, cart),
        ]
    }

    /// Quote one method for `cart`.
    pub fn quote(&self, method: ShippingMethod, cart: &Cart) -> ShippingQuote {
        let rate = match method {
            ShippingMethod::Pac => self.pac,
            ShippingMethod::Sedex => self.sedex,
        };
        let price = if method == ShippingMethod::Pac && cart.free_shipping_eligible() {
            Money::zero()
        } else {
            rate.price.non_negative()
        };

        ShippingQuote {
            method,
            price,
            min_days: rate.min_days,
            max_days: rate.max_days.max(rate.min_days),
        }
    }
}

/// A priced shipping option.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingQuote {
    pub method: ShippingMethod,
    pub price: Money,
    pub min_days: u32,
    pub max_days: u32,
}

impl ShippingQuote {
    /// Check if this option is free.
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    /// Delivery window, e.g. "2 a 4 dias úteis".
    pub fn delivery_estimate(&self) -> String {
        if self.min_days == self.max_days {
            format!("{} dias úteis", self.min_days)
        } else {
            format!("{} a {} dias úteis", self.min_days, self.max_days)
        }
    }

    /// Price label, "Grátis" when free.
    pub fn price_label(&self) -> String {
        if self.is_free() {
            "Grátis".to_string()
        } else {
            self.price.display()
        }
    }

    /// Label such as "SEDEX - R$ 45,90 (2 a 4 dias úteis)".
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({})",
            self.method.display_name(),
            self.price_label(),
            self.delivery_estimate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;

    fn cart(free: bool) -> Cart {
        let mut cart = Cart::new();
        cart.add(
            CartItem::new("a", "A", Money::from_reais(100)).with_free_shipping(free),
            1,
        );
        cart
    }

    #[test]
    fn test_quotes_charge_by_default() {
        let rates = ShippingRates::default();
        let quotes = rates.quotes(&cart(false));
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].method, ShippingMethod::Pac);
        assert_eq!(quotes[0].price, Money::new(2_490));
        assert_eq!(quotes[1].price, Money::new(4_590));
    }

    #[test]
    fn test_pac_free_for_eligible_cart() {
        let rates = ShippingRates::default();
        let pac = rates.quote(ShippingMethod::Pac, &cart(true));
        assert!(pac.is_free());
        assert_eq!(pac.price_label(), "Grátis");

        let sedex = rates.quote(ShippingMethod::Sedex, &cart(true));
        assert!(!sedex.is_free());
    }

    #[test]
    fn test_empty_cart_is_not_free() {
        let rates = ShippingRates::default();
        assert!(!rates.quote(ShippingMethod::Pac, &Cart::new()).is_free());
    }

    #[test]
    fn test_labels() {
        let rates = ShippingRates::default();
        let sedex = rates.quote(ShippingMethod::Sedex, &cart(false));
        assert_eq!(sedex.label(), "SEDEX - R$ 45,90 (2 a 4 dias úteis)");
        assert_eq!(ShippingMethod::parse("Sedex"), Some(ShippingMethod::Sedex));
        assert_eq!(ShippingMethod::parse("drone"), None);
    }
}
