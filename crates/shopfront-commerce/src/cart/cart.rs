//! Cart and line types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity a single line can reach; further additions saturate.
pub const MAX_QUANTITY_PER_LINE: u32 = 9999;

/// Everything about a cart line except its quantity.
///
/// This is what product cards and the product page hand to
/// [`CartStore::add`](crate::cart::CartStore::add).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line key. Lines are unique by this id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price per unit.
    pub unit_price: Money,
    /// Image reference, not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Selected colour, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_color: Option<String>,
    /// Selected storage size, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_storage: Option<String>,
    /// Catalog free-shipping flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_shipping_eligible: Option<bool>,
}

impl CartItem {
    /// Create an item with only the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image: None,
            variant_color: None,
            variant_storage: None,
            free_shipping_eligible: None,
        }
    }

    /// Set the free-shipping flag.
    pub fn with_free_shipping(mut self, eligible: bool) -> Self {
        self.free_shipping_eligible = Some(eligible);
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line.
    pub fn new(item: CartItem, quantity: u32) -> Self {
        Self { item, quantity }
    }

    /// The line key.
    pub fn id(&self) -> &ProductId {
        &self.item.id
    }

    /// `unit_price * quantity`.
    pub fn total(&self) -> Money {
        self.item.unit_price * i64::from(self.quantity)
    }

    /// Variant description such as "Preto, 256 GB".
    pub fn variant_label(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.item.variant_color.as_deref(),
            self.item.variant_storage.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// The cart aggregate: ordered lines, unique by id.
///
/// Derived values are computed from `lines` on every call.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// Lines with a zero quantity are dropped and repeated ids are merged
    /// into the first occurrence, so the result always holds the cart
    /// invariants.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line.item, line.quantity);
        }
        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find a line by id.
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// True only for a non-empty cart whose every line is flagged eligible.
    pub fn free_shipping_eligible(&self) -> bool {
        !self.lines.is_empty()
            && self
                .lines
                .iter()
                .all(|l| l.item.free_shipping_eligible == Some(true))
    }

    /// Add `quantity` units of `item`. Returns whether the cart changed.
    ///
    /// An existing line only gains quantity; its price and metadata stay as
    /// they were. Quantities stop at [`MAX_QUANTITY_PER_LINE`], so adding to a
    /// full line leaves the cart unchanged and returns `false`.
    pub fn add(&mut self, item: CartItem, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.position(&item.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                let next = line.quantity.saturating_add(quantity).min(MAX_QUANTITY_PER_LINE);
                let changed = next != line.quantity;
                line.quantity = next;
                changed
            }
            None => {
                self.lines
                    .push(CartLine::new(item, quantity.min(MAX_QUANTITY_PER_LINE)));
                true
            }
        }
    }

    /// Remove a line regardless of quantity.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.lines.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Raise a line's quantity by `step`.
    pub fn increase(&mut self, id: &ProductId, step: u32) -> bool {
        match self.quantity_of(id) {
            Some(current) => self.set_quantity(id, current.saturating_add(step)),
            None => false,
        }
    }

    /// Lower a line's quantity by `step`, removing it at zero.
    pub fn decrease(&mut self, id: &ProductId, step: u32) -> bool {
        match self.quantity_of(id) {
            Some(current) => self.set_quantity(id, current.saturating_sub(step)),
            None => false,
        }
    }

    /// Set a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        if quantity == 0 {
            self.lines.remove(idx);
            return true;
        }
        let line = &mut self.lines[idx];
        let next = quantity.min(MAX_QUANTITY_PER_LINE);
        let changed = next != line.quantity;
        line.quantity = next;
        changed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.id() == id)
    }

    fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.line(id).map(|l| l.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, reais: i64) -> CartItem {
        CartItem::new(id, format!("Produto {id}"), Money::from_reais(reais))
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_add_accumulates_and_keeps_metadata() {
        let mut cart = Cart::new();
        cart.add(item("a", 100), 1);

        let mut changed = item("a", 999);
        changed.name = "Outro nome".into();
        assert!(cart.add(changed, 2));

        assert_eq!(cart.line_count(), 1);
        let line = cart.line(&pid("a")).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.item.unit_price, Money::from_reais(100));
        assert_eq!(line.item.name, "Produto a");
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.add(item("a", 100), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item("b", 1), 1);
        cart.add(item("a", 1), 1);
        cart.add(item("b", 1), 1);
        let ids: Vec<_> = cart.lines().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_decrease_removes_at_zero() {
        let mut cart = Cart::new();
        cart.add(item("a", 10), 2);
        assert!(cart.decrease(&pid("a"), 1));
        assert_eq!(cart.line(&pid("a")).unwrap().quantity, 1);
        assert!(cart.decrease(&pid("a"), 5));
        assert!(cart.line(&pid("a")).is_none());
        assert!(!cart.decrease(&pid("a"), 1));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(item("a", 10), 2);
        assert!(cart.set_quantity(&pid("a"), 7));
        assert_eq!(cart.item_count(), 7);
        assert!(!cart.set_quantity(&pid("a"), 7));
        assert!(!cart.set_quantity(&pid("missing"), 3));
        assert!(cart.set_quantity(&pid("a"), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add(item("a", 1), u32::MAX);
        cart.increase(&pid("a"), u32::MAX);
        assert_eq!(cart.item_count(), u64::from(MAX_QUANTITY_PER_LINE));
    }

    #[test]
    fn test_derived_values() {
        let mut cart = Cart::new();
        cart.add(item("a", 100), 2);
        cart.add(item("b", 200), 1);
        assert_eq!(cart.subtotal(), Money::from_reais(400));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.line_count(), 2);

        cart.remove(&pid("a"));
        assert_eq!(cart.subtotal(), Money::from_reais(200));
    }

    #[test]
    fn test_free_shipping_aggregate() {
        let mut cart = Cart::new();
        assert!(!cart.free_shipping_eligible());

        cart.add(item("a", 1).with_free_shipping(true), 1);
        assert!(cart.free_shipping_eligible());

        cart.add(item("b", 1), 1);
        assert!(!cart.free_shipping_eligible());

        cart.clear();
        assert!(!cart.free_shipping_eligible());
    }

    #[test]
    fn test_from_lines_normalizes() {
        let cart = Cart::from_lines(vec![
            CartLine::new(item("a", 1), 2),
            CartLine::new(item("b", 1), 0),
            CartLine::new(item("a", 5), 1),
        ]);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(&pid("a")).unwrap().quantity, 3);
    }

    #[test]
    fn test_line_json_shape() {
        let line = CartLine::new(item("a", 10).with_free_shipping(true), 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["unitPrice"], 1000);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["freeShippingEligible"], true);
        assert!(json.get("variantColor").is_none());
    }

    #[test]
    fn test_variant_label() {
        let mut i = item("a", 1);
        assert_eq!(CartLine::new(i.clone(), 1).variant_label(), None);
        i.variant_color = Some("Preto".into());
        i.variant_storage = Some("256 GB".into());
        assert_eq!(
            CartLine::new(i, 1).variant_label().as_deref(),
            Some("Preto, 256 GB")
        );
    }
}
