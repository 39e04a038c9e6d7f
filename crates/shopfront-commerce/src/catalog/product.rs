//! Product types.

use crate::cart::CartItem;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A phone (or accessory) in the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable product identifier.
    pub id: ProductId,
    /// Manufacturer (e.g., "Apple").
    pub brand: String,
    /// Display name.
    pub name: String,
    /// URL-friendly slug. Derived from the name when the source omits it.
    #[serde(default)]
    pub slug: String,
    /// Image reference (URL or path).
    #[serde(default)]
    pub image: Option<String>,
    /// Current price.
    #[serde(rename = "priceCents")]
    pub price: Money,
    /// Original price, shown struck through when higher than `price`.
    #[serde(default, rename = "compareAtPriceCents")]
    pub compare_at_price: Option<Money>,
    /// Merchandising tag (e.g., "Lançamento", "Oferta").
    #[serde(default)]
    pub tag: Option<String>,
    /// Whether this product ships for free.
    #[serde(default)]
    pub free_shipping: bool,
    /// Category slugs this product is listed under.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Available colours.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Available storage sizes (e.g., "128 GB").
    #[serde(default)]
    pub storage: Vec<String>,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Create a product with the required fields.
    pub fn new(
        id: impl Into<ProductId>,
        brand: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            brand: brand.into(),
            slug: crate::ids::slugify(&name),
            name,
            image: None,
            price,
            compare_at_price: None,
            tag: None,
            free_shipping: false,
            categories: Vec::new(),
            colors: Vec::new(),
            storage: Vec::new(),
            description: None,
        }
    }

    /// Check if this product is on sale (compare-at price above price).
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .map(|cap| cap > self.price)
            .unwrap_or(false)
    }

    /// Whole-number discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<u32> {
        let cap = self.compare_at_price?;
        if cap <= self.price || !cap.is_positive() {
            return None;
        }
        let savings = (cap - self.price).amount_cents as i128;
        Some((savings * 100 / cap.amount_cents as i128) as u32)
    }

    /// Check if the product is listed under a category.
    pub fn in_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(slug))
    }

    /// Check the merchandising tag, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag
            .as_deref()
            .map(|t| t.to_lowercase() == tag.to_lowercase())
            .unwrap_or(false)
    }

    /// Build the item to add to the cart, keyed by the product id.
    pub fn to_cart_item(&self, color: Option<&str>, storage: Option<&str>) -> CartItem {
        CartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            image: self.image.clone(),
            variant_color: color.map(str::to_string),
            variant_storage: storage.map(str::to_string),
            free_shipping_eligible: Some(self.free_shipping),
        }
    }

    /// Build a cart item keyed by a variant-specific id, so different
    /// colours or storage sizes become separate cart lines.
    pub fn to_variant_cart_item(&self, color: Option<&str>, storage: Option<&str>) -> CartItem {
        let mut item = self.to_cart_item(color, storage);
        item.id = self.id.with_variant(color, storage);
        item
    }
}
