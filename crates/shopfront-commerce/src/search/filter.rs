//! Search filters evaluated against catalog products.

use crate::catalog::Product;
use crate::ids::fold_accent;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A search filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Every whitespace-separated token must appear in brand, name or tag.
    Text(String),
    /// Filter by brand (case-insensitive).
    Brand(String),
    /// Filter by category slug.
    Category(String),
    /// Filter by price range (inclusive bounds).
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only products that ship for free.
    FreeShipping,
    /// Filter by merchandising tag.
    Tag(String),
    /// Only products priced below their compare-at price.
    OnSale,
}

impl Filter {
    /// Create a text filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a brand filter.
    pub fn brand(brand: impl Into<String>) -> Self {
        Filter::Brand(brand.into())
    }

    /// Create a category filter.
    pub fn category(slug: impl Into<String>) -> Self {
        Filter::Category(slug.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a tag filter.
    pub fn tag(tag: impl Into<String>) -> Self {
        Filter::Tag(tag.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => {
                let haystack = normalize(&format!(
                    "{} {} {}",
                    product.brand,
                    product.name,
                    product.tag.as_deref().unwrap_or("")
                ));
                normalize(query)
                    .split_whitespace()
                    .all(|token| haystack.contains(token))
            }
            Filter::Brand(brand) => product.brand.eq_ignore_ascii_case(brand),
            Filter::Category(slug) => product.in_category(slug),
            Filter::PriceRange { min, max } => {
                min.map_or(true, |min| product.price >= min)
                    && max.map_or(true, |max| product.price <= max)
            }
            Filter::FreeShipping => product.free_shipping,
            Filter::Tag(tag) => product.has_tag(tag),
            Filter::OnSale => product.is_on_sale(),
        }
    }
}

/// Lowercase and strip Portuguese accents so "lancamento" finds "Lançamento".
pub(crate) fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        let mut p = Product::new(
            "galaxy-s24",
            "Samsung",
            "Galaxy S24 Ultra 512GB",
            Money::from_reais(8999),
        );
        p.tag = Some("Lançamento".into());
        p.categories = vec!["samsung".into()];
        p
    }

    #[test]
    fn test_text_filter_all_tokens() {
        let p = product();
        assert!(Filter::text("galaxy ultra").matches(&p));
        assert!(Filter::text("SAMSUNG s24").matches(&p));
        assert!(Filter::text("lancamento").matches(&p));
        assert!(!Filter::text("galaxy mini").matches(&p));
        // Empty text matches everything.
        assert!(Filter::text("   ").matches(&p));
    }

    #[test]
    fn test_price_range_inclusive() {
        let p = product();
        let exact = Some(Money::from_reais(8999));
        assert!(Filter::price_range(exact, exact).matches(&p));
        assert!(Filter::price_range(None, Some(Money::from_reais(9000))).matches(&p));
        assert!(!Filter::price_range(Some(Money::from_reais(9000)), None).matches(&p));
    }

    #[test]
    fn test_flag_filters() {
        let mut p = product();
        assert!(!Filter::FreeShipping.matches(&p));
        assert!(!Filter::OnSale.matches(&p));
        p.free_shipping = true;
        p.compare_at_price = Some(Money::from_reais(9999));
        assert!(Filter::FreeShipping.matches(&p));
        assert!(Filter::OnSale.matches(&p));
    }

    #[test]
    fn test_brand_category_tag() {
        let p = product();
        assert!(Filter::brand("samsung").matches(&p));
        assert!(!Filter::brand("apple").matches(&p));
        assert!(Filter::category("samsung").matches(&p));
        assert!(Filter::tag("lançamento").matches(&p));
    }
}
