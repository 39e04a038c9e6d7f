//! The static catalog.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::ids::{slugify, ProductId};
use crate::CommerceError;

/// Catalog shipped with the crate.
const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Read-only, ordered product catalog.
///
/// Loaded once and never mutated; every query is a linear pass in catalog
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-parsed parts.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut catalog = Self {
            categories,
            products,
        };
        catalog.normalize()?;
        Ok(catalog)
    }

    /// Parse a catalog from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let mut catalog: Catalog = serde_json::from_str(json)
            .map_err(|e| CommerceError::InvalidCatalog(e.to_string()))?;
        catalog.normalize()?;
        Ok(catalog)
    }

    /// Load a catalog JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CommerceError::InvalidCatalog(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// The catalog bundled with this crate.
    pub fn bundled() -> Result<Self, CommerceError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Fill derived fields and reject duplicate ids.
    fn normalize(&mut self) -> Result<(), CommerceError> {
        let mut seen = HashSet::new();
        for product in &mut self.products {
            if !seen.insert(product.id.clone()) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
            if product.slug.is_empty() {
                product.slug = slugify(&product.name);
            }
        }
        Ok(())
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories in catalog order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by id or slug; a missing product is an error the
    /// product page renders as "not found".
    pub fn product(&self, id_or_slug: &str) -> Result<&Product, CommerceError> {
        self.products
            .iter()
            .find(|p| p.id.as_str() == id_or_slug || p.slug == id_or_slug)
            .ok_or_else(|| CommerceError::ProductNotFound(id_or_slug.to_string()))
    }

    /// Look up a category by slug.
    pub fn category(&self, slug: &str) -> Result<&Category, CommerceError> {
        self.categories
            .iter()
            .find(|c| c.matches(slug))
            .ok_or_else(|| CommerceError::CategoryNotFound(slug.to_string()))
    }

    /// Products listed under a category.
    pub fn by_category(&self, slug: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.in_category(slug)).collect()
    }

    /// Products from a brand (case-insensitive).
    pub fn by_brand(&self, brand: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.brand.eq_ignore_ascii_case(brand))
            .collect()
    }

    /// Distinct brands in order of first appearance.
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();
        for product in &self.products {
            if !brands.iter().any(|b| b.eq_ignore_ascii_case(&product.brand)) {
                brands.push(&product.brand);
            }
        }
        brands
    }

    /// Products carrying a merchandising tag, for the home page shelf.
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.tag.is_some()).collect()
    }

    /// Products with a compare-at price above the current price.
    pub fn on_sale(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_on_sale()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.category("apple").is_ok());
        assert!(catalog.products().iter().all(|p| !p.slug.is_empty()));
    }

    #[test]
    fn test_product_lookup() {
        let catalog = Catalog::bundled().unwrap();
        let p = catalog.product("iphone-15-128").unwrap();
        assert_eq!(p.brand, "Apple");

        let by_slug = catalog.product(&p.slug).unwrap();
        assert_eq!(by_slug.id, p.id);

        let missing = catalog.product("nokia-3310");
        assert!(matches!(missing, Err(CommerceError::ProductNotFound(id)) if id == "nokia-3310"));
    }

    #[test]
    fn test_category_pages() {
        let catalog = Catalog::bundled().unwrap();
        let samsung = catalog.by_category("samsung");
        assert!(!samsung.is_empty());
        assert!(samsung.iter().all(|p| p.brand == "Samsung"));
        assert!(catalog.category("nokia").is_err());
    }

    #[test]
    fn test_brands_in_first_appearance_order() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.brands(), vec!["Apple", "Samsung", "Motorola", "Xiaomi"]);
    }

    #[test]
    fn test_featured_and_on_sale() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.featured().iter().all(|p| p.tag.is_some()));
        assert!(catalog.on_sale().iter().all(|p| p.is_on_sale()));
        assert!(!catalog.on_sale().is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let a = Product::new("x", "Brand", "Phone", Money::from_reais(1));
        let b = Product::new("x", "Brand", "Phone 2", Money::from_reais(2));
        let result = Catalog::new(Vec::new(), vec![a, b]);
        assert!(matches!(result, Err(CommerceError::InvalidCatalog(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Catalog::from_json("{\"products\": 3}"),
            Err(CommerceError::InvalidCatalog(_))
        ));
    }
}
