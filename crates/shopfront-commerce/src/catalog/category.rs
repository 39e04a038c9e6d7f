//! Category types for catalog pages.

use serde::{Deserialize, Serialize};

/// A catalog category page (e.g. a brand or a promotion shelf).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// URL-friendly slug, referenced by `Product::categories`.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Short blurb shown at the top of the category page.
    #[serde(default)]
    pub description: Option<String>,
    /// Banner image reference.
    #[serde(default)]
    pub image: Option<String>,
}

impl Category {
    /// Create a new category.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            description: None,
            image: None,
        }
    }

    /// Check whether this category is addressed by `slug`.
    pub fn matches(&self, slug: &str) -> bool {
        self.slug.eq_ignore_ascii_case(slug)
    }
}
