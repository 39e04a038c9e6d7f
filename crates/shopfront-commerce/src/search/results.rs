//! Search results and pagination.

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page)
        };

        Self {
            page: page.max(1),
            per_page,
            total,
            total_pages,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get start item number (1-indexed, 0 when empty).
    pub fn start_item(&self) -> usize {
        if self.total == 0 || self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }

    /// Page numbers to render, centred on the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 12, 0)
    }
}

/// Search results container.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    /// The items on the current page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
    /// Brand facet over all matches (not just this page).
    pub facets: Vec<Facet>,
}

impl<T> SearchResults<T> {
    /// Create new search results.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self {
            items,
            pagination,
            facets: Vec::new(),
        }
    }

    /// Set facets.
    pub fn with_facets(mut self, facets: Vec<Facet>) -> Self {
        self.facets = facets;
        self
    }

    /// Check if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A facet with per-value counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Marca").
    pub name: String,
    /// Facet values in order of first appearance.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create an empty facet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Count one occurrence of `value`.
    pub fn count(&mut self, value: &str, selected: bool) {
        match self.values.iter_mut().find(|v| v.value == value) {
            Some(existing) => existing.count += 1,
            None => self.values.push(FacetValue {
                value: value.to_string(),
                count: 1,
                selected,
            }),
        }
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of matches with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next());
        assert!(p.has_prev());
        assert_eq!(p.offset(), 10);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 12, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next());
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_pagination_clamps_inputs() {
        let p = Pagination::new(0, 0, 3);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let first = Pagination::new(1, 10, 100);
        assert_eq!(first.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let last = Pagination::new(10, 10, 100);
        assert_eq!(last.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let few = Pagination::new(1, 10, 25);
        assert_eq!(few.page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_facet_counting() {
        let mut facet = Facet::new("Marca");
        facet.count("Apple", false);
        facet.count("Samsung", true);
        facet.count("Apple", false);
        assert_eq!(facet.values[0].count, 2);
        assert_eq!(facet.values[1].value, "Samsung");
        assert!(facet.values[1].selected);
    }
}
