//! Search query builder.

use std::cmp::Reverse;

use crate::catalog::Product;
use crate::search::filter::normalize;
use crate::search::{Facet, Filter, Pagination, SearchResults};
use serde::{Deserialize, Serialize};

/// Largest page size a query may request.
pub const MAX_PER_PAGE: usize = 100;

/// Default page size for listing pages.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
}

impl SortOption {
    /// Every sort option, in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::Relevance,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    /// Label shown in the sort menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevância",
            SortOption::PriceAsc => "Menor preço",
            SortOption::PriceDesc => "Maior preço",
            SortOption::NameAsc => "Nome: A-Z",
            SortOption::NameDesc => "Nome: Z-A",
        }
    }

    /// Parse the kebab-case name used in URLs and on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(SortOption::Relevance),
            "price-asc" => Some(SortOption::PriceAsc),
            "price-desc" => Some(SortOption::PriceDesc),
            "name-asc" => Some(SortOption::NameAsc),
            "name-desc" => Some(SortOption::NameDesc),
            _ => None,
        }
    }

    /// Stable sort of products; ties keep catalog order.
    fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOption::Relevance => {}
            SortOption::PriceAsc => products.sort_by_key(|p| p.price),
            SortOption::PriceDesc => products.sort_by_key(|p| Reverse(p.price)),
            SortOption::NameAsc => products.sort_by_cached_key(|p| normalize(&p.name)),
            SortOption::NameDesc => {
                products.sort_by_cached_key(|p| Reverse(normalize(&p.name)))
            }
        }
    }
}

/// A search query over the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    /// Free text typed into the search box.
    pub query: Option<String>,
    /// Filters to apply (all must match).
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: None,
            filters: Vec::new(),
            sort: SortOption::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl SearchQuery {
    /// Create a new empty search query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank text is treated as no query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination. The page size is clamped to `1..=100`.
    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Check whether a product passes the text query and every filter.
    pub fn matches(&self, product: &Product) -> bool {
        let text_ok = self
            .query
            .as_ref()
            .map_or(true, |q| Filter::Text(q.clone()).matches(product));
        text_ok && self.filters.iter().all(|f| f.matches(product))
    }

    /// Run the query over products in catalog order.
    pub fn run<'a>(&self, products: &'a [Product]) -> SearchResults<&'a Product> {
        let mut matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        self.sort.apply(&mut matched);

        let selected_brand = self.filters.iter().find_map(|f| match f {
            Filter::Brand(b) => Some(b.as_str()),
            _ => None,
        });
        let mut brands = Facet::new("Marca");
        for product in &matched {
            let selected = selected_brand.is_some_and(|b| b.eq_ignore_ascii_case(&product.brand));
            brands.count(&product.brand, selected);
        }

        let pagination = Pagination::new(self.page, self.per_page, matched.len());
        let items = matched
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();

        tracing::debug!(
            query = ?self.query,
            total = pagination.total,
            page = pagination.page,
            "catalog search"
        );

        SearchResults::new(items, pagination).with_facets(vec![brands])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::Money;

    fn catalog() -> Catalog {
        Catalog::bundled().unwrap()
    }

    #[test]
    fn test_search_query_builder() {
        let query = SearchQuery::new()
            .with_query("iphone")
            .with_filter(Filter::brand("Apple"))
            .with_sort(SortOption::PriceAsc)
            .with_pagination(2, 24);

        assert_eq!(query.query, Some("iphone".to_string()));
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.sort, SortOption::PriceAsc);
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 24);
    }

    #[test]
    fn test_pagination_clamped() {
        let query = SearchQuery::new().with_pagination(0, 1000);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, MAX_PER_PAGE);

        let query = SearchQuery::new().with_pagination(3, 0);
        assert_eq!(query.per_page, 1);
    }

    #[test]
    fn test_blank_query_is_none() {
        assert_eq!(SearchQuery::new().with_query("  ").query, None);
    }

    #[test]
    fn test_run_text_query() {
        let catalog = catalog();
        let results = SearchQuery::new().with_query("iphone").run(catalog.products());
        assert!(!results.is_empty());
        assert!(results.items.iter().all(|p| p.name.to_lowercase().contains("iphone")
            || p.brand == "Apple"));
    }

    #[test]
    fn test_relevance_keeps_catalog_order() {
        let catalog = catalog();
        let results = SearchQuery::new()
            .with_pagination(1, 100)
            .run(catalog.products());
        let ids: Vec<_> = results.items.iter().map(|p| p.id.clone()).collect();
        let expected: Vec<_> = catalog.products().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_price_sorting() {
        let catalog = catalog();
        let asc = SearchQuery::new()
            .with_sort(SortOption::PriceAsc)
            .with_pagination(1, 100)
            .run(catalog.products());
        assert!(asc.items.windows(2).all(|w| w[0].price <= w[1].price));

        let desc = SearchQuery::new()
            .with_sort(SortOption::PriceDesc)
            .with_pagination(1, 100)
            .run(catalog.products());
        assert!(desc.items.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_price_range_and_paging() {
        let catalog = catalog();
        let query = SearchQuery::new()
            .with_filter(Filter::price_range(None, Some(Money::from_reais(3000))))
            .with_pagination(1, 2);
        let results = query.run(catalog.products());
        assert!(results.len() <= 2);
        assert!(results.items.iter().all(|p| p.price <= Money::from_reais(3000)));
        assert_eq!(
            results.pagination.total,
            catalog
                .products()
                .iter()
                .filter(|p| p.price <= Money::from_reais(3000))
                .count()
        );
    }

    #[test]
    fn test_brand_facet_counts_all_matches() {
        let catalog = catalog();
        let results = SearchQuery::new()
            .with_filter(Filter::brand("apple"))
            .with_pagination(1, 1)
            .run(catalog.products());
        let facet = &results.facets[0];
        assert_eq!(facet.values.len(), 1);
        assert_eq!(facet.values[0].value, "Apple");
        assert_eq!(facet.values[0].count, results.pagination.total);
        assert!(facet.values[0].selected);
    }

    #[test]
    fn test_no_matches() {
        let catalog = catalog();
        let results = SearchQuery::new().with_query("nokia").run(catalog.products());
        assert!(results.is_empty());
        assert_eq!(results.pagination.total_pages, 1);
    }

    #[test]
    fn test_sort_parse() {
        for sort in SortOption::ALL {
            let name = serde_json::to_value(sort).unwrap();
            assert_eq!(SortOption::parse(name.as_str().unwrap()), Some(sort));
        }
        assert_eq!(SortOption::parse("best-selling"), None);
    }
}
