//! # Catalog
//!
//! Read-only view over the Catalog Provider's product records.
//!
//! The upstream product API is fetched by the storefront shell; the result
//! lands here via [`Catalog::refresh`] before any add-to-cart can reference
//! it. The engine never fetches: when a product id cannot be resolved the
//! caller simply has nothing to pass to `add_or_adjust`.
//!
//! Browse behavior mirrors the shop grid: pick a category chip, type into
//! the search box, choose a sort order.

use serde::{Deserialize, Serialize};

use bazaar_core::CatalogProduct;

// =============================================================================
// Browse Query
// =============================================================================

/// Sort orders offered by the shop grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    /// Alphabetical by name (the grid's default).
    #[default]
    NameAsc,
    /// Cheapest first.
    PriceLowHigh,
    /// Most expensive first.
    PriceHighLow,
}

/// A shop grid browse request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseQuery {
    /// Category filter; `None` means "All".
    pub category: Option<String>,

    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,

    /// Sort order for the result.
    pub sort: SortOption,
}

impl BrowseQuery {
    /// A query that returns the whole active catalog in name order.
    pub fn all() -> Self {
        BrowseQuery::default()
    }

    /// Builder-style category filter.
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder-style search term.
    pub fn matching(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Builder-style sort order.
    pub fn sorted_by(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory read-only product collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    /// Creates an empty catalog (nothing fetched yet).
    pub fn new() -> Self {
        Catalog {
            products: Vec::new(),
        }
    }

    /// Replaces the catalog contents with a freshly fetched record list.
    pub fn refresh(&mut self, records: Vec<CatalogProduct>) {
        self.products = records;
    }

    /// Looks up a product by id.
    ///
    /// Resolves inactive products too: a cart line added while the product
    /// was active must stay adjustable after the seller pauses it.
    pub fn get(&self, product_id: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks whether anything has been fetched.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Runs a shop grid browse: active products only, filtered by category
    /// and search term, in the requested order.
    pub fn browse(&self, query: &BrowseQuery) -> Vec<&CatalogProduct> {
        let search = query.search.as_deref().unwrap_or("").to_lowercase();

        let mut result: Vec<&CatalogProduct> = self
            .products
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| match &query.category {
                Some(category) => p.category.as_deref() == Some(category.as_str()),
                None => true,
            })
            .filter(|p| search.is_empty() || p.name.to_lowercase().contains(&search))
            .collect();

        match query.sort {
            SortOption::NameAsc => {
                result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            SortOption::PriceLowHigh => {
                result.sort_by_key(|p| p.unit_price_paise);
            }
            SortOption::PriceHighLow => {
                result.sort_by_key(|p| std::cmp::Reverse(p.unit_price_paise));
            }
        }

        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.refresh(vec![
            CatalogProduct::new("p-1", "Tomatoes", 3000).with_category("Vegetables"),
            CatalogProduct::new("p-2", "Alphonso Mangoes", 12_000).with_category("Fruits"),
            CatalogProduct::new("p-3", "Cherry Tomatoes", 6000).with_category("Vegetables"),
            CatalogProduct {
                is_active: false,
                ..CatalogProduct::new("p-4", "Paused Paneer", 9000).with_category("Dairy & Beverages")
            },
        ]);
        catalog
    }

    #[test]
    fn test_get_resolves_inactive_products() {
        let catalog = fixture();
        assert!(catalog.get("p-4").is_some());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_browse_all_excludes_inactive_and_sorts_by_name() {
        let catalog = fixture();
        let result = catalog.browse(&BrowseQuery::all());

        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alphonso Mangoes", "Cherry Tomatoes", "Tomatoes"]);
    }

    #[test]
    fn test_browse_category_filter() {
        let catalog = fixture();
        let result = catalog.browse(&BrowseQuery::all().in_category("Vegetables"));

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.category.as_deref() == Some("Vegetables")));
    }

    #[test]
    fn test_browse_search_is_case_insensitive() {
        let catalog = fixture();
        let result = catalog.browse(&BrowseQuery::all().matching("toma"));

        assert_eq!(result.len(), 2);

        let result = catalog.browse(&BrowseQuery::all().matching("TOMA"));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_browse_price_sorts() {
        let catalog = fixture();

        let cheap_first = catalog.browse(&BrowseQuery::all().sorted_by(SortOption::PriceLowHigh));
        assert_eq!(cheap_first.first().unwrap().unit_price_paise, 3000);

        let dear_first = catalog.browse(&BrowseQuery::all().sorted_by(SortOption::PriceHighLow));
        assert_eq!(dear_first.first().unwrap().unit_price_paise, 12_000);
    }

    #[test]
    fn test_refresh_replaces_contents() {
        let mut catalog = fixture();
        catalog.refresh(vec![CatalogProduct::new("p-9", "Fresh Stock", 100)]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("p-1").is_none());
        assert!(catalog.get("p-9").is_some());
    }
}
