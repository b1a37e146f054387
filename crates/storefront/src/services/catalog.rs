//! Catalog queries, category caching, and storefront filter/sort.
//!
//! The JSON API filters in SQL (see [`ProductFilter`]); the product and
//! category pages load the newest-first list once and narrow it in memory
//! with [`ProductQuery`], which keeps the filter form state in the URL.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, instrument};

use elegant_core::{Locale, ProductId};

use crate::db::{CategoryRepository, ProductFilter, ProductRepository, RepositoryError};
use crate::models::category::Category;
use crate::models::product::Product;

/// Number of related products shown on a product page.
const RELATED_PRODUCTS: i64 = 4;

/// Cache key for catalog data.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Categories,
}

/// In-memory cache of the category list (5-minute TTL).
///
/// Entries carry per-category product counts, so admin product and category
/// writes both call [`CatalogCache::invalidate`].
#[derive(Clone)]
pub struct CatalogCache {
    categories: Cache<CacheKey, Arc<Vec<Category>>>,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Cache::builder()
                .max_capacity(16)
                .time_to_live(Duration::from_secs(300)) // 5 minutes
                .build(),
        }
    }

    /// Drop all cached entries.
    pub async fn invalidate(&self) {
        self.categories.invalidate_all();
        self.categories.run_pending_tasks().await;
    }
}

/// Read access to products and categories.
pub struct CatalogService<'a> {
    pool: &'a PgPool,
    cache: &'a CatalogCache,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, cache: &'a CatalogCache) -> Self {
        Self { pool, cache }
    }

    /// All categories, from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, RepositoryError> {
        if let Some(categories) = self.cache.categories.get(&CacheKey::Categories).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories = Arc::new(CategoryRepository::new(self.pool).list().await?);
        self.cache
            .categories
            .insert(CacheKey::Categories, Arc::clone(&categories))
            .await;
        Ok(categories)
    }

    /// A category by English name, ignoring ASCII case so that page slugs
    /// like `hijab` resolve.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let categories = self.categories().await?;
        Ok(categories
            .iter()
            .find(|c| c.name.en.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Products matching the catalog filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(self.pool).list(filter).await
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(self.pool).get_by_id(id).await
    }

    /// Other products from the same category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn related(&self, product: &Product) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(self.pool)
            .list_related(product, RELATED_PRODUCTS)
            .await
    }
}

// =============================================================================
// Page filters
// =============================================================================

/// Price bucket offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    /// Strictly below 100.
    Under100,
    /// 100 to 300, both ends included.
    From100To300,
    /// Strictly above 300.
    Over300,
}

impl PriceRange {
    pub const ALL: [Self; 4] = [Self::All, Self::Under100, Self::From100To300, Self::Over300];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Under100 => "under-100",
            Self::From100To300 => "100-300",
            Self::Over300 => "over-300",
        }
    }

    /// Whether `price` falls in this bucket.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        let hundred = Decimal::from(100);
        let three_hundred = Decimal::from(300);
        match self {
            Self::All => true,
            Self::Under100 => price < hundred,
            Self::From100To300 => price >= hundred && price <= three_hundred,
            Self::Over300 => price > three_hundred,
        }
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| format!("unknown price range: {s}"))
    }
}

/// Sort order offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Stored order (newest first).
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// By name in the active locale.
    Name,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [Self::Featured, Self::PriceLow, Self::PriceHigh, Self::Name];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| format!("unknown sort order: {s}"))
    }
}

/// Filter form state from the products and category page query string.
///
/// Unknown values fall back to the defaults rather than failing the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
}

impl ProductQuery {
    /// Trimmed search term, if any.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Selected category name; `all` or empty means no category filter.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "all")
    }

    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        self.price
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Filter and sort `products` for display in `locale`.
    ///
    /// Search matches the English name case-insensitively or the Arabic name
    /// as typed. Sorting is stable, so `featured` keeps the stored order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>, locale: Locale) -> Vec<Product> {
        let search = self.search_term().map(|s| (s.to_lowercase(), s));
        let category = self.category_name();
        let price_range = self.price_range();

        let mut matching: Vec<Product> = products
            .into_iter()
            .filter(|p| {
                search.as_ref().is_none_or(|(lower, raw)| {
                    p.name.en.to_lowercase().contains(lower.as_str()) || p.name.ar.contains(raw)
                })
            })
            .filter(|p| category.is_none_or(|c| p.category_name == c))
            .filter(|p| price_range.contains(p.price))
            .collect();

        match self.sort_order() {
            SortOrder::Featured => {}
            SortOrder::PriceLow => matching.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => matching.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Name => matching.sort_by_cached_key(|p| p.name.text(locale).to_lowercase()),
        }

        matching
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use elegant_core::{CategoryId, Localized};

    use super::*;

    fn product(id: i32, en: &str, ar: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: Localized::new(en.to_owned(), ar.to_owned()),
            description: Localized::default(),
            price: Decimal::from(price),
            image: None,
            category_id: CategoryId::new(1),
            category_name: category.to_owned(),
            sizes: vec![],
            colors: vec![],
            in_stock: true,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Silk Hijab", "حجاب حريري", "Hijab", 89),
            product(2, "Classic Abaya", "عباية كلاسيكية", "Abaya", 299),
            product(3, "Evening Dress", "فستان سهرة", "Dresses", 450),
            product(4, "Chiffon Hijab", "حجاب شيفون", "Hijab", 100),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_default_query_keeps_stored_order() {
        let query = ProductQuery::default();
        assert_eq!(ids(&query.apply(catalog(), Locale::En)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_matches_either_language() {
        let query = ProductQuery {
            search: Some("HIJAB".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&query.apply(catalog(), Locale::En)), vec![1, 4]);

        let query = ProductQuery {
            search: Some("عباية".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&query.apply(catalog(), Locale::Ar)), vec![2]);
    }

    #[test]
    fn test_category_all_means_no_filter() {
        let query = ProductQuery {
            category: Some("all".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(query.apply(catalog(), Locale::En).len(), 4);

        let query = ProductQuery {
            category: Some("Hijab".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&query.apply(catalog(), Locale::En)), vec![1, 4]);
    }

    #[test]
    fn test_price_ranges_include_boundaries() {
        assert!(PriceRange::From100To300.contains(Decimal::from(100)));
        assert!(PriceRange::From100To300.contains(Decimal::from(300)));
        assert!(!PriceRange::Under100.contains(Decimal::from(100)));
        assert!(!PriceRange::Over300.contains(Decimal::from(300)));

        let query = ProductQuery {
            price: Some("100-300".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&query.apply(catalog(), Locale::En)), vec![2, 4]);
    }

    #[test]
    fn test_sort_orders() {
        let sorted = |sort: &str, locale| {
            let query = ProductQuery {
                sort: Some(sort.to_owned()),
                ..ProductQuery::default()
            };
            ids(&query.apply(catalog(), locale))
        };

        assert_eq!(sorted("price-low", Locale::En), vec![1, 4, 2, 3]);
        assert_eq!(sorted("price-high", Locale::En), vec![3, 2, 4, 1]);
        assert_eq!(sorted("name", Locale::En), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        let query = ProductQuery {
            price: Some("cheap".to_owned()),
            sort: Some("random".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(query.price_range(), PriceRange::All);
        assert_eq!(query.sort_order(), SortOrder::Featured);
    }
}
