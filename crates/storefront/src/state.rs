//! Shared handler state.

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::catalog::{CatalogCache, CatalogService};

/// Cloned into every handler; all fields sit behind one `Arc`.
#[derive(Clone)]
pub struct AppState(Arc<Shared>);

struct Shared {
    config: StorefrontConfig,
    pool: PgPool,
    categories: CatalogCache,
}

impl AppState {
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        Self(Arc::new(Shared {
            config,
            pool,
            categories: CatalogCache::new(),
        }))
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.0.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.0.pool
    }

    /// Cached category list; admin category writes invalidate it.
    #[must_use]
    pub fn catalog_cache(&self) -> &CatalogCache {
        &self.0.categories
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(&self.0.pool, &self.0.categories)
    }

    /// Flat charge added to every order.
    #[must_use]
    pub fn shipping_flat_rate(&self) -> Decimal {
        self.0.config.shipping_flat_rate
    }
}
