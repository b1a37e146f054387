//! Admin dashboard page.
//!
//! Read-only overview; changes go through the admin JSON API.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::db::{CategoryRepository, OrderRepository, ProductRepository, RepositoryError};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::page::{PageContext, ProductView};
use crate::state::AppState;

/// Products listed on the dashboard.
const DASHBOARD_PRODUCTS: i64 = 20;

/// Headline counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardStats {
    pub products: i64,
    pub categories: i64,
    pub orders: i64,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub page: PageContext,
    pub stats: DashboardStats,
    pub products: Vec<ProductView>,
}

async fn load_stats(state: &AppState) -> Result<DashboardStats, RepositoryError> {
    let pool = state.pool();
    Ok(DashboardStats {
        products: ProductRepository::new(pool).count().await?,
        categories: CategoryRepository::new(pool).count().await?,
        orders: OrderRepository::new(pool).count().await?,
    })
}

/// Display the dashboard: counts and the newest products.
#[instrument(skip(state, page, admin), fields(admin_id = %admin.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    page: PageContext,
    RequireAdmin(admin): RequireAdmin,
) -> Response {
    let stats = match load_stats(&state).await {
        Ok(stats) => stats,
        Err(e) => return page.server_error(&e),
    };
    let products = match ProductRepository::new(state.pool())
        .list_page(1, DASHBOARD_PRODUCTS, None, None)
        .await
    {
        Ok(result) => ProductView::list(&result.products, page.locale),
        Err(e) => return page.server_error(&e),
    };

    DashboardTemplate {
        page,
        stats,
        products,
    }
    .into_response()
}
