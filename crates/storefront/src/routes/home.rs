//! Home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::db::ProductFilter;
use crate::filters;
use crate::routes::page::{CategoryView, PageContext, ProductView};
use crate::state::AppState;

/// Products shown in the home page highlight grid.
const FEATURED_ON_HOME: i64 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub featured: Vec<ProductView>,
    pub categories: Vec<CategoryView>,
}

/// Display the home page: hero, category grid, featured products.
#[instrument(skip(state, page))]
pub async fn home(State(state): State<AppState>, page: PageContext) -> Response {
    let catalog = state.catalog();
    let filter = ProductFilter {
        featured: true,
        limit: Some(FEATURED_ON_HOME),
        ..ProductFilter::default()
    };

    let featured = match catalog.products(&filter).await {
        Ok(products) => ProductView::list(&products, page.locale),
        Err(e) => return page.server_error(&e),
    };
    let categories = match catalog.categories().await {
        Ok(categories) => categories
            .iter()
            .map(|c| CategoryView::new(c, page.locale))
            .collect(),
        Err(e) => return page.server_error(&e),
    };

    HomeTemplate {
        page,
        featured,
        categories,
    }
    .into_response()
}
