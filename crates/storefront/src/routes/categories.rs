//! Category listing and category pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::db::ProductFilter;
use crate::filters;
use crate::routes::page::{CategoryView, PageContext, ProductView};
use crate::routes::products::FilterPanel;
use crate::services::catalog::ProductQuery;
use crate::state::AppState;

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub page: PageContext,
    pub categories: Vec<CategoryView>,
}

/// Single category page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub page: PageContext,
    pub category: CategoryView,
    pub panel: FilterPanel,
    pub products: Vec<ProductView>,
}

/// Display every category with its product count.
#[instrument(skip(state, page))]
pub async fn index(State(state): State<AppState>, page: PageContext) -> Response {
    match state.catalog().categories().await {
        Ok(categories) => CategoriesIndexTemplate {
            categories: categories
                .iter()
                .map(|c| CategoryView::new(c, page.locale))
                .collect(),
            page,
        }
        .into_response(),
        Err(e) => page.server_error(&e),
    }
}

/// Display the products of one category, addressed by its lowercase
/// English name (`/categories/hijab`).
#[instrument(skip(state, page))]
pub async fn show(
    State(state): State<AppState>,
    page: PageContext,
    Path(slug): Path<String>,
    Query(mut query): Query<ProductQuery>,
) -> Response {
    let catalog = state.catalog();
    let category = match catalog.category_by_name(&slug).await {
        Ok(Some(category)) => category,
        Ok(None) => return page.not_found(),
        Err(e) => return page.server_error(&e),
    };

    let filter = ProductFilter {
        category: Some(category.name.en.clone()),
        ..ProductFilter::default()
    };
    query.category = None;
    let products = match catalog.products(&filter).await {
        Ok(products) => query.apply(products, page.locale),
        Err(e) => return page.server_error(&e),
    };

    CategoryShowTemplate {
        panel: FilterPanel::new(&query, &[], &page),
        products: ProductView::list(&products, page.locale),
        category: CategoryView::new(&category, page.locale),
        page,
    }
    .into_response()
}
