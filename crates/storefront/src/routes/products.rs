//! Product listing and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use elegant_core::ProductId;

use crate::db::ProductFilter;
use crate::filters;
use crate::i18n::Messages;
use crate::models::Category;
use crate::routes::page::{PageContext, ProductView, SelectOption};
use crate::services::catalog::{PriceRange, ProductQuery, SortOrder};
use crate::state::AppState;

/// Filter panel state for the products and category pages.
pub struct FilterPanel {
    pub search: String,
    pub categories: Vec<SelectOption>,
    pub prices: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
}

impl FilterPanel {
    /// Options for `query`, with `categories` offered in the category select.
    #[must_use]
    pub fn new(query: &ProductQuery, categories: &[Category], page: &PageContext) -> Self {
        let t = page.t;
        let selected_category = query.category_name();

        let mut category_options = vec![SelectOption {
            value: "all".to_owned(),
            label: t.all_categories.to_owned(),
            selected: selected_category.is_none(),
        }];
        category_options.extend(categories.iter().map(|c| SelectOption {
            value: c.name.en.clone(),
            label: c.name.text(page.locale).to_owned(),
            selected: selected_category == Some(c.name.en.as_str()),
        }));

        let price_range = query.price_range();
        let sort_order = query.sort_order();

        Self {
            search: query.search_term().unwrap_or_default().to_owned(),
            categories: category_options,
            prices: PriceRange::ALL
                .into_iter()
                .map(|range| SelectOption {
                    value: range.as_str().to_owned(),
                    label: price_label(range, t).to_owned(),
                    selected: range == price_range,
                })
                .collect(),
            sorts: SortOrder::ALL
                .into_iter()
                .map(|order| SelectOption {
                    value: order.as_str().to_owned(),
                    label: sort_label(order, t).to_owned(),
                    selected: order == sort_order,
                })
                .collect(),
        }
    }
}

fn price_label(range: PriceRange, t: &'static Messages) -> &'static str {
    match range {
        PriceRange::All => t.price_all,
        PriceRange::Under100 => t.price_under_100,
        PriceRange::From100To300 => t.price_100_300,
        PriceRange::Over300 => t.price_over_300,
    }
}

fn sort_label(order: SortOrder, t: &'static Messages) -> &'static str {
    match order {
        SortOrder::Featured => t.sort_featured,
        SortOrder::PriceLow => t.sort_price_low,
        SortOrder::PriceHigh => t.sort_price_high,
        SortOrder::Name => t.sort_name,
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub page: PageContext,
    pub panel: FilterPanel,
    pub products: Vec<ProductView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: PageContext,
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
}

/// Display the product listing with search, filters and sorting.
#[instrument(skip(state, page))]
pub async fn index(
    State(state): State<AppState>,
    page: PageContext,
    Query(query): Query<ProductQuery>,
) -> Response {
    let catalog = state.catalog();

    let products = match catalog.products(&ProductFilter::default()).await {
        Ok(products) => query.apply(products, page.locale),
        Err(e) => return page.server_error(&e),
    };
    let categories = match catalog.categories().await {
        Ok(categories) => categories,
        Err(e) => return page.server_error(&e),
    };

    ProductsIndexTemplate {
        panel: FilterPanel::new(&query, &categories, &page),
        products: ProductView::list(&products, page.locale),
        page,
    }
    .into_response()
}

/// Display a product with size/color options and related products.
#[instrument(skip(state, page))]
pub async fn show(
    State(state): State<AppState>,
    page: PageContext,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<i32>().map(ProductId::new) else {
        return page.not_found();
    };

    let catalog = state.catalog();
    let product = match catalog.product(id).await {
        Ok(Some(product)) => product,
        Ok(None) => return page.not_found(),
        Err(e) => return page.server_error(&e),
    };

    let related_products = catalog.related(&product).await.unwrap_or_else(|e| {
        tracing::warn!(product_id = %id, "Failed to load related products: {e}");
        Vec::new()
    });

    ProductShowTemplate {
        product: ProductView::new(&product, page.locale),
        related_products: ProductView::list(&related_products, page.locale),
        page,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use elegant_core::{CategoryId, Locale, Localized};

    use super::*;
    use crate::middleware::LocalePath;

    fn category(en: &str, ar: &str) -> Category {
        Category {
            id: CategoryId::new(1),
            name: Localized::new(en.to_owned(), ar.to_owned()),
            description: Localized::new(None, None),
            image: None,
            product_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_panel_marks_selection() {
        let page = PageContext::new(Locale::Ar, &LocalePath("/products".to_owned()), None);
        let query = ProductQuery {
            category: Some("Abaya".to_owned()),
            price: Some("100-300".to_owned()),
            sort: Some("bogus".to_owned()),
            ..ProductQuery::default()
        };
        let panel = FilterPanel::new(&query, &[category("Abaya", "عباية")], &page);

        let selected: Vec<_> = panel
            .categories
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected, ["عباية"]);
        assert!(panel.prices.iter().any(|o| o.selected && o.value == "100-300"));
        assert!(panel.sorts.iter().any(|o| o.selected && o.value == "featured"));
    }

    #[test]
    fn test_all_categories_selected_by_default() {
        let page = PageContext::new(Locale::En, &LocalePath("/products".to_owned()), None);
        let panel = FilterPanel::new(&ProductQuery::default(), &[category("Hijab", "حجاب")], &page);
        assert!(panel.categories[0].selected);
        assert_eq!(panel.categories[0].label, "All Categories");
        assert_eq!(panel.search, "");
    }
}
