//! Admin product endpoints.
//!
//! Writes invalidate the category cache, whose entries carry product counts.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use elegant_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{ProductInput, ProductResponse};
use crate::routes::api::{ApiJson, ApiPath};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Query string for the admin product list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Validated pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

fn positive(raw: Option<&str>, default: i64) -> Result<i64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) if value >= 1 => Ok(value),
            _ => Err(AppError::BadRequest(
                "Invalid pagination parameters".to_owned(),
            )),
        },
    }
}

impl ListQuery {
    /// Page and limit, defaulting to page 1 of 10. The limit is capped at 100.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when either value is not an integer >= 1.
    pub fn page_request(&self) -> Result<PageRequest> {
        Ok(PageRequest {
            page: positive(self.page.as_deref(), 1)?,
            limit: positive(self.limit.as_deref(), DEFAULT_PAGE_SIZE)?.min(MAX_PAGE_SIZE),
        })
    }

    fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "all")
    }
}

/// Pagination block of the list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    #[must_use]
    pub fn new(request: PageRequest, total: i64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: (total + request.limit - 1) / request.limit,
        }
    }
}

/// Admin product list response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: Pagination,
}

/// List products with pagination and search.
///
/// GET /api/admin/products?page=1&limit=10&search=abaya&category=Abaya
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListResponse>> {
    let request = query.page_request()?;
    let page = ProductRepository::new(state.pool())
        .list_page(request.page, request.limit, query.search(), query.category())
        .await?;

    Ok(Json(ProductListResponse {
        products: page.products.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(request, page.total),
    }))
}

/// Create a product.
///
/// POST /api/admin/products
#[instrument(skip(state, admin, input), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let product = input.validate()?;
    let created = ProductRepository::new(state.pool())
        .create(&product)
        .await?;
    state.catalog_cache().invalidate().await;

    tracing::info!(product_id = %created.id, "Product created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a product.
///
/// GET /api/admin/products/:id
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok(Json(product.into()))
}

/// Replace a product's fields.
///
/// PUT /api/admin/products/:id
#[instrument(skip(state, admin, input), fields(admin_id = %admin.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Json<ProductResponse>> {
    let product = input.validate()?;
    let updated = ProductRepository::new(state.pool())
        .update(id, &product)
        .await
        .map_err(AppError::or_not_found("Product"))?;
    state.catalog_cache().invalidate().await;

    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(updated.into()))
}

/// Delete a product.
///
/// DELETE /api/admin/products/:id
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Value>> {
    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::or_not_found("Product"))?;
    state.catalog_cache().invalidate().await;

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
            ..ListQuery::default()
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            query(None, None).page_request().unwrap(),
            PageRequest { page: 1, limit: 10 }
        );
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(query(Some("2"), Some("500")).page_request().unwrap().limit, 100);
    }

    #[test]
    fn test_rejects_values_below_one() {
        assert!(query(Some("0"), None).page_request().is_err());
        assert!(query(None, Some("-5")).page_request().is_err());
        assert!(query(Some("two"), None).page_request().is_err());
    }

    #[test]
    fn test_pages_round_up() {
        let request = PageRequest { page: 1, limit: 10 };
        assert_eq!(Pagination::new(request, 0).pages, 0);
        assert_eq!(Pagination::new(request, 10).pages, 1);
        assert_eq!(Pagination::new(request, 11).pages, 2);
    }

    #[test]
    fn test_all_category_means_no_filter() {
        let query = ListQuery {
            category: Some("all".to_owned()),
            search: Some("  ".to_owned()),
            ..ListQuery::default()
        };
        assert_eq!(query.category(), None);
        assert_eq!(query.search(), None);
    }
}
