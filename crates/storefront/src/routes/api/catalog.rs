//! Public catalog endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use elegant_core::ProductId;

use super::ApiPath;
use crate::db::ProductFilter;
use crate::error::{AppError, Result};
use crate::models::{CategoryResponse, ProductResponse};
use crate::state::AppState;

/// Query string for `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub featured: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
}

impl ProductListQuery {
    /// Convert to a repository filter.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when `limit` is not a positive integer.
    pub fn filter(self) -> Result<ProductFilter> {
        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(limit) if limit > 0 => Some(limit),
                _ => return Err(AppError::BadRequest("Invalid limit".to_owned())),
            },
        };

        Ok(ProductFilter {
            featured: self.featured.as_deref() == Some("true"),
            category: self
                .category
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
            limit,
        })
    }
}

/// List products, newest first.
///
/// GET /api/products?featured=true&category=Abaya&limit=8
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductResponse>>> {
    let filter = query.filter()?;
    let products = state.catalog().products(&filter).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Get a single product.
///
/// GET /api/products/:id
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<ProductResponse>> {
    let product = state
        .catalog()
        .product(id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok(Json(product.into()))
}

/// List categories.
///
/// GET /api/categories
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    let categories = state.catalog().categories().await?;
    Ok(Json(
        categories.iter().cloned().map(Into::into).collect(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(featured: Option<&str>, category: Option<&str>, limit: Option<&str>) -> ProductListQuery {
        ProductListQuery {
            featured: featured.map(String::from),
            category: category.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_featured_with_limit() {
        let filter = query(Some("true"), None, Some("8")).filter().unwrap();
        assert_eq!(
            filter,
            ProductFilter {
                featured: true,
                category: None,
                limit: Some(8),
            }
        );
    }

    #[test]
    fn test_empty_query_lists_everything() {
        assert_eq!(query(None, Some("  "), None).filter().unwrap(), ProductFilter::default());
        assert!(!query(Some("false"), None, None).filter().unwrap().featured);
    }

    #[test]
    fn test_bad_limit_is_rejected() {
        assert!(matches!(
            query(None, None, Some("ten")).filter(),
            Err(AppError::BadRequest(_))
        ));
        assert!(query(None, None, Some("0")).filter().is_err());
    }
}
