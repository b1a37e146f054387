//! Admin category endpoints. Writes invalidate the category cache.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;

use elegant_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{CategoryInput, CategoryResponse};
use crate::routes::api::{ApiJson, ApiPath};
use crate::state::AppState;

/// List all categories with product counts.
///
/// GET /api/admin/categories
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<CategoryResponse>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Create a category.
///
/// POST /api/admin/categories
#[instrument(skip(state, admin, input), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    let category = input.validate()?;
    let created = CategoryRepository::new(state.pool())
        .create(&category)
        .await?;
    state.catalog_cache().invalidate().await;

    tracing::info!(category_id = %created.id, "Category created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a category.
///
/// GET /api/admin/categories/:id
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<Json<CategoryResponse>> {
    let category = CategoryRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Category"))?;
    Ok(Json(category.into()))
}

/// Replace a category's fields.
///
/// PUT /api/admin/categories/:id
#[instrument(skip(state, admin, input), fields(admin_id = %admin.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<Json<CategoryResponse>> {
    let category = input.validate()?;
    let updated = CategoryRepository::new(state.pool())
        .update(id, &category)
        .await
        .map_err(AppError::or_not_found("Category"))?;
    state.catalog_cache().invalidate().await;

    tracing::info!(category_id = %id, "Category updated");
    Ok(Json(updated.into()))
}

/// Delete a category that has no products.
///
/// DELETE /api/admin/categories/:id
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<Json<Value>> {
    CategoryRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(AppError::or_not_found("Category"))?;
    state.catalog_cache().invalidate().await;

    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
