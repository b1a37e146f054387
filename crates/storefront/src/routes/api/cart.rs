//! Cart endpoints. All require a logged-in user and return the whole cart.

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get},
};
use tracing::instrument;

use super::ApiJson;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{CartLineRequest, CartQuantityRequest, CartResponse, CurrentUser};
use crate::services::cart::CartService;
use crate::state::AppState;

/// Create the cart API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show).delete(clear))
        .route(
            "/items",
            delete(remove_item).post(add_item).patch(update_item),
        )
}

async fn cart_response(state: &AppState, user: &CurrentUser) -> Result<Json<CartResponse>> {
    let cart = CartService::new(state.pool(), user.id).load().await?;
    Ok(Json(CartResponse::new(
        &cart,
        state.shipping_flat_rate(),
    )))
}

/// The current user's cart.
///
/// GET /api/cart
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartResponse>> {
    cart_response(&state, &user).await
}

/// Add one unit of a product in a size and color.
///
/// POST /api/cart/items
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CartLineRequest>,
) -> Result<Json<CartResponse>> {
    CartService::new(state.pool(), user.id)
        .add(&request.key())
        .await?;
    cart_response(&state, &user).await
}

/// Set a line's quantity; zero or less removes the line.
///
/// PATCH /api/cart/items
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CartQuantityRequest>,
) -> Result<Json<CartResponse>> {
    CartService::new(state.pool(), user.id)
        .set_quantity(&request.key(), request.quantity)
        .await?;
    cart_response(&state, &user).await
}

/// Remove the line matching product, size and color.
///
/// DELETE /api/cart/items
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CartLineRequest>,
) -> Result<Json<CartResponse>> {
    CartService::new(state.pool(), user.id)
        .remove(&request.key())
        .await?;
    cart_response(&state, &user).await
}

/// Empty the cart.
///
/// DELETE /api/cart
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartResponse>> {
    CartService::new(state.pool(), user.id).clear().await?;
    cart_response(&state, &user).await
}
