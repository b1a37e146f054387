//! Checkout endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use super::ApiJson;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{CheckoutRequest, OrderResponse};
use crate::services::checkout::CheckoutService;
use crate::state::AppState;

/// Place an order for the current cart.
///
/// POST /api/checkout
#[instrument(skip(state, user, request), fields(user_id = %user.id))]
pub async fn place_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let order = CheckoutService::new(state.pool(), state.shipping_flat_rate())
        .place_order(user.id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}
