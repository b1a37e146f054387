//! Account endpoints for the logged-in user.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use tower_sessions::Session;
use tracing::instrument;

use super::ApiJson;
use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::{RequireAuth, set_current_user};
use crate::models::{CurrentUser, OrderResponse, UserResponse};
use crate::services::auth::{AuthService, ProfileUpdate};
use crate::state::AppState;

/// Create the account API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders))
        .route("/profile", put(update_profile))
}

/// The user's orders, newest first.
///
/// GET /api/account/orders
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OrderResponse>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// Update first name, last name and phone.
///
/// PUT /api/account/profile
#[instrument(skip(state, session, user, update), fields(user_id = %user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<UserResponse>> {
    let updated = AuthService::new(state.pool())
        .update_profile(user.id, &update)
        .await?;
    set_current_user(&session, &CurrentUser::from(&updated)).await?;
    Ok(Json(UserResponse::from(&updated)))
}
