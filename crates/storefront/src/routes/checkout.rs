//! Checkout page: shipping form, payment choice, order placement.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CheckoutRequest, CurrentUser};
use crate::routes::cart::CartView;
use crate::routes::page::PageContext;
use crate::services::cart::CartService;
use crate::services::checkout::{CheckoutError, CheckoutService};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub page: PageContext,
    pub cart: CartView,
    pub user: CurrentUser,
}

/// Display the checkout form. An empty cart goes back to the cart page.
#[instrument(skip(state, page, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cart = match CartService::new(state.pool(), user.id).load().await {
        Ok(cart) => cart,
        Err(e) => return page.server_error(&e),
    };
    if cart.is_empty() {
        return page.redirect("/cart");
    }
    let totals = cart.totals(state.shipping_flat_rate());

    CheckoutTemplate {
        cart: CartView::new(&cart, &totals, &page),
        page,
        user,
    }
    .into_response()
}

/// Place the order and show it in the order history.
#[instrument(skip(state, page, user, request), fields(user_id = %user.id))]
pub async fn place_order(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(user): RequireAuth,
    Form(request): Form<CheckoutRequest>,
) -> Response {
    let result = CheckoutService::new(state.pool(), state.shipping_flat_rate())
        .place_order(user.id, &request)
        .await;

    match result {
        Ok(_) => page.redirect_notice("/account/orders", "order_placed"),
        Err(CheckoutError::EmptyCart) => page.redirect_error("/cart", "empty_cart"),
        Err(CheckoutError::Repository(e)) => page.server_error(&e),
        Err(e) => page.redirect_error("/checkout", e.code()),
    }
}
