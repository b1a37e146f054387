//! Account pages.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::OrderRepository;
use crate::filters;
use crate::middleware::{RequireAuth, set_current_user};
use crate::models::{CurrentUser, Order, User};
use crate::routes::page::PageContext;
use crate::services::auth::{AuthService, ProfileUpdate};
use crate::state::AppState;

/// Order display data for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub number: String,
    pub date: String,
    pub status: &'static str,
    pub payment_method: &'static str,
    pub item_count: u32,
    pub lines: Vec<OrderLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

/// Order line display data for templates.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub line_total: String,
}

impl OrderView {
    #[must_use]
    pub fn new(order: &Order, page: &PageContext) -> Self {
        Self {
            number: format!("#{}", order.id),
            date: order.created_at.format("%Y-%m-%d").to_string(),
            status: order.status.label(page.locale),
            payment_method: order.payment_method.label(page.locale),
            item_count: order.item_count(),
            lines: order
                .lines
                .iter()
                .map(|line| OrderLineView {
                    name: line.name.text(page.locale).to_owned(),
                    size: line.size.clone(),
                    color: line.color.clone(),
                    quantity: line.quantity,
                    line_total: page.price(line.line_total()),
                })
                .collect(),
            subtotal: page.price(order.subtotal),
            shipping: page.price(order.shipping_cost),
            total: page.price(order.total),
        }
    }
}

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub page: PageContext,
    pub user: User,
    pub recent_orders: Vec<OrderView>,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub page: PageContext,
    pub orders: Vec<OrderView>,
}

/// Profile form template.
#[derive(Template, WebTemplate)]
#[template(path = "account/profile.html")]
pub struct ProfileTemplate {
    pub page: PageContext,
    pub user: User,
}

/// Orders shown on the account overview.
const RECENT_ORDERS: usize = 3;

/// Display account overview.
#[instrument(skip(state, page, current), fields(user_id = %current.id))]
pub async fn index(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(current): RequireAuth,
) -> Response {
    let user = match AuthService::new(state.pool()).get_user(current.id).await {
        Ok(user) => user,
        Err(e) => return page.server_error(&e),
    };
    let orders = match OrderRepository::new(state.pool())
        .list_for_user(current.id)
        .await
    {
        Ok(orders) => orders,
        Err(e) => return page.server_error(&e),
    };

    AccountIndexTemplate {
        recent_orders: orders
            .iter()
            .take(RECENT_ORDERS)
            .map(|o| OrderView::new(o, &page))
            .collect(),
        page,
        user,
    }
    .into_response()
}

/// Display order history, newest first.
#[instrument(skip(state, page, user), fields(user_id = %user.id))]
pub async fn orders(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(user): RequireAuth,
) -> Response {
    match OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await
    {
        Ok(orders) => OrdersTemplate {
            orders: orders.iter().map(|o| OrderView::new(o, &page)).collect(),
            page,
        }
        .into_response(),
        Err(e) => page.server_error(&e),
    }
}

/// Display the profile form.
#[instrument(skip(state, page, current), fields(user_id = %current.id))]
pub async fn profile(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(current): RequireAuth,
) -> Response {
    match AuthService::new(state.pool()).get_user(current.id).await {
        Ok(user) => ProfileTemplate { page, user }.into_response(),
        Err(e) => page.server_error(&e),
    }
}

/// Save the profile form.
#[instrument(skip(state, page, session, current, update), fields(user_id = %current.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    page: PageContext,
    session: Session,
    RequireAuth(current): RequireAuth,
    Form(update): Form<ProfileUpdate>,
) -> Response {
    let user = match AuthService::new(state.pool())
        .update_profile(current.id, &update)
        .await
    {
        Ok(user) => user,
        Err(e) => return page.redirect_error("/account/profile", e.code()),
    };

    if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
        tracing::error!("Failed to refresh session user: {e}");
    }
    page.redirect_notice("/account/profile", "profile_saved")
}
