//! Cart page and its forms.
//!
//! The forms post back and redirect, so the page works without JavaScript.
//! Every route requires a logged-in user; visitors are sent to the login page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use elegant_core::{Cart, CartLine, CartTotals, LineKey, ProductId};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::page::PageContext;
use crate::services::cart::CartService;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: i32,
    pub href: String,
    pub name: String,
    pub image: String,
    pub size: String,
    pub color: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, totals: &CartTotals, page: &PageContext) -> Self {
        Self {
            lines: cart.lines().iter().map(|l| line_view(l, page)).collect(),
            item_count: cart.item_count(),
            subtotal: page.price(totals.subtotal),
            shipping: page.price(totals.shipping),
            total: page.price(totals.total),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn line_view(line: &CartLine, page: &PageContext) -> CartLineView {
    let product_id = line.key.product_id;
    CartLineView {
        product_id: product_id.as_i32(),
        href: page.href(&format!("/products/{product_id}")),
        name: line.name.text(page.locale).to_owned(),
        image: line
            .image
            .clone()
            .unwrap_or_else(|| "/static/images/placeholder.svg".to_owned()),
        size: line.key.size.clone(),
        color: line.key.color.clone(),
        unit_price: page.price(line.unit_price),
        quantity: line.quantity,
        line_total: page.price(line.line_total()),
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    pub quantity: i64,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
}

fn key(product_id: i32, size: &str, color: &str) -> LineKey {
    LineKey::new(ProductId::new(product_id), size.trim(), color.trim())
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Display the cart with its order summary.
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
    let totals = cart.totals(state.shipping_flat_rate());

    CartShowTemplate {
        cart: CartView::new(&cart, &totals, &page),
        page,
    }
    .into_response()
}

/// Add one unit to the cart and return to the product page.
#[instrument(skip(state, page, user), fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let back = format!("/products/{}", form.product_id);
    match CartService::new(state.pool(), user.id)
        .add(&key(form.product_id, &form.size, &form.color))
        .await
    {
        Ok(_) => page.redirect_notice(&back, "added"),
        Err(e) => {
            tracing::warn!("Add to cart failed: {e}");
            page.redirect_error(&back, e.code())
        }
    }
}

/// Change a line's quantity; zero removes it.
#[instrument(skip(state, page, user), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(user): RequireAuth,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    match CartService::new(state.pool(), user.id)
        .set_quantity(&key(form.product_id, &form.size, &form.color), form.quantity)
        .await
    {
        Ok(_) => page.redirect("/cart"),
        Err(e) => page.redirect_error("/cart", e.code()),
    }
}

/// Remove a line.
#[instrument(skip(state, page, user), fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    page: PageContext,
    RequireAuth(user): RequireAuth,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    match CartService::new(state.pool(), user.id)
        .remove(&key(form.product_id, &form.size, &form.color))
        .await
    {
        Ok(()) => page.redirect("/cart"),
        Err(e) => page.redirect_error("/cart", e.code()),
    }
}

#[cfg(test)]
mod tests {
    use elegant_core::{Locale, Localized};
    use rust_decimal::Decimal;

    use super::*;
    use crate::middleware::LocalePath;

    #[test]
    fn test_cart_view_totals_include_shipping() {
        let page = PageContext::new(Locale::En, &LocalePath("/cart".to_owned()), None);
        let mut cart = Cart::default();
        let line = CartLine {
            key: key(1, " M ", "Black"),
            name: Localized::new("Silk Hijab".to_owned(), "حجاب حرير".to_owned()),
            unit_price: Decimal::new(120, 0),
            image: None,
            quantity: 1,
        };
        cart.add(line.clone());
        cart.add(line);

        let totals = cart.totals(Decimal::new(25, 0));
        let view = CartView::new(&cart, &totals, &page);

        assert_eq!(view.item_count, 2);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].size, "M");
        assert_eq!(view.lines[0].href, "/en/products/1");
        assert_eq!(view.subtotal, page.price(Decimal::new(240, 0)));
        assert_eq!(view.total, page.price(Decimal::new(265, 0)));
    }
}
