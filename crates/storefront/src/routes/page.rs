//! Shared page context and display views.
//!
//! Every HTML page gets a [`PageContext`]: the active locale and its UI
//! strings, the language toggle link, the logged-in user, the header cart
//! badge and the category navigation. Views hold locale-resolved strings so
//! templates never branch on the locale.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use elegant_core::{Locale, Price};
use rust_decimal::Decimal;

use crate::db::CartRepository;
use crate::filters;
use crate::i18n::Messages;
use crate::middleware::{LocalePath, request_locale};
use crate::models::{Category, CurrentUser, Product, session::keys};
use crate::state::AppState;

/// Flash parameters carried by redirects.
#[derive(Debug, Default, Deserialize)]
struct Flash {
    error: Option<String>,
    notice: Option<String>,
}

/// A header navigation link.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// Context shared by every page template.
pub struct PageContext {
    pub locale: Locale,
    pub t: &'static Messages,
    /// `lang` attribute.
    pub lang: &'static str,
    /// `dir` attribute (`rtl` or `ltr`).
    pub dir: &'static str,
    /// The current page under the other locale.
    pub switch_href: String,
    pub switch_label: &'static str,
    /// Current path and query without the locale prefix.
    pub path: String,
    pub user: Option<CurrentUser>,
    pub cart_count: i64,
    pub categories: Vec<NavLink>,
    pub error: Option<&'static str>,
    pub notice: Option<&'static str>,
}

impl PageContext {
    /// Build a context without touching the database.
    #[must_use]
    pub fn new(locale: Locale, path: &LocalePath, user: Option<CurrentUser>) -> Self {
        let t = Messages::for_locale(locale);
        let other = locale.other();
        Self {
            locale,
            t,
            lang: locale.code(),
            dir: locale.direction().as_str(),
            switch_href: path.under(other),
            switch_label: Messages::for_locale(other).language_name,
            path: path.0.clone(),
            user,
            cart_count: 0,
            categories: Vec::new(),
            error: None,
            notice: None,
        }
    }

    /// `path` under the active locale.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        self.locale.prefix(path)
    }

    /// Whether an administrator is logged in.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(CurrentUser::is_admin)
    }

    /// Name shown in the header for the logged-in user.
    #[must_use]
    pub fn user_name(&self) -> &str {
        self.user.as_ref().map_or("", CurrentUser::display_name)
    }

    /// Format an amount in the store currency.
    #[must_use]
    pub fn price(&self, amount: Decimal) -> String {
        Price::sar(amount).display(self.locale)
    }

    /// `303 See Other` to `path` under the active locale.
    #[must_use]
    pub fn redirect(&self, path: &str) -> Response {
        Redirect::to(&self.href(path)).into_response()
    }

    /// Redirect carrying an `?error=` code for the target page to show.
    #[must_use]
    pub fn redirect_error(&self, path: &str, code: &str) -> Response {
        self.redirect(&with_param(path, "error", code))
    }

    /// Redirect carrying a `?notice=` code for the target page to show.
    #[must_use]
    pub fn redirect_notice(&self, path: &str, code: &str) -> Response {
        self.redirect(&with_param(path, "notice", code))
    }

    /// 404 page.
    #[must_use]
    pub fn not_found(self) -> Response {
        let message = self.t.not_found;
        (
            StatusCode::NOT_FOUND,
            ErrorTemplate {
                page: self,
                message,
            },
        )
            .into_response()
    }

    /// 500 page for a failure the visitor can't fix.
    #[must_use]
    pub fn server_error(self, err: &dyn std::error::Error) -> Response {
        let event_id = sentry::capture_error(err);
        tracing::error!(error = %err, sentry_event_id = %event_id, "Page error");
        let message = self.t.error("server_error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorTemplate {
                page: self,
                message,
            },
        )
            .into_response()
    }

    fn notice_message(&self, code: &str) -> Option<&'static str> {
        match code {
            "added" => Some(self.t.added_to_cart),
            "order_placed" => Some(self.t.order_placed),
            "profile_saved" => Some(self.t.profile_saved),
            _ => None,
        }
    }
}

/// Append `key=value` to a path that may already carry a query string.
fn with_param(path: &str, key: &str, value: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{key}={value}")
}

/// Error page shown for 404 and 500 responses.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub page: PageContext,
    pub message: &'static str,
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let locale = request_locale(parts);
        let path = parts
            .extensions
            .get::<LocalePath>()
            .cloned()
            .unwrap_or_else(|| LocalePath(parts.uri.to_string()));

        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };
        let user_id = user.as_ref().map(|u| u.id);

        let mut page = Self::new(locale, &path, user);

        let flash = Query::<Flash>::try_from_uri(&parts.uri)
            .map(|Query(flash)| flash)
            .unwrap_or_default();
        page.error = flash.error.as_deref().map(|code| page.t.error(code));
        page.notice = flash
            .notice
            .as_deref()
            .and_then(|code| page.notice_message(code));

        if let Some(user_id) = user_id {
            page.cart_count = CartRepository::new(state.pool())
                .item_count(user_id)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!("Failed to count cart items: {e}");
                    0
                });
        }

        match state.catalog().categories().await {
            Ok(categories) => {
                page.categories = categories
                    .iter()
                    .map(|c| CategoryView::new(c, locale).nav_link())
                    .collect();
            }
            Err(e) => tracing::warn!("Failed to load navigation categories: {e}"),
        }

        Ok(page)
    }
}

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub href: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub category_href: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
}

/// Placeholder shown for products without a photo.
const NO_IMAGE: &str = "/static/images/placeholder.svg";

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, locale: Locale) -> Self {
        Self {
            id: product.id.as_i32(),
            href: locale.prefix(&format!("/products/{}", product.id)),
            name: product.name.text(locale).to_owned(),
            description: product.description.text(locale).to_owned(),
            price: product.display_price(locale),
            image: product.image.clone().unwrap_or_else(|| NO_IMAGE.to_owned()),
            category: product.category_name.clone(),
            category_href: locale.prefix(&format!(
                "/categories/{}",
                product.category_name.to_lowercase()
            )),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            in_stock: product.in_stock,
            featured: product.featured,
        }
    }

    /// Views for a list of products.
    #[must_use]
    pub fn list(products: &[Product], locale: Locale) -> Vec<Self> {
        products.iter().map(|p| Self::new(p, locale)).collect()
    }
}

/// Category display data for templates.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub name: String,
    pub description: String,
    pub image: String,
    pub href: String,
    pub product_count: i64,
}

impl CategoryView {
    #[must_use]
    pub fn new(category: &Category, locale: Locale) -> Self {
        Self {
            name: category.name.text(locale).to_owned(),
            description: category.description.text(locale).to_owned(),
            image: category
                .image
                .clone()
                .unwrap_or_else(|| NO_IMAGE.to_owned()),
            href: locale.prefix(&format!("/categories/{}", category.slug())),
            product_count: category.product_count,
        }
    }

    fn nav_link(self) -> NavLink {
        NavLink {
            href: self.href,
            label: self.name,
        }
    }
}

/// An `<option>` in a filter form.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_for_arabic_page() {
        let page = PageContext::new(Locale::Ar, &LocalePath("/cart".to_owned()), None);
        assert_eq!(page.dir, "rtl");
        assert_eq!(page.lang, "ar");
        assert_eq!(page.switch_href, "/en/cart");
        assert_eq!(page.switch_label, "English");
        assert_eq!(page.href("/checkout"), "/ar/checkout");
        assert!(!page.is_admin());
    }

    #[test]
    fn test_with_param() {
        assert_eq!(with_param("/cart", "error", "empty_cart"), "/cart?error=empty_cart");
        assert_eq!(
            with_param("/products/3?size=M", "notice", "added"),
            "/products/3?size=M&notice=added"
        );
    }

    #[test]
    fn test_redirect_keeps_locale() {
        let page = PageContext::new(Locale::En, &LocalePath("/".to_owned()), None);
        let response = page.redirect_error("/auth/login", "invalid_credentials");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[axum::http::header::LOCATION],
            "/en/auth/login?error=invalid_credentials"
        );
    }

    #[test]
    fn test_notice_codes() {
        let page = PageContext::new(Locale::En, &LocalePath("/".to_owned()), None);
        assert_eq!(page.notice_message("added"), Some("Added to your cart"));
        assert_eq!(page.notice_message("unknown"), None);
    }
}
