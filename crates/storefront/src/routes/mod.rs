//! HTTP route handlers for the storefront.
//!
//! Page routes are registered without a locale; the locale middleware strips
//! the `/en` or `/ar` prefix before routing.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /products                - Product listing (search, filters, sort)
//! GET  /products/:id            - Product detail
//! GET  /categories              - Category listing
//! GET  /categories/:name        - Category page
//! GET  /about                   - About page
//! GET  /contact                 - Contact page
//!
//! # Cart and checkout (requires auth)
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add one unit, redirect to the product
//! POST /cart/update             - Set quantity (0 removes)
//! POST /cart/remove             - Remove a line
//! GET  /checkout                - Checkout form
//! POST /checkout                - Place order
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action (rate limited)
//! GET  /auth/register           - Register page
//! POST /auth/register           - Register action (rate limited)
//! POST /auth/logout             - Logout action
//!
//! # Account (requires auth)
//! GET  /account                 - Account overview
//! GET  /account/orders          - Order history
//! GET  /account/profile         - Profile form
//! POST /account/profile         - Save profile
//!
//! # Admin (requires admin role)
//! GET  /admin                   - Dashboard
//!
//! # JSON API (no locale prefix)
//! GET  /api/products            - Product list (?featured, ?category, ?limit)
//! GET  /api/products/:id        - Product
//! GET  /api/categories          - Categories
//! *    /api/cart...             - Cart
//! POST /api/checkout            - Place order
//! *    /api/auth/...            - Register, login, logout, me
//! *    /api/account/...         - Orders, profile
//! *    /api/admin/...           - Product and category CRUD
//! ```

pub mod account;
pub mod admin;
pub mod api;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod home;
pub mod page;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth page routes router.
pub fn auth_routes() -> Router<AppState> {
    let limited = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .layer(auth_rate_limiter());

    Router::new()
        .route("/login", get(auth::login_page))
        .route("/register", get(auth::register_page))
        .route("/logout", post(auth::logout))
        .merge(limited)
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{name}", get(categories::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders))
        .route(
            "/profile",
            get(account::profile).post(account::update_profile),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/cart", cart_routes())
        .route(
            "/checkout",
            get(checkout::show).post(checkout::place_order),
        )
        .nest("/account", account_routes())
        .nest("/auth", auth_routes())
        .route("/admin", get(admin::dashboard))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .nest("/api", api::router())
        .fallback(pages::not_found)
}
