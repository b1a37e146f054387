//! Admin API: product and category CRUD.
//!
//! Every handler takes [`RequireAdmin`](crate::middleware::RequireAdmin):
//! 401 without a session, 403 for non-admin users.

pub mod categories;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the admin API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list).post(products::create),
        )
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::destroy),
        )
}
