//! JSON API handlers, mounted under `/api`.
//!
//! The API bypasses locale prefixing. Every error is a JSON object
//! `{"error": "..."}` (see [`AppError`]).

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// JSON body extractor whose rejection is a JSON [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejection is a JSON [`AppError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint")
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/categories", get(catalog::list_categories))
        .nest("/cart", cart::router())
        .route("/checkout", post(checkout::place_order))
        .nest("/auth", auth::router())
        .nest("/account", account::router())
        .nest("/admin", admin::router())
        .fallback(not_found)
}
