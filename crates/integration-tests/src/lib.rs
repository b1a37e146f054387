//! Integration tests for the Elegant storefront.
//!
//! The tests talk to a running server over HTTP and are ignored by default.
//!
//! # Running Tests
//!
//! ```bash
//! elegant-cli migrate
//! elegant-cli seed
//! cargo run -p elegant-storefront &
//! cargo test -p elegant-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Server under test (default: `http://localhost:3000`)
//! - `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD` - Admin account (default: the
//!   seeded `admin@elegant.sa`)

#![allow(clippy::missing_panics_doc)]

use reqwest::{Client, redirect::Policy};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the storefront under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// `path` under the server under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

/// Client that keeps the session cookie and does not follow redirects.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// An email address no other test run has used.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4().simple())
}

/// Register a fresh customer on `client` and return its account JSON.
pub async fn register_customer(client: &Client) -> Value {
    let resp = client
        .post(url("/api/auth/register"))
        .json(&json!({
            "email": unique_email("customer"),
            "password": "test-password",
            "firstName": "Test",
            "lastName": "Customer",
            "phone": "+966500000000",
        }))
        .send()
        .await
        .expect("Failed to register customer");
    assert_eq!(resp.status(), 201, "registration failed");
    resp.json().await.expect("Invalid registration response")
}

/// Log `client` in as the seeded administrator.
pub async fn login_admin(client: &Client) {
    let email =
        std::env::var("TEST_ADMIN_EMAIL").unwrap_or_else(|_| "admin@elegant.sa".to_string());
    let password =
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let resp = client
        .post(url("/api/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), 200, "admin login failed");
}

/// A product from the catalog that is in stock, with a size and color it
/// offers.
pub async fn orderable_product(client: &Client) -> (i64, String, String) {
    let products: Vec<Value> = client
        .get(url("/api/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Invalid product list");

    let product = products
        .iter()
        .find(|p| p["inStock"] == true)
        .expect("No in-stock products; run `elegant-cli seed`");
    let first_option = |field: &str, fallback: &str| {
        product[field]
            .as_array()
            .and_then(|options| options.first())
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };

    (
        product["id"].as_i64().expect("product id"),
        first_option("sizes", "One Size"),
        first_option("colors", "Black"),
    )
}

/// An in-stock product offering at least two sizes and two colors, with its
/// options.
pub async fn multi_variant_product(client: &Client) -> (i64, Vec<String>, Vec<String>) {
    let products: Vec<Value> = client
        .get(url("/api/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Invalid product list");

    let options = |product: &Value, field: &str| -> Vec<String> {
        product[field]
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    };

    products
        .iter()
        .filter(|p| p["inStock"] == true)
        .map(|p| (p, options(p, "sizes"), options(p, "colors")))
        .find(|(_, sizes, colors)| sizes.len() >= 2 && colors.len() >= 2)
        .map(|(p, sizes, colors)| (p["id"].as_i64().expect("product id"), sizes, colors))
        .expect("No product with two sizes and two colors; run `elegant-cli seed`")
}
