//! Integration tests for locale-prefixed storefront pages.
//!
//! These tests require:
//! - A migrated and seeded `PostgreSQL` database
//! - The storefront running (`cargo run -p elegant-storefront`)

use elegant_integration_tests::{client, url};
use reqwest::{StatusCode, header};

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_root_redirects_to_locale() {
    let resp = client()
        .get(url("/products"))
        .header(header::ACCEPT_LANGUAGE, "en-GB,en;q=0.8")
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/en/products");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_arabic_pages_are_rtl() {
    let resp = client().get(url("/ar")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains(r#"lang="ar""#));
    assert!(body.contains(r#"dir="rtl""#));
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_locale_cookie_is_remembered() {
    let client = client();
    let resp = client.get(url("/en/about")).send().await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.get(url("/contact")).send().await.expect("request");
    assert_eq!(resp.headers()[header::LOCATION], "/en/contact");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_cart_page_redirects_to_login() {
    let resp = client().get(url("/en/cart")).send().await.expect("request");
    assert!(resp.status().is_redirection());
    let location = resp.headers()[header::LOCATION].to_str().expect("location");
    assert!(location.starts_with("/en/auth/login"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_unknown_page_is_404() {
    let resp = client()
        .get(url("/en/no-such-page"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
