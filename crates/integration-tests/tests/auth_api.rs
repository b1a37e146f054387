//! Integration tests for registration, login and the account API.
//!
//! These tests require:
//! - A migrated and seeded `PostgreSQL` database
//! - The storefront running (`cargo run -p elegant-storefront`)

use elegant_integration_tests::{client, register_customer, unique_email, url};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_register_logs_in() {
    let client = client();
    let account = register_customer(&client).await;
    assert_eq!(account["role"], "CUSTOMER");
    assert!(account.get("password").is_none());

    let me: Value = client
        .get(url("/api/auth/me"))
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(me["email"], account["email"]);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_duplicate_email_conflicts() {
    let client = client();
    let email = unique_email("dup");
    let body = json!({ "email": email, "password": "test-password", "firstName": "Dup" });

    let first = client
        .post(url("/api/auth/register"))
        .json(&body)
        .send()
        .await
        .expect("register");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client
        .post(url("/api/auth/register"))
        .json(&body)
        .send()
        .await
        .expect("register");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_short_password_is_rejected() {
    let resp = client()
        .post(url("/api/auth/register"))
        .json(&json!({ "email": unique_email("weak"), "password": "short", "firstName": "W" }))
        .send()
        .await
        .expect("register");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_wrong_password_is_unauthorized() {
    let resp = client()
        .post(url("/api/auth/login"))
        .json(&json!({ "email": "admin@elegant.sa", "password": "not-the-password" }))
        .send()
        .await
        .expect("login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_logout_ends_session() {
    let client = client();
    register_customer(&client).await;

    let resp = client
        .post(url("/api/auth/logout"))
        .send()
        .await
        .expect("logout");
    assert_eq!(resp.status(), StatusCode::OK);

    let me = client.get(url("/api/auth/me")).send().await.expect("me");
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_profile_update() {
    let client = client();
    register_customer(&client).await;

    let resp = client
        .put(url("/api/account/profile"))
        .json(&json!({ "firstName": "Noura", "lastName": "Saleh", "phone": "+966511111111" }))
        .send()
        .await
        .expect("profile");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["firstName"], "Noura");
    assert_eq!(body["phone"], "+966511111111");
}
