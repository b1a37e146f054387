//! Integration tests for the admin product and category API.
//!
//! These tests require:
//! - A migrated and seeded `PostgreSQL` database (the seeded admin account)
//! - The storefront running (`cargo run -p elegant-storefront`)

use elegant_integration_tests::{client, login_admin, register_customer, url};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_admin_requires_login() {
    let resp = client()
        .get(url("/api/admin/products"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_customer_is_forbidden() {
    let client = client();
    register_customer(&client).await;
    let resp = client
        .get(url("/api/admin/products"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_product_pagination() {
    let client = client();
    login_admin(&client).await;

    let page: Value = client
        .get(url("/api/admin/products?page=1&limit=2"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("Invalid JSON");

    let pagination = &page["pagination"];
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["limit"], 2);
    assert!(page["products"].as_array().map(Vec::len) <= Some(2));
    let total = pagination["total"].as_i64().expect("total");
    assert_eq!(pagination["pages"].as_i64(), Some((total + 1) / 2));

    let bad = client
        .get(url("/api/admin/products?page=0"))
        .send()
        .await
        .expect("list");
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_category_and_product_lifecycle() {
    let client = client();
    login_admin(&client).await;
    let suffix = Uuid::new_v4().simple().to_string();

    let resp = client
        .post(url("/api/admin/categories"))
        .json(&json!({ "name": format!("Test {suffix}"), "nameAr": "اختبار" }))
        .send()
        .await
        .expect("create category");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = resp.json().await.expect("Invalid JSON");
    let category_id = category["id"].as_i64().expect("category id");

    let resp = client
        .post(url("/api/admin/products"))
        .json(&json!({
            "name": format!("Test Scarf {suffix}"),
            "nameAr": "وشاح",
            "price": "49.50",
            "categoryId": category_id.to_string(),
            "sizes": ["One Size"],
            "colors": ["Black"],
        }))
        .send()
        .await
        .expect("create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("Invalid JSON");
    let product_id = product["id"].as_i64().expect("product id");
    assert_eq!(product["price"], 49.5);
    assert_eq!(product["inStock"], true);
    assert_eq!(product["featured"], false);

    let resp = client
        .put(url(&format!("/api/admin/products/{product_id}")))
        .json(&json!({
            "name": format!("Test Scarf {suffix}"),
            "nameAr": "وشاح",
            "price": 55,
            "categoryId": category_id,
            "inStock": false,
        }))
        .send()
        .await
        .expect("update product");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(updated["price"], 55.0);
    assert_eq!(updated["inStock"], false);

    let blocked = client
        .delete(url(&format!("/api/admin/categories/{category_id}")))
        .send()
        .await
        .expect("delete category");
    assert_eq!(blocked.status(), StatusCode::CONFLICT);

    let resp = client
        .delete(url(&format!("/api/admin/products/{product_id}")))
        .send()
        .await
        .expect("delete product");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["message"], "Product deleted successfully");

    let resp = client
        .delete(url(&format!("/api/admin/categories/{category_id}")))
        .send()
        .await
        .expect("delete category");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_missing_fields_are_rejected() {
    let client = client();
    login_admin(&client).await;

    let resp = client
        .post(url("/api/admin/products"))
        .json(&json!({ "name": "No Arabic name", "price": 10 }))
        .send()
        .await
        .expect("create product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["error"], "Missing required fields");
}

async fn public_product_count(client: &Client, category_id: i64) -> i64 {
    let categories: Vec<Value> = client
        .get(url("/api/categories"))
        .send()
        .await
        .expect("list categories")
        .json()
        .await
        .expect("Invalid JSON");
    categories
        .iter()
        .find(|c| c["id"].as_i64() == Some(category_id))
        .and_then(|c| c["productCount"].as_i64())
        .expect("category listed with productCount")
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_category_counts_follow_product_writes() {
    let client = client();
    login_admin(&client).await;
    let suffix = Uuid::new_v4().simple().to_string();

    let category: Value = client
        .post(url("/api/admin/categories"))
        .json(&json!({ "name": format!("Counted {suffix}"), "nameAr": "عد" }))
        .send()
        .await
        .expect("create category")
        .json()
        .await
        .expect("Invalid JSON");
    let category_id = category["id"].as_i64().expect("category id");
    assert_eq!(public_product_count(&client, category_id).await, 0);

    let product: Value = client
        .post(url("/api/admin/products"))
        .json(&json!({
            "name": format!("Counted Abaya {suffix}"),
            "nameAr": "عباية",
            "price": 120,
            "categoryId": category_id,
        }))
        .send()
        .await
        .expect("create product")
        .json()
        .await
        .expect("Invalid JSON");
    let product_id = product["id"].as_i64().expect("product id");
    assert_eq!(public_product_count(&client, category_id).await, 1);

    let resp = client
        .delete(url(&format!("/api/admin/products/{product_id}")))
        .send()
        .await
        .expect("delete product");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(public_product_count(&client, category_id).await, 0);

    client
        .delete(url(&format!("/api/admin/categories/{category_id}")))
        .send()
        .await
        .expect("delete category");
}
