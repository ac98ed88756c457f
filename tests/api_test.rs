//! Catalog API tests over HTTP

mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};
use storefront::api::{ErrorBody, HealthData};
use storefront::{CatalogProduct, ProductStore, SqliteCatalog, StockLevel};

use common::{base_url, spawn_catalog, TEST_ORIGIN};

async fn demo_catalog() -> String {
    base_url(spawn_catalog(ProductStore::with_demo_products()).await)
}

#[tokio::test]
async fn test_health() {
    let base = demo_catalog().await;
    let health: HealthData = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.products, 3);
}

#[tokio::test]
async fn test_list_products_ordered_by_id() {
    let base = demo_catalog().await;
    let products: Vec<CatalogProduct> = reqwest::get(format!("{}/products", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["banana", "onion", "tomato"]);
    assert_eq!(products[0].price, 1500.0);
}

async fn sqlite_demo_catalog() -> String {
    let catalog = SqliteCatalog::connect("sqlite::memory:").await.unwrap();
    catalog.seed_demo_products().await.unwrap();
    base_url(spawn_catalog(catalog).await)
}

async fn assert_error(response: reqwest::Response, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let error: ErrorBody = response.json().await.unwrap();
    assert_eq!(error.code, code);
    assert!(!error.detail.is_empty());
}

#[tokio::test]
async fn test_product_lifecycle() {
    run_product_lifecycle(&demo_catalog().await).await;
}

#[tokio::test]
async fn test_product_lifecycle_on_sqlite() {
    let base = sqlite_demo_catalog().await;
    run_product_lifecycle(&base).await;

    let health: HealthData = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.storage, "sqlite");
    assert_eq!(health.products, 3);
}

async fn run_product_lifecycle(base: &str) {
    let client = reqwest::Client::new();

    // Add
    let response = client
        .post(format!("{}/add", base))
        .json(&json!({"name": "chili", "quantity": 2, "price": 800}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CatalogProduct = response.json().await.unwrap();
    assert_eq!(created.id, 4);

    // Search
    let found: CatalogProduct = client
        .get(format!("{}/search/{}", base, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found, created);

    // Update
    let updated: CatalogProduct = client
        .patch(format!("{}/update/{}", base, created.id))
        .json(&json!({"precio": 950.5}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.price, 950.5);
    assert_eq!(updated.quantity, 2);

    // Delete
    let response = client
        .delete(format!("{}/delete/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Success");

    // Gone
    let response = client
        .get(format!("{}/search/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorBody = response.json().await.unwrap();
    assert_eq!(error.code, "API_NOT_FOUND");
}

#[tokio::test]
async fn test_missing_ids_are_404() {
    let base = demo_catalog().await;
    let client = reqwest::Client::new();

    let response = client
        .patch(format!("{}/update/99", base))
        .json(&json!({"name": "ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.delete(format!("{}/delete/99", base)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_add_conflicts() {
    let base = demo_catalog().await;
    let response = reqwest::Client::new()
        .post(format!("{}/add", base))
        .json(&json!({"name": "banana", "quantity": 1, "price": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorBody = response.json().await.unwrap();
    assert_eq!(error.code, "API_CONFLICT");
}

#[tokio::test]
async fn test_rejected_requests_use_error_body() {
    let base = demo_catalog().await;
    let client = reqwest::Client::new();

    // Missing field
    let response = client
        .post(format!("{}/add", base))
        .json(&json!({"name": "no price"}))
        .send()
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "API_BAD_REQUEST").await;

    // Not JSON at all
    let response = client
        .post(format!("{}/add", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "API_BAD_REQUEST").await;

    // Non-numeric id
    let response = client.get(format!("{}/search/abc", base)).send().await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "API_BAD_REQUEST").await;

    let response = client
        .patch(format!("{}/update/abc", base))
        .json(&json!({"price": 1}))
        .send()
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "API_BAD_REQUEST").await;

    // Stock change without an amount
    let response = client
        .post(format!("{}/inventory/banana/increase", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "API_BAD_REQUEST").await;

    // Nothing was changed along the way
    let products: Vec<CatalogProduct> = reqwest::get(format!("{}/products", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].quantity, 1);
}

#[tokio::test]
async fn test_inventory_endpoints() {
    let base = demo_catalog().await;
    let client = reqwest::Client::new();

    let level: StockLevel = client
        .post(format!("{}/inventory/banana/increase", base))
        .json(&json!({"amount": 3}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(level.quantity, 4);

    let level: StockLevel = client
        .post(format!("{}/inventory/tomato/decrease", base))
        .json(&json!({"amount": 2}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(level.quantity, 5);

    let response = client
        .post(format!("{}/inventory/onion/decrease", base))
        .json(&json!({"amount": 10}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorBody = response.json().await.unwrap();
    assert_eq!(error.code, "INVENTORY_INSUFFICIENT");

    let level: StockLevel = client
        .get(format!("{}/inventory/onion", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(level.quantity, 3);

    let response = client
        .delete(format!("{}/inventory/banana", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/inventory/banana", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_frontend_origin() {
    let base = demo_catalog().await;
    let response = reqwest::Client::new()
        .get(format!("{}/products", base))
        .header("Origin", TEST_ORIGIN)
        .send()
        .await
        .unwrap();

    let allowed = response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allowed, Some(TEST_ORIGIN));
}
