//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use product_catalog::{
    api::create_router,
    cache::QueryCache,
    catalog::ProductStore,
    service::{AuditLog, CatalogService},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_state() -> AppState {
    AppState::new(CatalogService::new(
        ProductStore::new(),
        QueryCache::new(16).unwrap(),
        AuditLog::new(100),
    ))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn post_product(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .header("x-username", "admin")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn seeded_app() -> (AppState, Router) {
    let state = create_test_state();
    let app = create_router(state.clone());

    for body in [
        r#"{"name":"iPhone 15","category":"Electronics","brand":"Apple","price":999.99,"description":"phone"}"#,
        r#"{"name":"Galaxy S24","category":"Electronics","brand":"Samsung","price":899.99,"description":"phone"}"#,
        r#"{"name":"MacBook","category":"Computers","brand":"Apple","price":1999.99,"description":"laptop"}"#,
    ] {
        let (status, _) = send(&app, post_product(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    (state, app)
}

fn names(json: &Value) -> Vec<String> {
    json["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

// == Create ==

#[tokio::test]
async fn test_create_assigns_ids() {
    let (_, app) = seeded_app().await;

    let (status, json) = send(
        &app,
        post_product(r#"{"name":"iPad","category":"Tablets","brand":"Apple","price":499.0}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"].as_u64(), Some(4));
    assert_eq!(json["description"].as_str(), Some(""));
}

#[tokio::test]
async fn test_create_negative_price_rejected() {
    let (_, app) = seeded_app().await;

    let (status, json) = send(
        &app,
        post_product(r#"{"name":"Bad","category":"Tablets","brand":"Apple","price":-1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("negative"));
}

#[tokio::test]
async fn test_create_empty_name_rejected() {
    let (_, app) = seeded_app().await;

    let (status, _) = send(
        &app,
        post_product(r#"{"name":"","category":"Tablets","brand":"Apple","price":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Search ==

#[tokio::test]
async fn test_search_by_brand() {
    let (_, app) = seeded_app().await;

    let (status, json) = send(&app, get("/products/search?brand=Apple")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["iPhone 15", "MacBook"]);
    assert_eq!(json["count"].as_u64(), Some(2));
}

#[tokio::test]
async fn test_search_category_and_max_price() {
    let (_, app) = seeded_app().await;

    let (status, json) = send(
        &app,
        get("/products/search?category=electronics&max_price=950"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Galaxy S24"]);
}

#[tokio::test]
async fn test_search_all_four_predicates() {
    let (_, app) = seeded_app().await;

    let (_, json) = send(
        &app,
        get("/products/search?category=Electronics&brand=Apple&min_price=800&max_price=1000"),
    )
    .await;

    assert_eq!(names(&json), vec!["iPhone 15"]);
}

#[tokio::test]
async fn test_search_inverted_range_rejected() {
    let (_, app) = seeded_app().await;

    let (status, _) = send(&app, get("/products/search?min_price=500&max_price=100")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_results_cached_then_invalidated() {
    let (state, app) = seeded_app().await;

    send(&app, get("/products/search?brand=Apple")).await;
    send(&app, get("/products/search?brand=apple")).await;
    assert_eq!(state.catalog.cache_size().await, 1);

    let (_, metrics) = send(&app, get("/metrics")).await;
    assert_eq!(metrics["cache"]["hits"].as_u64(), Some(1));
    assert_eq!(metrics["search"]["search_count"].as_u64(), Some(2));

    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/products/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.catalog.cache_size().await, 0);

    let (_, json) = send(&app, get("/products/search?brand=Apple")).await;
    assert_eq!(names(&json), vec!["MacBook"]);
}

// == Get / Update / Delete ==

#[tokio::test]
async fn test_get_product() {
    let (_, app) = seeded_app().await;

    let (status, json) = send(&app, get("/products/2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"].as_str(), Some("Galaxy S24"));
    assert_eq!(json["brand"].as_str(), Some("Samsung"));
}

#[tokio::test]
async fn test_update_moves_product_between_buckets() {
    let (_, app) = seeded_app().await;

    let (status, _) = send(
        &app,
        Request::builder()
            .method("PATCH")
            .uri("/products/3")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"category":"Electronics","price":950}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, computers) = send(&app, get("/products/search?category=Computers")).await;
    assert!(names(&computers).is_empty());

    let (_, electronics) = send(
        &app,
        get("/products/search?category=Electronics&min_price=950&max_price=950"),
    )
    .await;
    assert_eq!(names(&electronics), vec!["MacBook"]);
}

#[tokio::test]
async fn test_update_missing_product() {
    let (_, app) = seeded_app().await;

    let (status, _) = send(
        &app,
        Request::builder()
            .method("PATCH")
            .uri("/products/99")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Ghost"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let (_, app) = seeded_app().await;
    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/products/2")
            .body(Body::empty())
            .unwrap()
    };

    let (first, _) = send(&app, delete()).await;
    let (second, json) = send(&app, delete()).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());

    let (_, all) = send(&app, get("/products")).await;
    assert_eq!(all["count"].as_u64(), Some(2));
}

// == Metrics / Audit / Health ==

#[tokio::test]
async fn test_audit_endpoint() {
    let (_, app) = seeded_app().await;
    send(&app, get("/products/search?name=mac")).await;

    let (status, json) = send(&app, get("/audit")).await;

    assert_eq!(status, StatusCode::OK);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["action"].as_str(), Some("ADD_PRODUCT"));
    assert_eq!(entries[0]["username"].as_str(), Some("admin"));
    assert_eq!(entries[3]["action"].as_str(), Some("SEARCH"));
    assert_eq!(entries[3]["username"].as_str(), Some("anonymous"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (_, app) = seeded_app().await;

    let (status, json) = send(&app, get("/metrics")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["product_count"].as_u64(), Some(3));
    assert_eq!(json["search"]["search_count"].as_u64(), Some(0));
    assert_eq!(json["cache_hit_rate"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state());

    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str(), Some("healthy"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_router(create_test_state());

    let response = app
        .oneshot(post_product(r#"{"name": "missing fields"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
