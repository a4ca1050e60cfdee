//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use product_catalog::{
    api::create_router,
    cache::ProductCache,
    storage::{InMemoryProductRepository, SqliteProductRepository},
    AppState,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::in_memory())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn price(json: &Value) -> Decimal {
    json["price"].as_str().unwrap().parse().unwrap()
}

fn timestamp(json: &Value, field: &str) -> DateTime<Utc> {
    json[field].as_str().unwrap().parse().unwrap()
}

const WIDGET: &str = r#"{"name":"Widget","price":"9.99","category":"tools","stock":5}"#;

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/products")
                .header("content-type", "application/json")
                .body(Body::from(WIDGET))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_to_json(response.into_body()).await;
    assert!(json["id"].is_i64());
    assert_eq!(json["name"], "Widget");
    assert_eq!(price(&json), Decimal::new(999, 2));
    assert_eq!(json["stock"], 5);
    assert_eq!(json["created_date"], json["last_updated_date"]);
}

#[tokio::test]
async fn test_create_endpoint_validation() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/products",
        Some(r#"{"name":" ","price":"1","stock":1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Name"));

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(r#"{"name":"Widget","price":"-1","stock":1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(r#"{"name":"Widget","price":"1","stock":-1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let (status, json) = send(&app, "POST", "/products", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_create_missing_required_field() {
    let app = create_test_app();

    let (status, json) = send(&app, "POST", "/products", Some(r#"{"price":"1","stock":1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("name"));

    let (_, page) = send(&app, "GET", "/products", None).await;
    assert_eq!(page["total_elements"], 0);
}

#[tokio::test]
async fn test_update_with_wrong_field_type() {
    let app = create_test_app();
    let (_, created) = send(&app, "POST", "/products", Some(WIDGET)).await;
    let uri = format!("/products/{}", created["id"]);

    let (status, json) = send(&app, "PUT", &uri, Some(r#"{"stock":"many"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/products",
        Some(r#"{"id":99,"name":"Widget","price":"1","stock":1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"], 1);
}

// == Full Lifecycle ==

#[tokio::test]
async fn test_create_update_delete_lifecycle() {
    let app = create_test_app();

    let (status, created) = send(&app, "POST", "/products", Some(WIDGET)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(
        timestamp(&created, "created_date"),
        timestamp(&created, "last_updated_date")
    );

    let uri = format!("/products/{}", id);
    let (status, updated) = send(&app, "PUT", &uri, Some(r#"{"price":"12.50"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["stock"], 5);
    assert_eq!(price(&updated), Decimal::new(1250, 2));
    assert_eq!(updated["created_date"], created["created_date"]);
    assert!(timestamp(&updated, "last_updated_date") > timestamp(&updated, "created_date"));

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

// == Read Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/products/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("12345"));
}

#[tokio::test]
async fn test_update_endpoint_not_found() {
    let app = create_test_app();

    let (status, _) = send(&app, "PUT", "/products/7", Some(r#"{"stock":1}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_endpoint_paginates() {
    let app = create_test_app();
    for i in 0..5 {
        let body = format!(r#"{{"name":"p{}","price":"1.00","stock":{}}}"#, i, i);
        send(&app, "POST", "/products", Some(&body)).await;
    }

    let (status, json) = send(&app, "GET", "/products?page=1&size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_elements"], 5);
    assert_eq!(json["total_pages"], 3);
    let names: Vec<_> = json["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["p2", "p3"]);

    let (status, json) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["size"], 10);
    assert_eq!(json["content"].as_array().unwrap().len(), 5);

    let (status, _) = send(&app, "GET", "/products?size=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &app,
        "GET",
        "/products?page=18446744073709551615&size=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_category_endpoint_reflects_updates() {
    let app = create_test_app();
    let (_, created) = send(&app, "POST", "/products", Some(WIDGET)).await;
    send(
        &app,
        "POST",
        "/products",
        Some(r#"{"name":"Rake","price":"20","category":"garden","stock":2}"#),
    )
    .await;

    let (status, tools) = send(&app, "GET", "/products/category/tools", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tools.as_array().unwrap().len(), 1);
    assert_eq!(price(&tools[0]), Decimal::new(999, 2));

    let uri = format!("/products/{}", created["id"]);
    send(&app, "PUT", &uri, Some(r#"{"price":"12.50"}"#)).await;

    let (_, tools) = send(&app, "GET", "/products/category/tools", None).await;
    assert_eq!(price(&tools[0]), Decimal::new(1250, 2));

    let (_, unknown) = send(&app, "GET", "/products/category/Tools", None).await;
    assert!(unknown.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_endpoint_tracks_hits() {
    let app = create_test_app();
    let (_, created) = send(&app, "POST", "/products", Some(WIDGET)).await;
    let uri = format!("/products/{}", created["id"]);

    send(&app, "GET", &uri, None).await;
    send(&app, "GET", &uri, None).await;

    let (status, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["enabled"], true);
    assert_eq!(stats["product"]["hits"], 1);
    assert_eq!(stats["product"]["misses"], 1);
    assert_eq!(stats["product"]["total_entries"], 1);
}

#[tokio::test]
async fn test_disabled_cache_still_serves_requests() {
    let state = AppState::new(
        Arc::new(InMemoryProductRepository::new()),
        Arc::new(ProductCache::disabled()),
    );
    let app = create_router(state);

    let (_, created) = send(&app, "POST", "/products", Some(WIDGET)).await;
    let uri = format!("/products/{}", created["id"]);
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["enabled"], false);
    assert_eq!(stats["product"]["total_entries"], 0);
}

#[tokio::test]
async fn test_lifecycle_over_sqlite() {
    let repository = SqliteProductRepository::in_memory().await.unwrap();
    let app = create_router(AppState::new(
        Arc::new(repository),
        Arc::new(ProductCache::new(true)),
    ));

    let (status, created) = send(&app, "POST", "/products", Some(WIDGET)).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/products/{}", created["id"]);

    let (status, updated) = send(&app, "PUT", &uri, Some(r#"{"stock":0}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stock"], 0);
    assert_eq!(price(&updated), Decimal::new(999, 2));

    let (_, tools) = send(&app, "GET", "/products/category/tools", None).await;
    assert_eq!(tools[0]["stock"], 0);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Health Endpoint Test ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
