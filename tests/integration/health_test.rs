//! Integration tests for the health endpoint and routing.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use storehub_core::config::AppConfig;

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["provider"], "memory");
    assert_eq!(response.body["data"]["database"], "connected");
    assert!(response.body["data"].get("database_latency_ms").is_none());
    assert!(response.body["data"].get("database_error").is_none());
}

#[tokio::test]
async fn test_unknown_resource_is_not_found() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/widgets", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.request("PATCH", "/api/products", None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_requests_after_shutdown_are_cancelled() {
    let app = helpers::TestApp::new().await;
    app.shutdown.trigger();
    assert!(app.shutdown.is_triggered());

    let response = app.request("GET", "/api/products", None).await;

    assert_eq!(response.status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(response.error_code(), Some("CANCELLED"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = AppConfig::in_memory();
    config.server.max_body_bytes = 128;
    let app = helpers::TestApp::with_config(config).await;

    let small = json!({ "name": "Tea", "cost": 2.0 });
    let response = app.request("POST", "/api/products", Some(small)).await;
    assert_eq!(response.status, StatusCode::OK);

    let large = json!({ "name": "Tea", "description": "x".repeat(512), "cost": 2.0 });
    let response = app.request("POST", "/api/products", Some(large)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));

    let all = app.request("GET", "/api/products/All", None).await;
    assert_eq!(all.len(), 1);
}
