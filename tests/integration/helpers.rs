//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use storehub_api::{ShutdownSignal, build_app, build_state};
use storehub_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shutdown handle shared with every request
    pub shutdown: ShutdownSignal,
}

impl TestApp {
    /// Create a new test application backed by a fresh in-memory store
    pub async fn new() -> Self {
        Self::with_config(AppConfig::in_memory()).await
    }

    /// Create a test application from an explicit configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let shutdown = ShutdownSignal::new();
        let state = build_state(config, shutdown.clone())
            .await
            .expect("Failed to build state");
        let router = build_app(state).expect("Failed to build router");

        Self { router, shutdown }
    }

    /// Make an HTTP request with an optional JSON body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.raw_request(method, path, body_str).await
    }

    /// Make an HTTP request with a verbatim body
    pub async fn raw_request(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// POST a record and return its assigned id
    pub async fn create(&self, path: &str, body: Value) -> String {
        let response = self.request("POST", path, Some(body)).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Create failed: {:?}",
            response.body
        );

        response
            .body
            .get("id")
            .and_then(|v| v.as_str())
            .expect("No id in create response")
            .to_string()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error response.
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error").and_then(|v| v.as_str())
    }

    /// Number of items in an array response.
    pub fn len(&self) -> usize {
        self.body.as_array().map(Vec::len).unwrap_or(0)
    }

    /// Whether the array response contains a record with this id.
    pub fn contains_id(&self, id: &str) -> bool {
        self.body
            .as_array()
            .is_some_and(|items| items.iter().any(|item| item["id"] == id))
    }
}
