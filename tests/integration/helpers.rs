//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use marketdesk_api::{AppState, build_router};
use marketdesk_core::config::AppConfig;
use marketdesk_database::MemoryEntityStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection and seeding
    pub store: MemoryEntityStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty memory store
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given config
    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryEntityStore::new();
        let state = AppState::new(config.clone(), Arc::new(store.clone()));

        Self {
            router: build_router(state),
            store,
            config,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
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

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> TestResponse {
        self.request("PUT", path, body).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
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
    /// Whether the envelope reports success
    pub fn success(&self) -> bool {
        self.body["success"].as_bool().unwrap_or(false)
    }

    /// The envelope `data` field
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
