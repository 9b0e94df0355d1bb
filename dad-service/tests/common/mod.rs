//! Shared helpers for dad-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use dad_service::{build_router, config::DadConfig, services::MockContentStore, AppState};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config(overrides: &[(&str, &str)]) -> DadConfig {
    let mut vars: HashMap<String, String> = HashMap::from([(
        "MONGO".to_string(),
        "mongodb://127.0.0.1:27017".to_string(),
    )]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    DadConfig::from_lookup(CoreConfig { port: 0 }, |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

pub fn test_router(store: Arc<MockContentStore>) -> Router {
    build_router(AppState::new(test_config(&[]), store))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not UTF-8")
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}
