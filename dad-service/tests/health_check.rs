mod common;

use axum::http::{header, StatusCode};
use common::{get, test_router};
use dad_service::services::MockContentStore;
use std::sync::Arc;

#[tokio::test]
async fn health_check_works() {
    let app = test_router(Arc::new(MockContentStore::default()));

    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "dad-service");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_check_reports_unreachable_store() {
    let app = test_router(Arc::new(MockContentStore::unavailable()));

    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["status"], "unhealthy");
}

#[tokio::test]
async fn readiness_follows_store() {
    let healthy = test_router(Arc::new(MockContentStore::default()));
    assert_eq!(get(&healthy, "/ready").await.status, StatusCode::OK);

    let unhealthy = test_router(Arc::new(MockContentStore::unavailable()));
    assert_eq!(
        get(&unhealthy, "/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn metrics_endpoint_returns_plain_text() {
    let app = test_router(Arc::new(MockContentStore::default()));

    let response = get(&app, "/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}
