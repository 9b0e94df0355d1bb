use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        crate::services::get_metrics(),
    )
}
