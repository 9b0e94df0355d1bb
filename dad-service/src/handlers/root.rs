use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

pub const SERVICE_IDENT: &str = "Dad API";
pub const SWAGGER_INDEX: &str = "/swagger/index.html";

/// Service identification
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Fixed identification text", body = String, content_type = "text/plain")
    ),
    tag = "Service"
)]
pub async fn index() -> &'static str {
    SERVICE_IDENT
}

/// Redirect to the Swagger UI
#[utoipa::path(
    get,
    path = "/docs",
    responses(
        (status = 302, description = "Redirect to the documentation index")
    ),
    tag = "Service"
)]
pub async fn docs() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, SWAGGER_INDEX)])
}
