use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Path prefixes served by the API documentation UI.
pub const DOCS_PATH_PREFIXES: &[&str] = &["/swagger", "/api-docs", "/docs"];

fn is_docs_route(path: &str) -> bool {
    DOCS_PATH_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
}

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let is_docs = is_docs_route(req.uri().path());

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );

    // Swagger UI needs inline scripts/styles and may be framed by the same origin
    if is_docs {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; \
                 script-src 'self' 'unsafe-inline'; \
                 style-src 'self' 'unsafe-inline'; \
                 img-src 'self' data:; \
                 font-src 'self'; \
                 connect-src 'self'",
            ),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("SAMEORIGIN"),
        );
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, middleware::from_fn, routing::get};
    use tower::util::ServiceExt;

    #[test]
    fn recognises_docs_routes() {
        assert!(is_docs_route("/swagger/index.html"));
        assert!(is_docs_route("/api-docs/openapi.json"));
        assert!(is_docs_route("/docs"));
        assert!(!is_docs_route("/joke"));
        assert!(!is_docs_route("/swaggerish"));
    }

    #[tokio::test]
    async fn api_routes_get_strict_policy() {
        let app = Router::new()
            .route("/joke", get(|| async { "{}" }))
            .layer(from_fn(security_headers_middleware));

        let response = app
            .oneshot(Request::builder().uri("/joke").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }
}
