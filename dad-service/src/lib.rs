pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Json, Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    recovery::recovery_layer,
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{CorsConfig, DadConfig};
use crate::services::{ContentService, ContentStore};

/// Where the generated OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Value of the `Server` response header.
pub const SERVER_HEADER: &str = "Dad API";

#[derive(OpenApi)]
#[openapi(
    info(title = "Dad API", description = "Random dad jokes and pickup lines"),
    paths(
        handlers::root::index,
        handlers::root::docs,
        handlers::content::random_joke,
        handlers::content::random_pickup,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::ContentSchema,
            models::Category,
            dtos::ErrorResponse,
            dtos::HealthResponse,
        )
    ),
    tags(
        (name = "Content", description = "Random content selection"),
        (name = "Service", description = "Identification and documentation"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: DadConfig,
    pub content: ContentService,
}

impl AppState {
    pub fn new(config: DadConfig, store: Arc<dyn ContentStore>) -> Self {
        Self {
            config,
            content: ContentService::new(store),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route("/joke", get(handlers::random_joke))
        .route("/pickup", get(handlers::random_pickup))
        .route("/docs", get(handlers::docs))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route_layer(from_fn(metrics_middleware));

    if state.config.swagger.enabled {
        app = app.merge(SwaggerUi::new("/swagger").url(OPENAPI_PATH, ApiDoc::openapi()));
    } else {
        // Keep the OpenAPI JSON reachable for programmatic clients
        app = app.route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }));
    }

    app.with_state(state.clone())
        .layer(SetResponseHeaderLayer::overriding(
            header::SERVER,
            HeaderValue::from_static(SERVER_HEADER),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(recovery_layer())
        .layer(cors_layer(&state.config.cors))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Ignoring invalid CORS origin '{}': {}", o, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, request_id.clone()])
        .expose_headers([request_id])
}
