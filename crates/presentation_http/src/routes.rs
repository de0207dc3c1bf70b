//! Route and middleware assembly for the server binary

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
};
use domain::HttpVerb;
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{gpt_api::GptApi, handlers, middleware::RequestIdLayer};

/// Liveness route added next to the API's own routes
pub const HEALTH_PATH: &str = "/health";

/// CORS policy from the server configuration
///
/// An empty origin list allows any origin.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers(Any)
}

/// Create the served router: the API, the health route, and the middleware stack
pub fn create_router(api: GptApi, config: &ServerConfig) -> Router {
    let serve_health = !api.has_endpoint(HttpVerb::Get, HEALTH_PATH);
    let mut router = api.into_router();
    if serve_health {
        router = router.route(HEALTH_PATH, get(handlers::health::health_check));
    } else {
        warn!("GET {HEALTH_PATH} is registered by the API; built-in health check disabled");
    }

    // Order matters: last added = outermost
    let router = router
        .layer(DefaultBodyLimit::max(config.max_body_size_bytes))
        .layer(TraceLayer::new_for_http());

    let router = if config.cors_enabled {
        router.layer(cors_layer(config))
    } else {
        router
    };

    router.layer(RequestIdLayer::new())
}
