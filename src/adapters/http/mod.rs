//! HTTP adapters - REST API implementations.
//!
//! Each area has its own router; [`api_router`] merges them and
//! [`with_layers`] adds tracing, CORS and the request timeout.

pub mod analysis;
pub mod dashboard;
pub mod error;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

pub use analysis::{analysis_routes, AnalysisAppState};
pub use dashboard::{dashboard_routes, DashboardAppState};
pub use error::{ApiError, ErrorResponse};

/// All API routes without middleware.
pub fn api_router(analysis: AnalysisAppState, dashboard: DashboardAppState) -> Router {
    Router::new()
        .merge(analysis_routes(analysis))
        .merge(dashboard_routes(dashboard))
}

/// Wraps `router` in the standard middleware stack.
pub fn with_layers(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// Permissive in development; otherwise only the configured origins.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.is_development() && server.cors_origins.is_none() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
