//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/v1/contacts*`         - Contact resource (see [`api::routes::contact_routes`])
//! - `GET /health`               - Health check: DB, cache, avatar storage
//! - `GET /api-docs/openapi.json` - OpenAPI document
//! - `/public/*`                 - Static files, including uploaded avatars
//!
//! Unknown paths answer with the `404` error envelope.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the API (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling, see [`normalize_paths`]

use crate::api;
use crate::api::handlers::{health_handler, resource_not_found};
use crate::api::middleware::{rate_limit, tracing};
use crate::api::openapi::openapi_handler;
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::PathBuf;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Router settings taken from [`Config`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub rate_limit_enabled: bool,
    /// When `true`, rate limiting reads client IP from `X-Forwarded-For` /
    /// `X-Real-IP` headers instead of the peer socket address.
    pub behind_proxy: bool,
    /// Directory served under `/public`.
    pub public_dir: PathBuf,
}

impl RouterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rate_limit_enabled: config.rate_limit_enabled,
            behind_proxy: config.behind_proxy,
            public_dir: config.public_dir.clone(),
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// Peer-IP rate limiting needs `ConnectInfo<SocketAddr>`, so serve the router
/// with `into_make_service_with_connect_info` when `rate_limit_enabled` is set.
pub fn app_router(state: AppState, options: &RouterOptions) -> Router {
    let api_router = api::routes::contact_routes(state.avatar_max_bytes);

    let api_router = match (options.rate_limit_enabled, options.behind_proxy) {
        (false, _) => api_router,
        (true, false) => api_router.layer(rate_limit::layer()),
        (true, true) => api_router.layer(rate_limit::proxy_layer()),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .nest("/api/v1", api_router)
        .nest_service("/public", ServeDir::new(&options.public_dir))
        .fallback(resource_not_found)
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps the router so `/api/v1/contacts/` and `/api/v1/contacts` route alike.
///
/// Applied outside the router because routing happens before any layer added
/// with [`Router::layer`] sees the request.
pub fn normalize_paths(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
