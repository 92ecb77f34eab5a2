//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/register`, `/login`       - Account forms (strict rate limit)
//! - `/`, `/urls/*`, `/logout`   - Session-protected pages
//! - `GET /u/{id}`               - Public redirect with click tracking
//! - `GET /health`               - Store health check
//! - `/static/*`                 - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Error pages** - HTML rendering of error responses
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let account = web::routes::account_routes();
    let site = web::routes::site_routes(&state);

    let (account, site) = if behind_proxy {
        (
            account.layer(rate_limit::secure_layer(SmartIpKeyExtractor)),
            site.layer(rate_limit::layer(SmartIpKeyExtractor)),
        )
    } else {
        (
            account.layer(rate_limit::secure_layer(PeerIpKeyExtractor)),
            site.layer(rate_limit::layer(PeerIpKeyExtractor)),
        )
    };

    let routes = account
        .merge(site)
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"));

    let router = web::routes::finish(routes, state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
