//! HTTP route handlers for the gateway.
//!
//! The route surface is small: the gated root (listing + file serving),
//! the login/logout transitions, and a health probe. Every gated route sits
//! behind the session-gate middleware; session routes are marked `no-store`
//! so credentials never land in a cache.

pub mod auth;
pub mod health;
pub mod listing;

use axum::{
    middleware,
    routing::{any, get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_CONTENT, CACHE_CONTROL_NO_STORE};
use crate::middleware::{gate_layer, request_id_layer};
use crate::state::AppState;

/// Creates the Axum router with all routes, the session gate, and cache
/// headers.
pub fn create_router(state: AppState) -> Router {
    // Gated content: the directory listing at "/" and raw files below it.
    // The gate middleware runs before either handler; the file service is a
    // plain ServeDir over the configured root.
    let gated_routes = Router::new()
        .route("/", get(listing::index))
        .fallback_service(ServeDir::new(&state.config.files.root))
        .layer(middleware::from_fn_with_state(state.clone(), gate_layer))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_CONTENT),
        ));

    // Session transitions - never cached. A non-POST hit on /login is
    // redirected back to the gated root instead of a method error.
    let session_routes = Router::new()
        .route("/login", post(auth::login).fallback(auth::login_redirect))
        .route("/logout", any(auth::logout))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .merge(session_routes)
        .merge(health_routes)
        .merge(gated_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
