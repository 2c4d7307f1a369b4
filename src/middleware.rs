//! Request middleware: request-ID tracing and the session gate.
//!
//! Every request gets a UUID v4 and a tracing span wrapping its whole
//! lifecycle, so all logs emitted while handling it carry a `request_id`
//! field. Gated routes additionally pass through [`gate_layer`], which
//! consults the [`SessionGate`](crate::auth::SessionGate) before any content
//! handler runs.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use http::header::{HeaderValue, CACHE_CONTROL};
use tracing::Instrument;
use uuid::Uuid;

use crate::auth::{cookie_names, Access};
use crate::config::CACHE_CONTROL_NO_STORE;
use crate::routes::auth::render_login;
use crate::state::AppState;

/// Extension type for accessing the request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Outermost middleware: generates a request ID and creates a request span.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    let mut request = request;
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

/// Middleware guarding gated content.
///
/// Grants pass through to the inner handler (listing or file serving).
/// Denials render the login view with a 200 status and no warning:
/// unauthenticated visitors see a login prompt, not an error.
pub async fn gate_layer(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let presented = jar.get(cookie_names::TOKEN).map(|cookie| cookie.value());

    match state.gate.authorize(presented) {
        Access::Granted => next.run(request).await,
        Access::Denied => {
            tracing::debug!("Denied access to gated content, rendering login view");
            let mut response = render_login(&state, false).into_response();
            // The denial carries the login view, not gated content; it must
            // never be served from a cache after the client logs in. Setting
            // the header here wins over the content cache layer, which only
            // fills in absent headers.
            response.headers_mut().insert(
                CACHE_CONTROL,
                HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
            );
            response
        }
    }
}
