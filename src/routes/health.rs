//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is
//! running. Deliberately ungated: probes have no cookie jar.

/// Health check handler.
pub async fn health() -> &'static str {
    "ok"
}
