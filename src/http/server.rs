//! HTTP/HTTPS server startup logic.
//!
//! Secure mode provisions a fresh self-signed identity before binding; a
//! provisioning failure aborts startup rather than falling back to plain
//! HTTP. Plain mode binds directly with a loud warning.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::cert::{self, ProvisionError};
use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid http.host or http.port: {0}")]
    Addr(String),

    #[error("Failed to provision TLS identity: {0}")]
    Identity(#[from] ProvisionError),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP/HTTPS server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .map_err(|e| ServerError::Addr(format!("{}", e)))?;

    let handle = Handle::new();

    if config.tls.enabled {
        start_secure_server(app, addr, &config.tls.cert_dir, handle).await
    } else {
        start_plain_server(app, addr, handle).await
    }
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::warn!(
        "TLS disabled - server running on plain HTTP (not recommended outside a reverse proxy)"
    );
    tracing::info!(%addr, "Starting HTTP server");

    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

/// Start an HTTPS server with a freshly provisioned self-signed certificate.
async fn start_secure_server(
    app: Router,
    addr: SocketAddr,
    cert_dir: &str,
    handle: Handle,
) -> Result<(), ServerError> {
    // Provisioning runs exactly once, before the listener exists. Errors
    // here are fatal: no identity, no secure server.
    let identity = cert::provision(Path::new(cert_dir))?;
    tracing::info!(
        cert = %identity.cert_path.display(),
        key = %identity.key_path.display(),
        "Provisioned self-signed TLS identity"
    );

    let rustls_config = RustlsConfig::from_pem_file(&identity.cert_path, &identity.key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

    shutdown::setup_shutdown_handler(handle.clone());

    tracing::info!(%addr, "Starting HTTPS server (self-signed)");

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}
