//! HTTP server module with TLS support.
//!
//! Two modes:
//! - **Secure**: a self-signed certificate is provisioned at startup and the
//!   server accepts TLS connections
//! - **Plain**: HTTP only (for development or behind a reverse proxy)
//!
//! The server includes graceful shutdown on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
