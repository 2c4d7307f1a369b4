//! Vestibule: a token-gated static file server.
//!
//! Serves a directory of files behind a single shared-secret token,
//! optionally over TLS with a self-signed certificate generated at startup.

pub mod auth;
pub mod cert;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;
