//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::auth::{SessionGate, SessionIssuer};
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, the Tera template engine, and the
/// access-control gate and issuer. The token is injected once at construction
/// and is immutable for the process lifetime, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub gate: Arc<SessionGate>,
    pub issuer: Arc<SessionIssuer>,
}

impl AppState {
    /// Creates application state from the given configuration, templates,
    /// and resolved access token.
    pub fn new(config: AppConfig, tera: Tera, token: String) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            gate: Arc::new(SessionGate::new(token.clone())),
            issuer: Arc::new(SessionIssuer::new(token)),
        }
    }
}
