//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines constants for
//! default paths, the default token, cache headers, and logging. `AppConfig`
//! is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Everything behind the gate is private to the token holder, so nothing may
// land in a shared cache. Session routes must never be cached at all.

/// Gated content (listing + files) - cacheable by the browser only
pub const HTTP_CACHE_CONTENT_MAX_AGE: u32 = 60;

pub const CACHE_CONTROL_CONTENT: &str =
    formatcp!("private, max-age={}", HTTP_CACHE_CONTENT_MAX_AGE);

/// Login/logout responses set or clear credentials
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "vestibule=debug,tower_http=debug";

/// Well-known token used when no token is configured.
///
/// Anyone who can reach the server can guess this; `main` logs a loud
/// warning whenever it is in effect.
pub const DEFAULT_TOKEN: &str = "token123";

/// Default directory of files to serve
pub const DEFAULT_FILES_ROOT: &str = "static";

/// Default directory for generated certificate material
pub const DEFAULT_CERT_DIR: &str = "certs";

/// Default listen port
pub const DEFAULT_HTTP_PORT: u16 = 8483;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// TLS settings (self-signed identity)
    #[serde(default)]
    pub tls: TlsConfig,
    /// Shared-secret token settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Served directory settings
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

/// TLS configuration.
///
/// When enabled, a fresh self-signed certificate is generated into `cert_dir`
/// at every startup, replacing whatever is already there.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "TlsConfig::default_cert_dir")]
    pub cert_dir: String,
}

impl TlsConfig {
    fn default_cert_dir() -> String {
        DEFAULT_CERT_DIR.to_string()
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_dir: Self::default_cert_dir(),
        }
    }
}

/// Shared-secret token configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// The access token. Unset or empty falls back to [`DEFAULT_TOKEN`].
    pub token: Option<String>,
}

impl AuthConfig {
    /// Resolve the effective token. Returns the token and whether the
    /// well-known default had to be substituted.
    pub fn resolve_token(&self) -> (String, bool) {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => (token.to_string(), false),
            _ => (DEFAULT_TOKEN.to_string(), true),
        }
    }
}

/// Served directory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Directory whose contents are listed and served to token holders
    #[serde(default = "FilesConfig::default_root")]
    pub root: String,
}

impl FilesConfig {
    fn default_root() -> String {
        DEFAULT_FILES_ROOT.to_string()
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Site title shown in page headers
    #[serde(default = "UiConfig::default_site_name")]
    pub site_name: String,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "UiConfig::default_version")]
    pub version: String,
}

impl UiConfig {
    fn default_site_name() -> String {
        "Vestibule".to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            site_name: Self::default_site_name(),
            version: Self::default_version(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;

        if config.files.root.is_empty() {
            return Err(ConfigError::Validation(
                "files.root must not be empty".to_string(),
            ));
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
