//! Vestibule: a token-gated static file server.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file, resolves the access token, compiles the
//! embedded templates, sets up the Axum router with the session gate, and
//! starts the HTTP(S) server. Secure mode provisions a self-signed TLS
//! identity before the listener comes up.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vestibule::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use vestibule::http::start_server;
use vestibule::routes::create_router;
use vestibule::state::AppState;
use vestibule::templates::init_templates;

/// Vestibule: a token-gated static file server
#[derive(Parser, Debug)]
#[command(name = "vestibule", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "vestibule=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Serve over TLS with a self-signed certificate (overrides tls.enabled)
    #[arg(long)]
    secure: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load(&args.config)?;
    if args.secure {
        config.tls.enabled = true;
    }

    tracing::info!(
        files_root = %config.files.root,
        tls = config.tls.enabled,
        "Loaded configuration"
    );

    // Resolve the access token; the gate compares whatever it is given, so
    // the fallback to a well-known default has to be loud.
    let (token, defaulted) = config.auth.resolve_token();
    if defaulted {
        tracing::warn!(
            "No access token configured - using the well-known default token. \
             Set auth.token before exposing this server."
        );
    }

    // Initialize embedded Tera templates
    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    // Create application state and router
    let state = AppState::new(config.clone(), tera, token);
    let app = create_router(state);

    // Start server; secure mode provisions the TLS identity first and any
    // provisioning failure aborts startup
    start_server(app, &config).await?;

    tracing::info!("Server shutting down");
    Ok(())
}
