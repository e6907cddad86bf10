//! Agency intake service
//!
//! Backend for the agency marketing site:
//! - Contact submission intake with fixed-window rate limiting and
//!   heuristic spam scoring
//! - Portfolio resource with filtering, search, and pagination
//! - Admin workflow endpoints over stored submissions

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use api::{router, AppState, GateConfig};
use store::MemoryStore;
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Bearer token required on admin routes; leave unset to run them open.
    #[serde(default)]
    admin_token: Option<String>,

    #[serde(default)]
    rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct RateLimitConfig {
    #[serde(default = "default_window_ms")]
    window_ms: i64,
    #[serde(default = "default_max_requests")]
    max_requests: u32,
    #[serde(default = "default_sweep_interval_secs")]
    sweep_interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_window_ms() -> i64 {
    intake_core::limits::RATE_LIMIT_WINDOW_MS
}

fn default_max_requests() -> u32 {
    intake_core::limits::RATE_LIMIT_MAX_REQUESTS
}

fn default_sweep_interval_secs() -> u64 {
    300
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_token: None,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting agency intake service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    if config.admin_token.is_none() {
        warn!("No admin token configured; admin routes are open");
    }

    // In-memory store backing both resources
    let store = Arc::new(MemoryStore::new());
    health().store.set_healthy();

    // Create application state
    let state = AppState::with_gate(
        store.clone(),
        store,
        GateConfig {
            window_ms: config.rate_limit.window_ms,
            max_requests: config.rate_limit.max_requests,
        },
    )
    .with_admin_token(config.admin_token.clone());

    // Periodic sweep keeps the gate's identity map bounded
    let sweep_interval = Duration::from_secs(config.rate_limit.sweep_interval_secs);
    let _gate_sweep = state.start_gate_sweep(sweep_interval);
    info!("Started gate sweep task (every {:?})", sweep_interval);

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("AGENCY")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat overrides for the nested rate limit section; the config crate's
    // nested env parsing is unreliable with underscored field names.
    if let Ok(window_ms) = std::env::var("AGENCY_RATE_LIMIT_WINDOW_MS") {
        config.rate_limit.window_ms = window_ms.parse().context("Invalid window_ms")?;
    }
    if let Ok(max_requests) = std::env::var("AGENCY_RATE_LIMIT_MAX_REQUESTS") {
        config.rate_limit.max_requests = max_requests.parse().context("Invalid max_requests")?;
    }
    if let Ok(token) = std::env::var("AGENCY_ADMIN_TOKEN") {
        config.admin_token = Some(token);
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
