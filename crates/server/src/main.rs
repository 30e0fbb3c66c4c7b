//! `ezcrypt-server` — HTTP front end for token generation and verification.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber (and OTLP export when configured).
//! 3. Load or create the key pair and build the shared [`Crypter`].
//! 4. Build the Axum router and start serving.

mod config;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use ezcrypt::{Crypter, KeyStore};
use tracing::info;

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otlp_endpoint(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        "ezcrypt-server starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key pair
    // -----------------------------------------------------------------------
    let store = KeyStore::new(&cfg.key_file_path);
    let crypter = Crypter::initialize(&store)
        .with_context(|| format!("failed to initialise key file {}", store.path().display()))?;

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(AppState::new(crypter));

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
