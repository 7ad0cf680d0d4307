//! FX quote relay service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                  QUOTE SERVICE                   │
//!                        │                                                  │
//!   GET /cotacao         │  ┌────────┐   ┌──────────────┐   ┌───────────┐   │
//!   ─────────────────────┼─▶│  http  │──▶│   quoting    │──▶│ upstream  │───┼──▶ price provider
//!                        │  │ server │   │   service    │   │  client   │   │
//!                        │  └────────┘   └──────┬───────┘   └───────────┘   │
//!                        │       ▲              │                            │
//!   {"bid": "..."}       │       │              ▼                            │
//!   ◀────────────────────┼───────┘       ┌──────────────┐                    │
//!                        │               │    store     │──▶ sqlite file     │
//!                        │               └──────────────┘                    │
//!                        │                                                  │
//!                        │  request deadline (200ms)                        │
//!                        │    ├─ upstream: min(remaining, 200ms)            │
//!                        │    └─ insert:   min(remaining, 300ms)            │
//!                        └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use fx_relay::config::load_or_default;
use fx_relay::http::HttpServer;
use fx_relay::lifecycle::{build_service, open_store, signals, Shutdown, StartupError};
use fx_relay::observability::{init_logging, metrics};

#[derive(Parser)]
#[command(name = "fx-relay")]
#[command(about = "Relays and records the upstream FX quote", long_about = None)]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref()).map_err(StartupError::from)?;

    init_logging(&config.observability.log_level);
    tracing::info!("fx-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        upstream = %config.upstream.url,
        request_timeout_ms = config.server.request_timeout_ms,
        upstream_timeout_ms = config.upstream.timeout_ms,
        insert_timeout_ms = config.store.insert_timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let store = open_store(&config.store).await?;
    let service = build_service(&config, store)?;

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(StartupError::Bind)?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move { signals::trigger_on_ctrl_c(&ctrl_c).await });

    let server = HttpServer::new(config.server.clone(), service);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
