use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use fx_relay::config::{load_or_default, validate_client, ConfigError};
use fx_relay::observability::init_logging;
use fx_relay::relay::RelayClient;

#[derive(Parser)]
#[command(name = "relay-client")]
#[command(about = "Fetch the relayed FX quote and write it to a file", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; its [client] section is used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Quote service URL (overrides the config file).
    #[arg(short, long)]
    url: Option<String>,

    /// Outer deadline for the whole call, in milliseconds.
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Output file (overwritten on success).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.observability.log_level);

    let mut client_config = config.client;
    if let Some(url) = cli.url {
        client_config.service_url = url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        client_config.timeout_ms = timeout_ms;
    }
    if let Err(errors) = validate_client(&client_config) {
        eprintln!(
            "Error: invalid configuration: {}",
            ConfigError::Validation(errors)
        );
        return ExitCode::FAILURE;
    }
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&client_config.output_path));

    let client = match RelayClient::new(client_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    match client.run(&output).await {
        Ok(bid) => {
            tracing::info!(bid = %bid, output = %output.display(), "Quote saved");
            println!("Quote saved to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) if e.is_fetch_failure() => {
            tracing::error!(error = %e, "Failed to fetch quote");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to write quote file");
            ExitCode::FAILURE
        }
    }
}
