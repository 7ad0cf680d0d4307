//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration shared by the quote service and the relay client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Quote service listener and request budget.
    pub server: ServerConfig,

    /// Upstream price provider.
    pub upstream: UpstreamConfig,

    /// Observation store settings.
    pub store: StoreConfig,

    /// Relay client settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Quote service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path the quote endpoint is served on.
    pub route: String,

    /// Outer deadline for one inbound request, covering fetch and persist.
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            route: "/cotacao".to_string(),
            request_timeout_ms: 200,
        }
    }
}

/// What to do when the upstream envelope parses but carries no `bid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingBidPolicy {
    /// Treat the response as malformed.
    #[default]
    Reject,
    /// Accept it as an empty quote.
    Empty,
}

/// Upstream price provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL of the quote endpoint.
    pub url: String,

    /// Top-level key of the currency pair in the response (e.g., "USDBRL").
    pub pair: String,

    /// Per-call budget; narrowed further by the request deadline.
    pub timeout_ms: u64,

    pub missing_bid: MissingBidPolicy,

    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_env_proxy: bool,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://economia.awesomeapi.com.br/json/last/USD-BRL".to_string(),
            pair: "USDBRL".to_string(),
            timeout_ms: 200,
            missing_bid: MissingBidPolicy::Reject,
            use_env_proxy: true,
        }
    }
}

/// Store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Durable sqlite file.
    #[default]
    Sqlite,
    /// Process-local, lost on exit.
    Memory,
}

/// Observation store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Path of the sqlite database file.
    pub path: String,

    /// Budget for one insert; chained off the request deadline.
    pub insert_timeout_ms: u64,

    /// Pool size for the sqlite backend.
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn insert_timeout(&self) -> Duration {
        Duration::from_millis(self.insert_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            path: "./database.db".to_string(),
            insert_timeout_ms: 300,
            max_connections: 5,
        }
    }
}

/// Relay client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the quote service endpoint.
    pub service_url: String,

    /// Outer deadline for the whole call to the service.
    pub timeout_ms: u64,

    /// File the observed quote is written to.
    pub output_path: String,

    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_env_proxy: bool,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8080/cotacao".to_string(),
            timeout_ms: 300,
            output_path: "cotacao.txt".to_string(),
            use_env_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
