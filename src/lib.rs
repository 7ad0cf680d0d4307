//! FX Quote Relay Library

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod quoting;
pub mod relay;
pub mod resilience;
pub mod store;
pub mod upstream;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use quoting::QuoteService;
pub use relay::RelayClient;
