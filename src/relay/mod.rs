//! Relay client.
//!
//! # Data Flow
//! ```text
//! relay-client binary
//!     → RelayClient::run (outer deadline)
//!     → GET quote service → {"bid": ...}
//!     → write_artifact ("dolar: <bid>")
//! ```

pub mod client;
pub mod types;

pub use client::{artifact_line, write_artifact, RelayClient};
pub use types::{ClientError, ClientResult};
