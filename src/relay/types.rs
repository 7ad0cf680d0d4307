//! Relay client error definitions.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a relay client run.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or the outer deadline elapsed.
    #[error("request to quote service failed: {0}")]
    Request(String),

    /// Quote service answered with a non-2xx status.
    #[error("quote service returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body was not the expected JSON.
    #[error("failed to decode quote service response: {0}")]
    Decode(String),

    /// Writing the output artifact failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// True for every failure that happened before anything was written.
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, ClientError::Write { .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
