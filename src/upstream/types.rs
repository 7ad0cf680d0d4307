//! Upstream-specific error definitions.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while fetching a quote from the price provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure: connection refused, DNS, TLS, or deadline exceeded.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Body was not JSON or did not carry the expected nested `bid` string.
    #[error("upstream response malformed: {0}")]
    Parse(String),
}

impl UpstreamError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Unavailable(_) => "unavailable",
            UpstreamError::Status(_) => "status",
            UpstreamError::Parse(_) => "parse",
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
