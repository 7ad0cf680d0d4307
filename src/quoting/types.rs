//! Quote relay types.

use serde::{Deserialize, Serialize};
use std::num::ParseFloatError;
use thiserror::Error;

use crate::store::StoreError;
use crate::upstream::UpstreamError;

/// An observed bid, kept as the provider's decimal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub bid: String,
}

impl Quote {
    pub fn new(bid: impl Into<String>) -> Self {
        Self { bid: bid.into() }
    }

    /// Parse the bid as a base-10 float for persistence.
    pub fn value(&self) -> Result<f64, QuoteError> {
        let value: f64 = self.bid.parse().map_err(|source| QuoteError::Conversion {
            bid: self.bid.clone(),
            source: Some(source),
        })?;

        if !value.is_finite() {
            return Err(QuoteError::Conversion {
                bid: self.bid.clone(),
                source: None,
            });
        }

        Ok(value)
    }
}

/// Wire body of the quote endpoint: `{"bid": "<decimal string>"}`.
///
/// A body without `bid` decodes to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub bid: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self { bid: quote.bid }
    }
}

/// Per-request pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Fetching,
    Persisting,
    Responding,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Fetching => "fetching",
            Stage::Persisting => "persisting",
            Stage::Responding => "responding",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

/// Errors that end a quote request.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Fetching from the provider failed.
    #[error("fetch failed: {0}")]
    Upstream(#[from] UpstreamError),

    /// The bid is not a finite base-10 number.
    #[error("cannot convert bid '{bid}' to a number")]
    Conversion {
        bid: String,
        #[source]
        source: Option<ParseFloatError>,
    },

    /// Writing the observation failed.
    #[error("persist failed: {0}")]
    Persistence(#[from] StoreError),
}

impl QuoteError {
    /// Stage the request was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            QuoteError::Upstream(_) => Stage::Fetching,
            QuoteError::Conversion { .. } | QuoteError::Persistence(_) => Stage::Persisting,
        }
    }

    /// Fixed message returned to callers; never includes internal detail.
    pub fn public_message(&self) -> &'static str {
        match self.stage() {
            Stage::Fetching => "failed to fetch quote",
            _ => "failed to persist quote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parses_decimal_string() {
        assert_eq!(Quote::new("5.32").value().unwrap(), 5.32);
        assert_eq!(Quote::new("1e2").value().unwrap(), 100.0);
    }

    #[test]
    fn test_value_rejects_malformed() {
        for bid in ["", "5,32", "abc", "5.32x"] {
            let err = Quote::new(bid).value().unwrap_err();
            assert!(matches!(err, QuoteError::Conversion { .. }), "bid {bid:?}");
        }
    }

    #[test]
    fn test_value_rejects_non_finite() {
        assert!(Quote::new("NaN").value().is_err());
        assert!(Quote::new("inf").value().is_err());
    }

    #[test]
    fn test_public_message_does_not_leak() {
        let err = QuoteError::Upstream(UpstreamError::Unavailable(
            "connection refused 10.0.0.1".into(),
        ));
        assert_eq!(err.public_message(), "failed to fetch quote");

        let err = Quote::new("garbage").value().unwrap_err();
        assert_eq!(err.public_message(), "failed to persist quote");
        assert_eq!(err.stage(), Stage::Persisting);
    }

    #[test]
    fn test_response_without_bid_is_empty() {
        let resp: QuoteResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.bid, "");

        let resp: QuoteResponse = serde_json::from_str(r#"{"bid":"5.32"}"#).unwrap();
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"bid":"5.32"}"#);
    }
}
