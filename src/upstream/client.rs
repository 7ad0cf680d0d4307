//! Price provider HTTP client with deadline and error handling.
//!
//! # Responsibilities
//! - Issue exactly one GET per call to the configured provider URL
//! - Bound the whole exchange (connect, headers, body) by the caller's deadline
//! - Extract the nested `<pair>.bid` string from the JSON body

use reqwest::Client;
use serde_json::Value;

use crate::config::{MissingBidPolicy, UpstreamConfig};
use crate::quoting::Quote;
use crate::resilience::Deadline;
use crate::upstream::types::{UpstreamError, UpstreamResult};

/// HTTP client for the upstream price provider.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Create a new upstream client.
    pub fn new(config: UpstreamConfig) -> UpstreamResult<Self> {
        let mut builder = Client::builder().timeout(config.timeout());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| {
                UpstreamError::Unavailable(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Fetch the current quote.
    ///
    /// The effective deadline is `deadline` narrowed to the configured per-call budget.
    pub async fn fetch_quote(&self, deadline: Deadline) -> UpstreamResult<Quote> {
        let deadline = deadline.child(self.config.timeout());

        let body = deadline
            .run(self.get_body())
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))??;

        parse_quote(&body, &self.config.pair, self.config.missing_bid)
    }

    async fn get_body(&self) -> UpstreamResult<Vec<u8>> {
        let resp = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(status = %status, url = %self.config.url, "Upstream responded");

        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))
    }
}

/// Extract `{"<pair>": {"bid": "<string>"}}` from a provider body.
pub fn parse_quote(body: &[u8], pair: &str, policy: MissingBidPolicy) -> UpstreamResult<Quote> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Parse(e.to_string()))?;

    if !value.is_object() {
        return Err(UpstreamError::Parse("expected a JSON object".to_string()));
    }

    match value.get(pair).and_then(|p| p.get("bid")) {
        Some(Value::String(bid)) => Ok(Quote::new(bid.clone())),
        Some(other) => Err(UpstreamError::Parse(format!(
            "{}.bid is not a string: {}",
            pair, other
        ))),
        None => match policy {
            MissingBidPolicy::Reject => {
                Err(UpstreamError::Parse(format!("missing field {}.bid", pair)))
            }
            MissingBidPolicy::Empty => {
                tracing::warn!(pair = %pair, "Upstream response has no bid, using empty quote");
                Ok(Quote::new(String::new()))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_bid() {
        let body = br#"{"USDBRL":{"code":"USD","codein":"BRL","bid":"5.3210","ask":"5.33"}}"#;
        let quote = parse_quote(body, "USDBRL", MissingBidPolicy::Reject).unwrap();
        assert_eq!(quote.bid, "5.3210");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_quote(b"<html>oops", "USDBRL", MissingBidPolicy::Empty).unwrap_err();
        assert!(matches!(err, UpstreamError::Parse(_)));
    }

    #[test]
    fn test_non_object_envelope_is_parse_error() {
        let err = parse_quote(b"[1,2,3]", "USDBRL", MissingBidPolicy::Empty).unwrap_err();
        assert!(matches!(err, UpstreamError::Parse(_)));
    }

    #[test]
    fn test_missing_bid_follows_policy() {
        let body = br#"{"USDBRL":{"ask":"5.33"}}"#;

        let err = parse_quote(body, "USDBRL", MissingBidPolicy::Reject).unwrap_err();
        assert!(err.to_string().contains("USDBRL.bid"));

        let quote = parse_quote(body, "USDBRL", MissingBidPolicy::Empty).unwrap();
        assert_eq!(quote.bid, "");
    }

    #[test]
    fn test_wrong_pair_is_missing() {
        let body = br#"{"EURBRL":{"bid":"6.10"}}"#;
        assert!(parse_quote(body, "USDBRL", MissingBidPolicy::Reject).is_err());
    }

    #[test]
    fn test_numeric_bid_is_rejected() {
        let body = br#"{"USDBRL":{"bid":5.32}}"#;
        let err = parse_quote(body, "USDBRL", MissingBidPolicy::Empty).unwrap_err();
        assert!(matches!(err, UpstreamError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        let config = UpstreamConfig {
            url: "http://127.0.0.1:1/json".to_string(),
            use_env_proxy: false,
            ..UpstreamConfig::default()
        };
        let client = UpstreamClient::new(config).unwrap();

        let err = client
            .fetch_quote(Deadline::after(std::time::Duration::from_millis(500)))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Unavailable(_)));
    }
}
