//! Fetch → persist → respond pipeline for one quote request.

use std::sync::Arc;
use std::time::Duration;

use crate::observability::metrics;
use crate::quoting::types::{Quote, QuoteError, Stage};
use crate::resilience::Deadline;
use crate::store::ObservationStore;
use crate::upstream::UpstreamClient;

/// Orchestrates one request under a single parent deadline.
#[derive(Clone)]
pub struct QuoteService {
    upstream: UpstreamClient,
    store: Arc<dyn ObservationStore>,
    request_timeout: Duration,
    insert_timeout: Duration,
}

impl QuoteService {
    /// Create a new quote service.
    pub fn new(
        upstream: UpstreamClient,
        store: Arc<dyn ObservationStore>,
        request_timeout: Duration,
        insert_timeout: Duration,
    ) -> Self {
        Self {
            upstream,
            store,
            request_timeout,
            insert_timeout,
        }
    }

    pub fn store(&self) -> &Arc<dyn ObservationStore> {
        &self.store
    }

    /// Run the pipeline for one inbound request.
    ///
    /// Fetching and persisting share the request deadline: time spent
    /// fetching is time the insert no longer has.
    pub async fn handle(&self, request_id: &str) -> Result<Quote, QuoteError> {
        let deadline = Deadline::after(self.request_timeout);
        tracing::debug!(request_id = %request_id, stage = Stage::Received.as_str(), budget = ?self.request_timeout, "Quote request received");

        let result = self.run(request_id, deadline).await;

        match &result {
            Ok(quote) => {
                tracing::info!(request_id = %request_id, stage = Stage::Done.as_str(), bid = %quote.bid, "Quote relayed");
            }
            Err(e) => {
                metrics::record_stage_failure(e.stage().as_str());
                tracing::error!(
                    request_id = %request_id,
                    stage = Stage::Failed.as_str(),
                    failed_in = e.stage().as_str(),
                    error = %e,
                    "Quote request failed"
                );
            }
        }

        result
    }

    async fn run(&self, request_id: &str, deadline: Deadline) -> Result<Quote, QuoteError> {
        tracing::debug!(request_id = %request_id, stage = Stage::Fetching.as_str(), remaining = ?deadline.remaining(), "Fetching upstream quote");
        let quote = self.upstream.fetch_quote(deadline).await?;

        tracing::debug!(request_id = %request_id, stage = Stage::Persisting.as_str(), remaining = ?deadline.remaining(), "Persisting observation");
        let value = quote.value()?;
        let id = self
            .store
            .insert(value, deadline.child(self.insert_timeout))
            .await?;
        metrics::record_observation();

        tracing::debug!(request_id = %request_id, stage = Stage::Responding.as_str(), observation_id = id, "Observation stored");
        Ok(quote)
    }
}
