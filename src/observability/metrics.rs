//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fx_relay_requests_total` (counter): quote requests by status
//! - `fx_relay_request_duration_seconds` (histogram): end-to-end latency
//! - `fx_relay_stage_failures_total` (counter): failed requests by stage
//! - `fx_relay_observations_total` (counter): rows appended
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(status: u16, start: Instant) {
    counter!("fx_relay_requests_total", "status" => status.to_string()).increment(1);
    histogram!("fx_relay_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_stage_failure(stage: &'static str) {
    counter!("fx_relay_stage_failures_total", "stage" => stage).increment(1);
}

pub fn record_observation() {
    counter!("fx_relay_observations_total").increment(1);
}
