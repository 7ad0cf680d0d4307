//! Health endpoint.
//!
//! # Responsibilities
//! - Report whether the observation store answers queries
//! - Expose the number of stored observations for quick inspection
//!
//! # Design Decisions
//! - Never touches the upstream provider; a slow provider must not fail health
//! - Store errors map to 503 with a fixed body

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub observations: u64,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.store().count().await {
        Ok(observations) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok",
                observations,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed: store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "store unavailable").into_response()
        }
    }
}
