use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;

use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::quoting::QuoteResponse;

/// `GET <route>`: fetch, persist, and return the current bid.
pub async fn get_quote(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start_time = Instant::now();
    let request_id = RequestId::from_headers(&headers);

    let response = match state.service.handle(request_id.as_str()).await {
        Ok(quote) => (StatusCode::OK, Json(QuoteResponse::from(quote))).into_response(),
        Err(e) => e.into_response(),
    };

    metrics::record_request(response.status().as_u16(), start_time);
    request_id.attach(response)
}
