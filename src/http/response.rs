//! Error-to-response mapping.
//!
//! # Design Decisions
//! - Every pipeline failure is a 500 with a fixed plain-text body
//! - Internal detail stays in the logs, never in the body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::quoting::QuoteError;

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::DeadlineExceeded;
    use crate::store::StoreError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_persistence_failure_body_is_generic() {
        let err = QuoteError::Persistence(StoreError::DeadlineExceeded(DeadlineExceeded {
            budget: Duration::from_millis(300),
        }));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"failed to persist quote");
    }
}
