//! Observation store types and error definitions.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::resilience::{Deadline, DeadlineExceeded};

/// One persisted quote value.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Observation {
    /// Assigned by the store, strictly increasing.
    pub id: i64,
    pub value: f64,
    /// Insert time (UTC).
    pub observed_at: NaiveDateTime,
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Statement preparation, execution, or connection failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The insert did not commit before its deadline.
    #[error("persistence {0}")]
    DeadlineExceeded(#[from] DeadlineExceeded),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Append-only store of quote observations.
///
/// Implementations must be safe to share across concurrent request handlers.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Create the observation table if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// Append one observation, returning its id.
    ///
    /// Either the row commits before `deadline` or nothing is written.
    async fn insert(&self, value: f64, deadline: Deadline) -> StoreResult<i64>;

    /// Number of stored observations.
    async fn count(&self) -> StoreResult<u64>;

    /// Most recent observations, newest first.
    async fn recent(&self, limit: u32) -> StoreResult<Vec<Observation>>;
}
