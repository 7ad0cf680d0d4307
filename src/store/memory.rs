//! In-process observation store.
//!
//! Same contract as the sqlite store, without durability. Used when
//! `store.backend = "memory"` and as a test double.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::resilience::Deadline;
use crate::store::types::{Observation, ObservationStore, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Observation>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a slow store: every insert waits `latency` before committing.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            latency: Some(latency),
        }
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Observation>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObservationStore for MemoryStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, value: f64, deadline: Deadline) -> StoreResult<i64> {
        let id = deadline
            .run(async {
                if let Some(latency) = self.latency {
                    tokio::time::sleep(latency).await;
                }
                let mut rows = self.rows();
                let id = rows.last().map_or(1, |r| r.id + 1);
                rows.push(Observation {
                    id,
                    value,
                    observed_at: chrono::Utc::now().naive_utc(),
                });
                id
            })
            .await?;

        Ok(id)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows().len() as u64)
    }

    async fn recent(&self, limit: u32) -> StoreResult<Vec<Observation>> {
        Ok(self
            .rows()
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[tokio::test]
    async fn test_insert_and_recent() {
        let store = MemoryStore::new();
        let deadline = Deadline::after(Duration::from_secs(1));

        assert_eq!(store.insert(1.0, deadline).await.unwrap(), 1);
        assert_eq!(store.insert(2.0, deadline).await.unwrap(), 2);

        let recent = store.recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].value, 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_insert_is_cancelled_without_row() {
        let store = MemoryStore::with_latency(Duration::from_millis(500));
        let deadline = Deadline::after(Duration::from_millis(300));

        let err = store.insert(5.32, deadline).await.unwrap_err();
        assert!(matches!(err, StoreError::DeadlineExceeded(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
