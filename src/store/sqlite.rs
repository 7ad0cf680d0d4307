//! SQLite-backed observation store.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

use crate::resilience::{Deadline, DeadlineExceeded};
use crate::store::types::{Observation, ObservationStore, StoreResult};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS observations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value REAL NOT NULL,
    observed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Durable store on a local sqlite file.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database file at `path`.
    ///
    /// `busy_timeout` caps how long any statement, `COMMIT` included, waits on
    /// a lock held by another connection.
    pub async fn connect(
        path: &str,
        max_connections: u32,
        busy_timeout: Duration,
    ) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(
            path = %path,
            max_connections,
            busy_timeout_ms = busy_timeout.as_millis() as u64,
            "Observation store opened"
        );
        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ObservationStore for SqliteStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, value: f64, deadline: Deadline) -> StoreResult<i64> {
        let mut tx = deadline.run(self.pool.begin()).await??;

        let inserted = deadline
            .run(
                sqlx::query("INSERT INTO observations (value) VALUES (?)")
                    .bind(value)
                    .execute(&mut *tx),
            )
            .await;
        let id = match inserted {
            Ok(Ok(result)) => result.last_insert_rowid(),
            Ok(Err(e)) => {
                let _ = tx.rollback().await;
                return Err(e.into());
            }
            Err(expired) => {
                let _ = tx.rollback().await;
                return Err(expired.into());
            }
        };

        if deadline.is_expired() {
            tx.rollback().await?;
            return Err(DeadlineExceeded {
                budget: deadline.budget(),
            }
            .into());
        }

        // COMMIT is never cancelled once sent: its own outcome is what gets
        // reported, and a lock wait is bounded by the busy timeout.
        tx.commit().await?;
        Ok(id)
    }

    async fn count(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM observations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn recent(&self, limit: u32) -> StoreResult<Vec<Observation>> {
        let rows = sqlx::query_as::<_, Observation>(
            "SELECT id, value, observed_at FROM observations ORDER BY id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
