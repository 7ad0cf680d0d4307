//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured observation store and ensure its schema
//! - Build the upstream client and the quote service
//!
//! Any failure here is returned to the process entry point, which decides
//! whether to abort. Nothing in this module exits the process.

use std::sync::Arc;
use thiserror::Error;

use crate::config::{ConfigError, RelayConfig, StoreBackend, StoreConfig};
use crate::quoting::QuoteService;
use crate::store::{MemoryStore, ObservationStore, SqliteStore, StoreError};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Errors that prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("observation store: {0}")]
    Store(#[from] StoreError),

    #[error("upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Open the configured store and create its schema.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn ObservationStore>, StartupError> {
    let store: Arc<dyn ObservationStore> = match config.backend {
        StoreBackend::Sqlite => {
            Arc::new(
                SqliteStore::connect(&config.path, config.max_connections, config.insert_timeout())
                    .await?,
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory observation store; observations are not durable");
            Arc::new(MemoryStore::new())
        }
    };

    store.ensure_schema().await?;
    tracing::info!(backend = ?config.backend, "Observation schema ready");
    Ok(store)
}

/// Wire a quote service around an injected store.
pub fn build_service(
    config: &RelayConfig,
    store: Arc<dyn ObservationStore>,
) -> Result<QuoteService, StartupError> {
    let upstream = UpstreamClient::new(config.upstream.clone())?;

    Ok(QuoteService::new(
        upstream,
        store,
        config.server.request_timeout(),
        config.store.insert_timeout(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            ..StoreConfig::default()
        };
        let store = open_store(&config).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unopenable_sqlite_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            path: dir.path().join("no-such-dir").join("db.sqlite").display().to_string(),
            ..StoreConfig::default()
        };

        let err = open_store(&config).await.err().expect("open should fail");
        assert!(matches!(err, StartupError::Store(_)));
    }
}
