//! Client side of the relay: call the quote service, write the artifact.

use reqwest::Client;
use std::path::{Path, PathBuf};

use crate::config::ClientConfig;
use crate::quoting::QuoteResponse;
use crate::relay::types::{ClientError, ClientResult};
use crate::resilience::Deadline;

/// One-shot caller of the quote service.
pub struct RelayClient {
    client: Client,
    config: ClientConfig,
}

impl RelayClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder().timeout(config.timeout());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch the bid, fully bounded by `deadline` (connect, status, and body).
    pub async fn fetch_bid(&self, deadline: Deadline) -> ClientResult<String> {
        deadline
            .run(self.request())
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?
    }

    async fn request(&self) -> ClientResult<String> {
        let resp = self
            .client
            .get(&self.config.service_url)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                body: text.trim().to_string(),
            });
        }

        let body: QuoteResponse =
            serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(body.bid)
    }

    /// Fetch under the configured outer deadline and write `dolar: <bid>` to `output`.
    ///
    /// Nothing is written unless the fetch succeeded.
    pub async fn run(&self, output: &Path) -> ClientResult<String> {
        let deadline = Deadline::after(self.config.timeout());
        let bid = self.fetch_bid(deadline).await?;
        write_artifact(output, &bid).await?;
        Ok(bid)
    }
}

/// Format of the single-line output artifact.
pub fn artifact_line(bid: &str) -> String {
    format!("dolar: {}", bid)
}

/// Replace `path` with the artifact line for `bid`.
///
/// The line is written to a sibling file and renamed over `path`, so readers
/// see either the previous artifact or the complete new one.
pub async fn write_artifact(path: &Path, bid: &str) -> ClientResult<()> {
    let staging = staging_path(path);
    let write_err = |source| ClientError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = tokio::fs::write(&staging, artifact_line(bid)).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(write_err(e));
    }
    if let Err(e) = tokio::fs::rename(&staging, path).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(write_err(e));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
