// Result-store client.

use async_trait::async_trait;
use tracing::debug;

use super::record::AnalysisRecord;
use crate::error::{PipelineError, Result};

const SERVICE: &str = "result store";

/// Persists analysis records. Callers treat failures as log-only.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn persist(&self, record: &AnalysisRecord) -> Result<()>;
}

/// HTTP client for the result store.
pub struct StoreClient {
    client: reqwest::Client,
    endpoint: String,
}

impl StoreClient {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl ResultStore for StoreClient {
    async fn persist(&self, record: &AnalysisRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| PipelineError::Store(format!("{SERVICE} unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Store(format!(
                "{SERVICE} returned {}",
                response.status()
            )));
        }

        debug!(url = record.url, "Analysis record persisted");
        Ok(())
    }
}
