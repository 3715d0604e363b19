// Removal-service client.
//
// Removal is acknowledged by a literal marker string in the response
// body. Anything else — bad status, transport failure, different message —
// is a removal failure, and the review reverts to Warning.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, Result};

const SERVICE: &str = "removal service";

/// The exact acknowledgement the removal endpoint sends on success.
pub const REMOVAL_SUCCESS_MARKER: &str = "Post removed successfully.";

/// Removes a post by its identifier.
#[async_trait]
pub trait RemovalService: Send + Sync {
    /// Request removal of the post with `id`. Ok only when the service
    /// acknowledged with the success marker.
    async fn remove_post(&self, id: &str) -> Result<()>;
}

/// HTTP client for the removal endpoint.
pub struct RemovalClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RemovalClient {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl RemovalService for RemovalClient {
    async fn remove_post(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RemovalRequest { id })
            .send()
            .await
            .map_err(|e| PipelineError::Removal(format!("{SERVICE} unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Removal(format!(
                "{SERVICE} returned {}",
                response.status()
            )));
        }

        let body: RemovalResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Removal(format!("{SERVICE} response unreadable: {e}")))?;

        match body.message.as_deref() {
            Some(REMOVAL_SUCCESS_MARKER) => {
                info!(id, "Post removal acknowledged");
                Ok(())
            }
            other => Err(PipelineError::Removal(format!(
                "unexpected acknowledgement {other:?}"
            ))),
        }
    }
}

#[derive(Serialize)]
struct RemovalRequest<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct RemovalResponse {
    message: Option<String>,
}
