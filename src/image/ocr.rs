// OCR-service client.
//
// The service reports application-level failures with an `error` flag in
// an otherwise successful response; that is an extraction failure just
// like a bad status. `detectedText` may be absent — an image with no
// readable text is empty text, not an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::TextExtractor;
use crate::error::{PipelineError, Result};

const SERVICE: &str = "image service";

/// HTTP client for the image text-extraction service.
pub struct OcrClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OcrClient {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl TextExtractor for OcrClient {
    async fn extract_text(&self, image_data: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProcessImageRequest { image_data })
            .send()
            .await
            .map_err(|e| PipelineError::Extraction(format!("{SERVICE} unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Extraction(format!(
                "{SERVICE} returned {}",
                response.status()
            )));
        }

        let body: ProcessImageResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Extraction(format!("{SERVICE} response unreadable: {e}")))?;

        if body.error {
            return Err(PipelineError::Extraction(
                body.message
                    .unwrap_or_else(|| "image service reported an error".to_string()),
            ));
        }

        let detected = body.detected_text.unwrap_or_default();
        debug!(chars = detected.len(), "Image text extracted");
        Ok(detected)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessImageRequest<'a> {
    image_data: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessImageResponse {
    detected_text: Option<String>,
    #[serde(default)]
    error: bool,
    message: Option<String>,
}
