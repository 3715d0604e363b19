// Image text-extraction seam.

use async_trait::async_trait;

use crate::error::Result;

/// Extracts text from an image payload via a remote OCR-style service.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Return the text detected in `image_data` (may be empty).
    async fn extract_text(&self, image_data: &str) -> Result<String>;
}
