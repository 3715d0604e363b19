// Content retrieval seams.
//
// The orchestration core talks to the embed and scrape services through
// these traits so it can be exercised with in-process fakes.

use async_trait::async_trait;

use super::PostContent;
use crate::error::Result;

/// Fetches embed markup for a social post URL.
#[async_trait]
pub trait EmbedFetcher: Send + Sync {
    /// Return the embed markup for the post at `url`.
    async fn fetch_embed(&self, url: &str) -> Result<String>;
}

/// Fetches a structured community post for a URL.
#[async_trait]
pub trait PostScraper: Send + Sync {
    /// Return the normalized post behind `url`.
    async fn fetch_post(&self, url: &str) -> Result<PostContent>;
}
