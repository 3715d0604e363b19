// Content retrieval — resolves a submitted URL into a normalized post.
//
// The URL's host picks the source: social posts come back as embed markup
// (first paragraph extracted as the body), community posts come back as a
// structured scrape payload. Both normalize into PostContent.

pub mod embed;
pub mod scrape;
pub mod source;
pub mod traits;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};
use self::source::SourceKind;
use self::traits::{EmbedFetcher, PostScraper};

/// Placeholder shown when the author's name is missing from the payload.
pub const NAME_PLACEHOLDER: &str = "Name not available";
/// Placeholder shown when the author's details are missing.
pub const DETAILS_PLACEHOLDER: &str = "Details not available";
/// Placeholder shown when the post body is missing.
pub const CONTENT_PLACEHOLDER: &str = "Content not available";

/// A post normalized from either source, owned by one submission.
///
/// Display fields stay `None` when the payload omitted them — placeholder
/// substitution is a presentation concern (`display_*` accessors), and
/// scoring always sees the raw values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostContent {
    /// Opaque identifier used for removal. For social embeds, the
    /// submitted URL itself.
    pub id: String,
    pub author_name: Option<String>,
    pub author_details: Option<String>,
    pub body_text: Option<String>,
    /// Image payload as text (base64 or data URL), when the post has one.
    pub image_data: Option<String>,
    pub profile_image_url: Option<String>,
}

impl PostContent {
    pub fn display_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or(NAME_PLACEHOLDER)
    }

    pub fn display_details(&self) -> &str {
        self.author_details.as_deref().unwrap_or(DETAILS_PLACEHOLDER)
    }

    pub fn display_body(&self) -> &str {
        self.body_text.as_deref().unwrap_or(CONTENT_PLACEHOLDER)
    }
}

/// Resolve a submitted URL into a `PostContent` record.
///
/// Classifies the host first and fails fast on unrecognized sources —
/// no network call is made for a URL we cannot handle.
pub async fn fetch_content(
    url: &str,
    embed: &dyn EmbedFetcher,
    scraper: &dyn PostScraper,
) -> Result<PostContent> {
    match source::classify(url) {
        SourceKind::SocialEmbed => {
            let markup = embed.fetch_embed(url).await?;
            let body = embed::extract_first_paragraph(&markup);
            debug!(chars = body.len(), "Extracted embed body text");
            Ok(PostContent {
                id: url.to_string(),
                author_name: None,
                author_details: None,
                body_text: if body.is_empty() { None } else { Some(body) },
                image_data: None,
                profile_image_url: None,
            })
        }
        SourceKind::CommunityPost => scraper.fetch_post(url).await,
        SourceKind::Unrecognized => Err(PipelineError::UnrecognizedSource(
            source::host_of(url).unwrap_or_default(),
        )),
    }
}
