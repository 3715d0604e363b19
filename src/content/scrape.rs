// Scrape-service client for community posts.
//
// The service takes the post URL and returns a JSON array whose first
// element is the post payload. The identifier is the only required field —
// removal needs it, so its absence is a protocol violation. Display fields
// may be missing; they stay None and the presentation layer substitutes
// placeholders.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::traits::PostScraper;
use super::PostContent;
use crate::error::{PipelineError, Result};

const SERVICE: &str = "scrape service";

/// HTTP client for the scrape service.
pub struct ScrapeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ScrapeClient {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl PostScraper for ScrapeClient {
    async fn fetch_post(&self, url: &str) -> Result<PostContent> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest { url })
            .send()
            .await
            .map_err(|source| PipelineError::Transport {
                service: SERVICE,
                source,
            })?;

        if !response.status().is_success() {
            return Err(PipelineError::MalformedResponse {
                service: SERVICE,
                detail: format!("status {}", response.status()),
            });
        }

        // A 200 that isn't JSON (e.g. an HTML error page) is rejected
        // before any field access.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("application/json") {
            return Err(PipelineError::MalformedResponse {
                service: SERVICE,
                detail: format!("unexpected content type {content_type:?}"),
            });
        }

        let payload: Vec<ScrapedPost> =
            response
                .json()
                .await
                .map_err(|source| PipelineError::Transport {
                    service: SERVICE,
                    source,
                })?;

        let post = payload
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::MalformedResponse {
                service: SERVICE,
                detail: "empty result array".to_string(),
            })?;

        debug!(has_image = post.uploaded_image_data.is_some(), "Scraped post received");
        normalize(post)
    }
}

/// Map the wire payload onto `PostContent`, enforcing the required
/// identifier.
fn normalize(post: ScrapedPost) -> Result<PostContent> {
    let id = post
        .carousel_item_id
        .and_then(id_to_string)
        .ok_or_else(|| PipelineError::MalformedResponse {
            service: SERVICE,
            detail: "missing CarouselItemID".to_string(),
        })?;

    let author_name = match (post.first_name, post.last_name) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(first), None) => Some(first),
        (None, Some(last)) => Some(last),
        (None, None) => None,
    };

    let author_details = match (post.age, post.education) {
        (None, None) => None,
        (age, education) => Some(format!(
            "Age: {} | Education: {}",
            age.map(|a| a.to_string()).unwrap_or_else(|| "?".into()),
            education.unwrap_or_else(|| "?".into()),
        )),
    };

    Ok(PostContent {
        id,
        author_name,
        author_details,
        body_text: post.content.filter(|s| !s.is_empty()),
        image_data: post.uploaded_image_data.filter(|s| !s.is_empty()),
        profile_image_url: post.profile_picture_url,
    })
}

/// Identifiers arrive as strings or numbers depending on the scraper
/// version; both are accepted.
fn id_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScrapedPost {
    #[serde(rename = "CarouselItemID")]
    carousel_item_id: Option<Value>,
    #[serde(rename = "FirstName")]
    first_name: Option<String>,
    #[serde(rename = "LastName")]
    last_name: Option<String>,
    #[serde(rename = "Age")]
    age: Option<u32>,
    #[serde(rename = "Education")]
    education: Option<String>,
    #[serde(rename = "Content")]
    content: Option<String>,
    #[serde(rename = "UploadedImageData")]
    uploaded_image_data: Option<String>,
    #[serde(rename = "ProfilePictureURL")]
    profile_picture_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> ScrapedPost {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn normalize_full_payload() {
        let post = payload(serde_json::json!({
            "CarouselItemID": "42",
            "FirstName": "Jamie",
            "LastName": "Doe",
            "Age": 16,
            "Education": "High school",
            "Content": "fine content",
            "ProfilePictureURL": "https://cdn.example/p.png"
        }));
        let content = normalize(post).unwrap();
        assert_eq!(content.id, "42");
        assert_eq!(content.author_name.as_deref(), Some("Jamie Doe"));
        assert_eq!(
            content.author_details.as_deref(),
            Some("Age: 16 | Education: High school")
        );
        assert_eq!(content.body_text.as_deref(), Some("fine content"));
        assert!(content.image_data.is_none());
    }

    #[test]
    fn numeric_identifier_is_accepted() {
        let post = payload(serde_json::json!({"CarouselItemID": 42}));
        assert_eq!(normalize(post).unwrap().id, "42");
    }

    #[test]
    fn missing_identifier_is_a_protocol_violation() {
        let post = payload(serde_json::json!({"Content": "hello"}));
        let err = normalize(post).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedResponse { .. }));
        assert!(err.to_string().contains("CarouselItemID"));
    }

    #[test]
    fn missing_display_fields_stay_none() {
        let post = payload(serde_json::json!({"CarouselItemID": "9"}));
        let content = normalize(post).unwrap();
        assert!(content.author_name.is_none());
        assert!(content.author_details.is_none());
        assert!(content.body_text.is_none());
        assert_eq!(content.display_name(), crate::content::NAME_PLACEHOLDER);
        assert_eq!(content.display_body(), crate::content::CONTENT_PLACEHOLDER);
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let post = payload(serde_json::json!({
            "CarouselItemID": "9",
            "Content": "",
            "UploadedImageData": ""
        }));
        let content = normalize(post).unwrap();
        assert!(content.body_text.is_none());
        assert!(content.image_data.is_none());
    }
}
