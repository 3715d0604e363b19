// Embed-retrieval client for social posts.
//
// The service takes the post URL and returns the network's embed markup.
// The response body is either an object with an `html` field or an array
// whose first element is the markup string. The post body is the text of
// the first paragraph in that markup — a markup-free embed is an empty
// body, not an error.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex_lite::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::traits::EmbedFetcher;
use crate::error::{PipelineError, Result};

const SERVICE: &str = "embed service";

/// HTTP client for the embed-retrieval service.
pub struct EmbedClient {
    client: reqwest::Client,
    endpoint: String,
}

impl EmbedClient {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl EmbedFetcher for EmbedClient {
    async fn fetch_embed(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { url })
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

        let body: Value = response
            .json()
            .await
            .map_err(|source| PipelineError::Transport {
                service: SERVICE,
                source,
            })?;

        let markup = unwrap_markup(&body).ok_or_else(|| PipelineError::MalformedResponse {
            service: SERVICE,
            detail: "no html field or leading array element".to_string(),
        })?;

        debug!(chars = markup.len(), "Embed markup received");
        Ok(markup)
    }
}

/// Pull the markup string out of the service's response: an `html` field,
/// or the first element of an array response.
fn unwrap_markup(body: &Value) -> Option<String> {
    if let Some(html) = body.get("html").and_then(Value::as_str) {
        return Some(html.to_string());
    }
    body.as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Extract the text of the first `<p>` element in the markup, with any
/// nested tags stripped. Returns an empty string when there is no
/// paragraph.
pub fn extract_first_paragraph(markup: &str) -> String {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let paragraph = PARAGRAPH
        .get_or_init(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("static pattern compiles"));
    let tag = TAG.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static pattern compiles"));

    match paragraph.captures(markup) {
        Some(caps) => {
            let inner = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            tag.replace_all(inner, "").trim().to_string()
        }
        None => String::new(),
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_simple_paragraph() {
        assert_eq!(extract_first_paragraph("<div><p>hello</p></div>"), "hello");
    }

    #[test]
    fn strips_nested_tags_and_attributes() {
        let markup = r##"<blockquote class="tweet"><p lang="en">hi <a href="#">there</a></p><p>second</p></blockquote>"##;
        assert_eq!(extract_first_paragraph(markup), "hi there");
    }

    #[test]
    fn missing_paragraph_is_empty() {
        assert_eq!(extract_first_paragraph("<div>no paragraphs here</div>"), "");
        assert_eq!(extract_first_paragraph(""), "");
    }

    #[test]
    fn unwrap_markup_prefers_html_field() {
        let body = serde_json::json!({"html": "<p>a</p>"});
        assert_eq!(unwrap_markup(&body).as_deref(), Some("<p>a</p>"));
    }

    #[test]
    fn unwrap_markup_falls_back_to_array() {
        let body = serde_json::json!(["<p>b</p>", "ignored"]);
        assert_eq!(unwrap_markup(&body).as_deref(), Some("<p>b</p>"));
    }

    #[test]
    fn unwrap_markup_rejects_other_shapes() {
        assert!(unwrap_markup(&serde_json::json!({"other": 1})).is_none());
        assert!(unwrap_markup(&serde_json::json!([])).is_none());
        assert!(unwrap_markup(&serde_json::json!(42)).is_none());
    }
}
