// The analysis record — write-once snapshot of one submission's outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::PostContent;
use crate::pipeline::aggregate::AggregateSignal;

/// Everything the result store keeps about one analyzed submission.
/// Assembled after the decision state is computed; never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub url: String,
    pub author_name: Option<String>,
    pub author_details: Option<String>,
    pub body_text: Option<String>,
    pub text_toxicity_pct: u8,
    pub image_toxicity_pct: u8,
    pub max_toxicity_pct: u8,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn new(url: &str, content: &PostContent, signal: &AggregateSignal) -> Self {
        Self {
            url: url.to_string(),
            author_name: content.author_name.clone(),
            author_details: content.author_details.clone(),
            body_text: content.body_text.clone(),
            text_toxicity_pct: signal.text_pct,
            image_toxicity_pct: signal.image_pct,
            max_toxicity_pct: signal.max_pct(),
            analyzed_at: Utc::now(),
        }
    }
}
