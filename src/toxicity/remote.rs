// Hosted analysis-service implementation.
//
// The service wraps a comment-analysis classifier: POST the content, get
// back a `score` in [0,1]. Conversion to an integer percentage is
// round-half-up, and an out-of-range or missing score is a scoring
// failure — never clamped silently.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::ToxicityScorer;
use crate::error::{PipelineError, Result};

const SERVICE: &str = "analysis service";

/// Toxicity scorer backed by the hosted analysis service.
pub struct RemoteScorer {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteScorer {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl ToxicityScorer for RemoteScorer {
    async fn score(&self, text: &str) -> Result<u8> {
        // Nothing to classify; skip the remote call entirely.
        if text.is_empty() {
            return Ok(0);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { content: text })
            .send()
            .await
            .map_err(|e| PipelineError::Scoring(format!("{SERVICE} unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Scoring(format!(
                "{SERVICE} returned {}",
                response.status()
            )));
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Scoring(format!("{SERVICE} response unreadable: {e}")))?;

        let score = body
            .score
            .ok_or_else(|| PipelineError::Scoring("score field missing".to_string()))?;

        let percentage = percentage_from_score(score)?;
        debug!(
            score,
            percentage,
            text_preview = &text[..text.len().min(50)],
            "Scored text"
        );
        Ok(percentage)
    }
}

/// Convert a classifier score in [0,1] to an integer percentage,
/// rounding half up. Out-of-range and non-finite scores are rejected.
pub fn percentage_from_score(score: f64) -> Result<u8> {
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(PipelineError::Scoring(format!(
            "score {score} outside [0, 1]"
        )));
    }
    // f64::round is half-away-from-zero; for non-negative input that is
    // exactly round-half-up.
    Ok((score * 100.0).round() as u8)
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_and_rounds_half_up() {
        assert_eq!(percentage_from_score(0.9).unwrap(), 90);
        assert_eq!(percentage_from_score(0.905).unwrap(), 91);
        assert_eq!(percentage_from_score(0.004).unwrap(), 0);
        assert_eq!(percentage_from_score(0.005).unwrap(), 1);
    }

    #[test]
    fn endpoints_of_range_are_valid() {
        assert_eq!(percentage_from_score(0.0).unwrap(), 0);
        assert_eq!(percentage_from_score(1.0).unwrap(), 100);
    }

    #[test]
    fn out_of_range_is_rejected_not_clamped() {
        assert!(percentage_from_score(1.01).is_err());
        assert!(percentage_from_score(-0.01).is_err());
        assert!(percentage_from_score(f64::NAN).is_err());
        assert!(percentage_from_score(f64::INFINITY).is_err());
    }
}
