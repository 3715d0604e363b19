// Concurrent subject scoring.
//
// The text path and the image path are independent, so both futures are
// created before either is awaited and joined with a fixed barrier — the
// pipeline proceeds only once both settle. A failed path contributes 0%
// and is reported as a partial failure, never silently treated as a
// success.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::content::PostContent;
use crate::error::Result;
use crate::image::filter::strip_screenshot_chrome;
use crate::image::traits::TextExtractor;
use crate::pipeline::events::{EventSink, PipelineEvent};
use crate::toxicity::traits::{Subject, ToxicityResult, ToxicityScorer};

/// Both subject percentages, settled. The decision signal is their max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSignal {
    pub text_pct: u8,
    pub image_pct: u8,
}

impl AggregateSignal {
    /// The percentage the threshold decision is made on.
    pub fn max_pct(&self) -> u8 {
        self.text_pct.max(self.image_pct)
    }
}

/// Score both subjects of a post concurrently and settle the aggregate.
pub async fn score_subjects(
    content: &PostContent,
    scorer: &dyn ToxicityScorer,
    extractor: &dyn TextExtractor,
    sink: &dyn EventSink,
) -> AggregateSignal {
    let text_path = score_text(content.body_text.as_deref(), scorer);
    let image_path = score_image(content.image_data.as_deref(), extractor, scorer);

    let (text, image) = tokio::join!(text_path, image_path);

    AggregateSignal {
        text_pct: settle(Subject::Text, text, sink),
        image_pct: settle(Subject::Image, image, sink),
    }
}

/// Score the post's own body text. An absent or empty body is 0% without
/// a remote call.
async fn score_text(body: Option<&str>, scorer: &dyn ToxicityScorer) -> Result<u8> {
    match body {
        Some(text) if !text.is_empty() => scorer.score(text).await,
        _ => Ok(0),
    }
}

/// Score the text recovered from the post's image. An absent image is 0%
/// without any call; so is an image whose filtered text is empty.
async fn score_image(
    image_data: Option<&str>,
    extractor: &dyn TextExtractor,
    scorer: &dyn ToxicityScorer,
) -> Result<u8> {
    let Some(data) = image_data else {
        return Ok(0);
    };

    let detected = extractor.extract_text(data).await?;
    let cleaned = strip_screenshot_chrome(&detected);
    if cleaned.is_empty() {
        return Ok(0);
    }
    scorer.score(&cleaned).await
}

/// Turn one settled path into its contribution, reporting the outcome.
fn settle(subject: Subject, outcome: Result<u8>, sink: &dyn EventSink) -> u8 {
    match outcome {
        Ok(percentage) => {
            sink.emit(PipelineEvent::SubjectScored(ToxicityResult {
                subject,
                percentage,
            }));
            percentage
        }
        Err(e) => {
            warn!(subject = subject.as_str(), error = %e, "Subject analysis failed, contributing 0%");
            sink.emit(PipelineEvent::SubjectFailed {
                subject,
                message: e.to_string(),
            });
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_pct_is_the_larger_subject() {
        let signal = AggregateSignal {
            text_pct: 40,
            image_pct: 90,
        };
        assert_eq!(signal.max_pct(), 90);

        let signal = AggregateSignal {
            text_pct: 90,
            image_pct: 0,
        };
        assert_eq!(signal.max_pct(), 90);
    }
}
