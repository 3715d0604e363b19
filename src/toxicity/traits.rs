// Toxicity scorer trait — the swap-ready abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which piece of a submission a toxicity percentage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    /// The post's own body text.
    Text,
    /// Text recovered from the post's image.
    Image,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Text => "text",
            Subject::Image => "image",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One subject's toxicity, as an integer percentage 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToxicityResult {
    pub subject: Subject,
    pub percentage: u8,
}

/// Trait for scoring text toxicity. Implementations are async because
/// providers are HTTP services.
///
/// Callers, not implementations, decide what a failure means: the
/// aggregator treats a scoring failure as that subject contributing 0%.
#[async_trait]
pub trait ToxicityScorer: Send + Sync {
    /// Score a single text, returning its toxicity percentage.
    async fn score(&self, text: &str) -> Result<u8>;
}
