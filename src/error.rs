// Pipeline error taxonomy.
//
// Fatal vs. non-fatal is decided by the caller's position in the pipeline,
// not encoded in the type: UnrecognizedSource, MalformedResponse, and a
// Transport failure during content fetch abort the submission before any
// decision state is entered; Scoring and Extraction errors degrade that
// subject to 0% and the submission proceeds; Removal reverts the review to
// Warning; Store failures are logged and dropped.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The submitted URL's host is not one of the recognized sources.
    #[error("URL domain not recognized: {0}")]
    UnrecognizedSource(String),

    /// A collaborator returned a structurally invalid payload.
    #[error("{service} returned a malformed response: {detail}")]
    MalformedResponse {
        service: &'static str,
        detail: String,
    },

    /// A collaborator request failed at the HTTP layer.
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Toxicity scoring failed for one subject. Non-fatal: the subject
    /// contributes 0% and the submission still reaches a decision.
    #[error("toxicity scoring failed: {0}")]
    Scoring(String),

    /// Image text extraction failed. Non-fatal, same policy as Scoring.
    #[error("image text extraction failed: {0}")]
    Extraction(String),

    /// The removal service did not confirm the removal. Non-fatal: the
    /// review reverts to Warning with controls re-enabled.
    #[error("post removal failed: {0}")]
    Removal(String),

    /// The result store rejected the analysis record. Log-only.
    #[error("result store rejected the record: {0}")]
    Store(String),

    /// Confirm/reject was attempted while no submission is awaiting review.
    #[error("no submission is awaiting review")]
    NotAwaitingReview,
}

impl PipelineError {
    /// True for errors that abort the submission outright. Everything else
    /// degrades: scoring/extraction zero out one subject, removal reverts
    /// to Warning, store failures are dropped.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::UnrecognizedSource(_)
                | PipelineError::MalformedResponse { .. }
                | PipelineError::Transport { .. }
        )
    }
}
