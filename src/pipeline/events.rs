// Pipeline events — the seam between orchestration and presentation.
//
// The pipeline never touches a display surface. It emits these events and
// the sink decides what they look like: a terminal renderer in the CLI, a
// recording sink in tests.

use crate::content::PostContent;
use crate::pipeline::aggregate::AggregateSignal;
use crate::review::state::{ModerationState, Resolution};
use crate::toxicity::traits::{Subject, ToxicityResult};

/// Pipeline stages worth announcing before their first await point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resolving the URL into post content.
    Fetch,
    /// Scoring the text and image subjects.
    Analyze,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Analyze => "analyze",
        }
    }
}

/// Everything the presentation layer can learn from one submission.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A pipeline stage is starting.
    StageEntered(Stage),
    /// The post was fetched and normalized.
    ContentReady(PostContent),
    /// One subject finished scoring.
    SubjectScored(ToxicityResult),
    /// One subject's analysis failed; it contributes 0% to the aggregate.
    SubjectFailed { subject: Subject, message: String },
    /// Both subjects settled and the decision state was computed.
    DecisionReached {
        signal: AggregateSignal,
        state: ModerationState,
    },
    /// A confirm action is in flight; review controls are disabled.
    RemovalStarted,
    /// The confirm action failed; review controls are enabled again.
    RemovalFailed { message: String },
    /// The review reached an outcome.
    Resolved {
        resolution: Resolution,
        notice: &'static str,
    },
    /// A fatal error aborted the submission before any decision state.
    SubmissionFailed { message: String },
}

/// Consumes pipeline events. Implementations must tolerate any event
/// order the pipeline produces and must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Sink that drops every event. For headless use and tests that only care
/// about return values.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: PipelineEvent) {}
}
