// The moderation session — one submission from URL to resolution.
//
// Stage order within a submission is fixed: fetch → aggregate → decide →
// (confirm/reject) → store, with the store dispatched fire-and-forget as
// soon as the decision is computed. A fatal fetch error aborts before any
// decision state exists; scoring failures degrade to a partial result.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::content::traits::{EmbedFetcher, PostScraper};
use crate::content::{self, PostContent};
use crate::error::{PipelineError, Result};
use crate::image::ocr::OcrClient;
use crate::image::traits::TextExtractor;
use crate::pipeline::aggregate::{self, AggregateSignal};
use crate::pipeline::events::{EventSink, PipelineEvent, Stage};
use crate::review::removal::{RemovalClient, RemovalService};
use crate::review::state::{ModerationState, Resolution};
use crate::store::client::{ResultStore, StoreClient};
use crate::store::record::AnalysisRecord;
use crate::toxicity::remote::RemoteScorer;
use crate::toxicity::traits::ToxicityScorer;

/// The remote collaborators behind trait seams. Production wiring builds
/// HTTP clients over one shared reqwest client; tests wire in fakes.
pub struct Collaborators {
    pub embed: Arc<dyn EmbedFetcher>,
    pub scraper: Arc<dyn PostScraper>,
    pub scorer: Arc<dyn ToxicityScorer>,
    pub extractor: Arc<dyn TextExtractor>,
    pub removal: Arc<dyn RemovalService>,
    pub store: Arc<dyn ResultStore>,
}

impl Collaborators {
    /// Build the production HTTP clients from configuration. All clients
    /// share one connection pool and the configured request timeout.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("vigil/0.1 (content-moderation)")
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            embed: Arc::new(content::embed::EmbedClient::new(
                client.clone(),
                &config.embed_url,
            )),
            scraper: Arc::new(content::scrape::ScrapeClient::new(
                client.clone(),
                &config.scrape_url,
            )),
            scorer: Arc::new(RemoteScorer::new(client.clone(), &config.analyze_url)),
            extractor: Arc::new(OcrClient::new(client.clone(), &config.image_url)),
            removal: Arc::new(RemovalClient::new(client.clone(), &config.removal_url)),
            store: Arc::new(StoreClient::new(client, &config.store_url)),
        })
    }
}

/// One submission's pipeline state. Created by [`ModerationSession::submit`]
/// once the decision is reached; holds the content and signal for the
/// lifetime of the review.
pub struct ModerationSession {
    services: Collaborators,
    sink: Arc<dyn EventSink>,
    state: ModerationState,
    content: PostContent,
    signal: AggregateSignal,
}

impl std::fmt::Debug for ModerationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationSession")
            .field("state", &self.state)
            .field("content", &self.content)
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}

impl ModerationSession {
    /// Run a submission through fetch, concurrent scoring, and the
    /// threshold decision. Fatal errors (unrecognized source, malformed or
    /// unreachable collaborator during fetch) abort before any decision
    /// state is entered; the sink sees a single SubmissionFailed event and
    /// the pre-submission display stays untouched.
    pub async fn submit(
        services: Collaborators,
        sink: Arc<dyn EventSink>,
        threshold: u8,
        url: &str,
    ) -> Result<Self> {
        sink.emit(PipelineEvent::StageEntered(Stage::Fetch));

        let content =
            match content::fetch_content(url, &*services.embed, &*services.scraper).await {
                Ok(content) => content,
                Err(e) => {
                    error!(url, error = %e, "Submission aborted during fetch");
                    sink.emit(PipelineEvent::SubmissionFailed {
                        message: e.to_string(),
                    });
                    return Err(e);
                }
            };
        sink.emit(PipelineEvent::ContentReady(content.clone()));

        sink.emit(PipelineEvent::StageEntered(Stage::Analyze));
        let signal =
            aggregate::score_subjects(&content, &*services.scorer, &*services.extractor, &*sink)
                .await;

        let state = ModerationState::from_signal(signal.max_pct(), threshold);
        info!(
            max_pct = signal.max_pct(),
            threshold,
            state = state.as_str(),
            "Decision reached"
        );
        sink.emit(PipelineEvent::DecisionReached { signal, state });

        // Best-effort persistence; unordered relative to rendering.
        dispatch_store(&services.store, AnalysisRecord::new(url, &content, &signal));

        Ok(Self {
            services,
            sink,
            state,
            content,
            signal,
        })
    }

    pub fn state(&self) -> ModerationState {
        self.state
    }

    pub fn content(&self) -> &PostContent {
        &self.content
    }

    pub fn signal(&self) -> AggregateSignal {
        self.signal
    }

    /// Confirm removal of the flagged post. Only valid from Warning.
    ///
    /// While the removal call is in flight the review is in a Processing
    /// presentation sub-state (RemovalStarted has been emitted and the
    /// exclusive borrow keeps further actions out). Failure reverts to
    /// Warning with controls re-enabled; success resolves the review.
    pub async fn confirm(&mut self) -> Result<ModerationState> {
        if !self.state.awaiting_review() {
            return Err(PipelineError::NotAwaitingReview);
        }

        self.sink.emit(PipelineEvent::RemovalStarted);
        match self.services.removal.remove_post(&self.content.id).await {
            Ok(()) => {
                self.state = ModerationState::Resolved(Resolution::Confirmed);
                self.sink.emit(PipelineEvent::Resolved {
                    resolution: Resolution::Confirmed,
                    notice: Resolution::Confirmed.notice(),
                });
                Ok(self.state)
            }
            Err(e) => {
                warn!(id = self.content.id, error = %e, "Removal failed, review re-opened");
                self.sink.emit(PipelineEvent::RemovalFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Reject removal of the flagged post. Only valid from Warning; a
    /// repeated reject is refused rather than appending another notice.
    pub fn reject(&mut self) -> Result<ModerationState> {
        if !self.state.awaiting_review() {
            return Err(PipelineError::NotAwaitingReview);
        }

        self.state = ModerationState::Resolved(Resolution::Rejected);
        self.sink.emit(PipelineEvent::Resolved {
            resolution: Resolution::Rejected,
            notice: Resolution::Rejected.notice(),
        });
        Ok(self.state)
    }
}

/// Fire-and-forget persistence: failures are logged and never surface.
fn dispatch_store(store: &Arc<dyn ResultStore>, record: AnalysisRecord) {
    let store = Arc::clone(store);
    tokio::spawn(async move {
        if let Err(e) = store.persist(&record).await {
            warn!(url = record.url, error = %e, "Analysis record not persisted");
        }
    });
}
