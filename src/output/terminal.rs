// Colored terminal rendering of pipeline events.
//
// This module handles all terminal-specific formatting: the stage
// spinner, the per-subject toxicity gauges, and the review notices. The
// color bands are display-only and independent of the decision threshold.

use std::sync::Mutex;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::events::{EventSink, PipelineEvent, Stage};
use crate::review::state::ModerationState;
use crate::toxicity::traits::ToxicityResult;

/// Display band boundaries for gauge coloring: green below `ORANGE_FROM`,
/// orange below `RED_FROM`, red at or above it.
const ORANGE_FROM: u8 = 60;
const RED_FROM: u8 = 85;

/// Terminal sink: renders each pipeline event as it arrives.
pub struct TerminalSink {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner} {msg}")
                .unwrap(),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        let mut slot = self.spinner.lock().unwrap();
        if let Some(old) = slot.take() {
            old.finish_and_clear();
        }
        *slot = Some(pb);
    }

    fn stop_spinner(&self) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TerminalSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::StageEntered(Stage::Fetch) => {
                self.start_spinner("Fetching post content...");
            }
            PipelineEvent::StageEntered(Stage::Analyze) => {
                self.start_spinner("Analyzing for toxicity...");
            }

            PipelineEvent::ContentReady(content) => {
                self.stop_spinner();
                println!("\n{}", "=== Post ===".bold());
                println!("  {}", content.display_name());
                println!("  {}", content.display_details().dimmed());
                println!("  {}", super::truncate_chars(content.display_body(), 280));
            }

            PipelineEvent::SubjectScored(result) => {
                self.stop_spinner();
                println!("  {}", render_gauge(&result));
            }
            PipelineEvent::SubjectFailed { subject, message } => {
                self.stop_spinner();
                println!(
                    "  {:<6} {} ({message})",
                    subject.as_str(),
                    "analysis unavailable, counted as 0%".yellow()
                );
            }

            PipelineEvent::DecisionReached { signal, state } => {
                self.stop_spinner();
                println!();
                match state {
                    ModerationState::Warning => {
                        println!(
                            "{} aggregate toxicity {}%",
                            "!! WARNING".red().bold(),
                            signal.max_pct()
                        );
                        println!(
                            "  This content appears to contain cyberbullying and can be \
                             reported for removal."
                        );
                    }
                    _ => {
                        println!(
                            "{} aggregate toxicity {}%",
                            "OK".green().bold(),
                            signal.max_pct()
                        );
                    }
                }
            }

            PipelineEvent::RemovalStarted => {
                self.start_spinner("Requesting removal...");
            }
            PipelineEvent::RemovalFailed { message } => {
                self.stop_spinner();
                println!("  {} {message}", "Removal failed:".red());
                println!("  The report is still open; you can try again or reject.");
            }
            PipelineEvent::Resolved { notice, .. } => {
                self.stop_spinner();
                println!("\n  {}", notice.italic());
            }

            PipelineEvent::SubmissionFailed { message } => {
                self.stop_spinner();
                println!("{} {message}", "Error!".red().bold());
            }
        }
    }
}

/// One subject's gauge line, colored by display band.
fn render_gauge(result: &ToxicityResult) -> String {
    let label = format!("{:<6}", result.subject.as_str());
    let value = format!("{:>3}%", result.percentage);
    let colored_value = if result.percentage >= RED_FROM {
        value.red().bold()
    } else if result.percentage >= ORANGE_FROM {
        value.yellow()
    } else {
        value.green()
    };
    let filled = (result.percentage as usize) / 5;
    let bar = format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled));
    format!("{label} {colored_value} {}", bar.dimmed())
}
