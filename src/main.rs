use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use vigil::config::Config;
use vigil::image::filter::strip_screenshot_chrome;
use vigil::output::terminal::TerminalSink;
use vigil::pipeline::session::{Collaborators, ModerationSession};

/// Vigil: toxicity moderation for user-submitted posts.
///
/// Fetches the post behind a URL, scores its text and image content for
/// toxicity, and walks flagged submissions through a confirm/reject
/// review that can remove the post remotely.
#[derive(Parser)]
#[command(name = "vigil", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the post behind a URL and review it if flagged
    Moderate {
        /// The post URL to analyze
        url: String,

        /// Override the configured warning threshold (0-100)
        #[arg(long)]
        threshold: Option<u8>,

        /// Confirm removal without prompting when the post is flagged
        #[arg(long, conflicts_with = "auto_reject")]
        auto_confirm: bool,

        /// Reject removal without prompting when the post is flagged
        #[arg(long)]
        auto_reject: bool,
    },

    /// Run the screenshot-chrome filter over a line of text (debug aid)
    Filter {
        /// The text to clean
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vigil=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moderate {
            url,
            threshold,
            auto_confirm,
            auto_reject,
        } => {
            let config = Config::load()?;
            let threshold = threshold.unwrap_or(config.warning_threshold);
            if threshold > 100 {
                anyhow::bail!("--threshold must be 0-100, got {threshold}");
            }

            let services = Collaborators::from_config(&config)?;
            let sink = Arc::new(TerminalSink::new());

            let mut session = match ModerationSession::submit(services, sink, threshold, &url).await
            {
                Ok(session) => session,
                // The sink already rendered the single user-facing
                // message; exit non-zero without repeating it.
                Err(_) => std::process::exit(1),
            };

            if session.state().awaiting_review() {
                review_loop(&mut session, auto_confirm, auto_reject).await?;
            }
        }

        Commands::Filter { text } => {
            println!("{}", strip_screenshot_chrome(&text));
        }
    }

    Ok(())
}

/// Drive the confirm/reject review until the submission resolves.
///
/// A failed removal re-opens the review (the pipeline reverted to
/// Warning), so the prompt comes back until the user rejects or a removal
/// succeeds.
async fn review_loop(
    session: &mut ModerationSession,
    auto_confirm: bool,
    auto_reject: bool,
) -> Result<()> {
    loop {
        let confirm = if auto_confirm {
            true
        } else if auto_reject {
            false
        } else {
            prompt_confirm()?
        };

        if confirm {
            match session.confirm().await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "Confirm attempt failed");
                    if auto_confirm {
                        // Non-interactive: one attempt, surface the failure.
                        anyhow::bail!("removal was not acknowledged: {e}");
                    }
                }
            }
        } else {
            session.reject()?;
            return Ok(());
        }
    }
}

/// Ask the user to confirm or reject removal of the flagged post.
fn prompt_confirm() -> Result<bool> {
    loop {
        print!(
            "\n  {} remove this post, {} leave it up: ",
            "[c]onfirm".red().bold(),
            "[r]eject".green()
        );
        std::io::stdout().flush()?;

        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        match line.trim().to_ascii_lowercase().as_str() {
            "c" | "confirm" => return Ok(true),
            "r" | "reject" => return Ok(false),
            _ => println!("  Please answer c or r."),
        }
    }
}
