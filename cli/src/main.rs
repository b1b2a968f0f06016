//! CLI for duplicate issue triage.
//!
//! Runs once per `issues: opened` event, comparing the new issue against the
//! repository's open issues and commenting when a duplicate is confirmed.

use clap::Parser;
use duplicate_triage::{
    LlmSettings, Repository, SelectionConfig, TriageConfig, TriageError, TriageSummary,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Duplicate Triage - Flag newly opened issues that duplicate an open issue.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Repository in owner/name form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Path to the workflow event payload.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Minimum cosine similarity (exclusive) for a candidate.
    #[arg(
        long,
        env = "TRIAGE_SIMILARITY_THRESHOLD",
        default_value_t = duplicate_triage::DEFAULT_SIMILARITY_THRESHOLD
    )]
    similarity_threshold: f32,

    /// Maximum candidates checked with the language model.
    #[arg(
        long,
        env = "TRIAGE_MAX_CANDIDATES",
        default_value_t = duplicate_triage::DEFAULT_MAX_CANDIDATES
    )]
    max_candidates: usize,

    /// Model name on the OpenAI-compatible endpoint.
    #[arg(long, env = "TRIAGE_LLM_MODEL", default_value = duplicate_triage::llm::DEFAULT_MODEL)]
    llm_model: String,

    /// OpenAI-compatible endpoint.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = duplicate_triage::llm::DEFAULT_BASE_URL)]
    llm_base_url: String,

    /// API key for the endpoint.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    llm_api_key: Option<String>,

    /// Path to an LLM config file selecting another provider.
    #[arg(long, env = "TRIAGE_LLM_CONFIG")]
    llm_config_path: Option<PathBuf>,

    /// Path to a Handlebars template for the duplicate comment.
    #[arg(long, env = "TRIAGE_COMMENT_TEMPLATE")]
    comment_template_path: Option<PathBuf>,

    /// Directory for downloaded embedding model files.
    #[arg(long, env = "TRIAGE_MODEL_CACHE_DIR")]
    model_cache_dir: Option<PathBuf>,

    /// Log the comment instead of posting it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // octocrab's rustls needs a process-wide crypto provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<TriageSummary, TriageError> {
    let repository: Repository = args.repository.parse()?;
    let llm = LlmSettings {
        model: args.llm_model,
        base_url: args.llm_base_url,
        api_key: args.llm_api_key,
        config_path: args.llm_config_path,
    };

    let mut config = TriageConfig::new(args.token, repository, args.event_path)
        .with_selection(SelectionConfig {
            threshold: args.similarity_threshold,
            max_candidates: args.max_candidates,
        })
        .with_llm(llm)
        .with_dry_run(args.dry_run);
    if let Some(path) = args.comment_template_path {
        config = config.with_comment_template_path(path);
    }
    if let Some(dir) = args.model_cache_dir {
        config = config.with_model_cache_dir(dir);
    }

    duplicate_triage::run(&config).await
}

/// Prints the final run summary.
fn print_summary(summary: &TriageSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issue: #{}", summary.issue_number);
    println!(
        "  Open issues compared: {}{}",
        summary.open_issues,
        if summary.fetch_degraded {
            " (fetch failed)"
        } else {
            ""
        }
    );
    println!("  Candidates: {}", summary.candidates);
    println!("  Confirmations: {}", summary.confirmations);

    match &summary.duplicate {
        Some(duplicate) => {
            println!(
                "  Duplicate of: #{} ({}, score {:.2})",
                duplicate.number, duplicate.title, duplicate.score
            );
            println!("  Reason: {}", duplicate.rationale);
        }
        None => println!("  Duplicate of: none"),
    }
    println!("  Comment: {}", summary.comment.as_str());
}
