//! Redteam - CLI for the AI red-team evaluation record pipeline.
//!
//! Loads prompt/response attempts (from a JSON file or the built-in sample
//! set), records one evaluation per attempt, folds the run into a summary,
//! and stages sink-ready JSON files for log analytics ingestion.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use redteam_core::recorder::{Attempt, EvaluationRecorder, RecorderConfig};
use redteam_core::summary::RunSummary;
use redteam_core::summarize;
use redteam_sentinel::Exporter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod sample;

/// Redteam - AI red-team evaluation record pipeline
#[derive(Parser, Debug)]
#[command(name = "redteam", version, about)]
struct Args {
    /// Attempts JSON file (array of attempts); uses the built-in sample
    /// set when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Staging directory for sink-ready JSON files
    #[arg(long, default_value = "./data")]
    out: PathBuf,

    /// Override the passing threshold (default 0.8)
    #[arg(long)]
    threshold: Option<f64>,

    /// Skip malformed attempts with a warning instead of aborting
    #[arg(long)]
    skip_invalid: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also write rolling log files into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Initialize logging, optionally with file rotation.
fn init_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("redteam={},warn", args.log_level)));

    if let Some(log_dir) = &args.log_dir {
        if fs::create_dir_all(log_dir).is_ok() {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix("redteam")
                .filename_suffix("log")
                .build(log_dir)
                .ok();

            if let Some(appender) = file_appender {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_writer(std::io::stdout))
                    .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                    .init();
                return Some(guard);
            }
        }
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    None
}

/// Load attempts from the input file, or fall back to the sample set.
fn load_attempts(args: &Args) -> anyhow::Result<Vec<Attempt>> {
    match &args.input {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading attempts from {}", path.display()))?;
            let attempts: Vec<Attempt> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing attempts from {}", path.display()))?;
            tracing::info!(count = attempts.len(), path = %path.display(), "loaded attempts");
            Ok(attempts)
        }
        None => {
            let attempts = sample::attempts();
            tracing::info!(count = attempts.len(), "using built-in sample attempts");
            Ok(attempts)
        }
    }
}

/// Log the run report for operator visibility.
fn report(summary: &RunSummary) {
    let categories: Vec<&str> = summary
        .risk_categories_tested
        .iter()
        .map(|c| c.as_str())
        .collect();

    tracing::info!(
        total = summary.total_tests,
        passed = summary.passed_tests,
        failed = summary.failed_tests,
        compliance_rate = %format!("{:.1}%", summary.compliance_rate),
        "run complete"
    );
    tracing::info!(
        average_score = %format!("{:.3}", summary.average_score),
        total_tokens = summary.total_tokens_used,
        avg_response_time = %format!("{:.2}s", summary.average_response_time_secs),
        categories = %categories.join(", "),
        "run metrics"
    );
    tracing::info!(
        high = summary.severity_counts.high,
        medium = summary.severity_counts.medium,
        low = summary.severity_counts.low,
        "severity breakdown"
    );
}

fn run(args: &Args) -> anyhow::Result<()> {
    let attempts = load_attempts(args)?;

    let config = match args.threshold {
        Some(threshold) => RecorderConfig::with_threshold(threshold),
        None => RecorderConfig::default(),
    };
    let mut recorder = EvaluationRecorder::with_config(config);

    let mut records = Vec::with_capacity(attempts.len());
    for attempt in &attempts {
        match recorder.record(attempt) {
            Ok(record) => records.push(record),
            Err(e) if args.skip_invalid => {
                tracing::warn!(
                    category = attempt.risk_category.as_str(),
                    error = %e,
                    "skipping malformed attempt"
                );
            }
            Err(e) => return Err(e).context("recording attempt"),
        }
    }

    let summary = summarize(&records).context("summarizing run")?;
    let paths = Exporter::new(&args.out)
        .export(&records, &summary)
        .context("staging records for ingestion")?;

    report(&summary);
    tracing::info!(
        results = %paths.results.display(),
        summary = %paths.summary.display(),
        "staged files ready for ingestion"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(&args);

    tracing::info!("Starting red-team evaluation pipeline");
    run(&args)
}
