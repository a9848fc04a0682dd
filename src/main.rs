//! CLI entry point for the pdf-finder tool.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;
use pdf_finder::app::determine_exit_outcome;
use pdf_finder::cli::Args;
use pdf_finder::{Config, Orchestrator};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filename of the plain-text log copy kept next to the manifests.
const RUN_LOG: &str = "run.log";

// The pipeline is sequential by design; a current-thread runtime makes the
// single-threaded execution model explicit.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Config is resolved before tracing so the log file can live in the
    // configured manifest directory.
    let config = match Config::resolve(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&args, &config.manifest_dir);
    debug!(?args, "CLI arguments parsed");

    match run(config).await {
        Ok(exit) => ExitCode::from(u8::try_from(exit.code()).unwrap_or(1)),
        Err(err) => {
            error!(error = %format!("{err:#}"), "run failed");
            ExitCode::FAILURE
        }
    }
}

/// Initializes console logging plus a plain-text copy in the manifest
/// directory. When the log file cannot be opened, console logging still
/// works on its own.
fn init_tracing(args: &Args, manifest_dir: &Path) {
    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    match open_run_log(manifest_dir) {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
            .init(),
        None => registry.init(),
    }
}

fn open_run_log(manifest_dir: &Path) -> Option<std::fs::File> {
    std::fs::create_dir_all(manifest_dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(manifest_dir.join(RUN_LOG))
        .ok()
}

async fn run(config: Config) -> Result<pdf_finder::ProcessExit> {
    info!(
        queries = ?config.query_terms,
        output_dir = %config.output_dir.display(),
        manifest_dir = %config.manifest_dir.display(),
        "pdf-finder starting"
    );

    // Ctrl-C sets the flag; the orchestrator flushes the manifest and stops
    // between requests, preserving partial results.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_signal = Arc::clone(&interrupted);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupted_signal.store(true, Ordering::SeqCst);
        }
    });

    let mut orchestrator = Orchestrator::new(config, interrupted);
    let outcome = orchestrator.run().await?;

    info!(
        downloaded = outcome.downloaded,
        failed = outcome.failed,
        duplicates = outcome.skipped_duplicate,
        not_pdf = outcome.skipped_not_pdf,
        total = outcome.total_results(),
        "summary"
    );
    if let Some(reason) = &outcome.abort_reason {
        error!(reason = %reason, "run aborted");
    }

    Ok(determine_exit_outcome(&outcome))
}
