//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Search the web for PDF documents, download them, and keep a manifest.
///
/// Queries the Google Custom Search JSON API for each query term, filters
/// results to PDFs, downloads new documents, and records every result in
/// `manifest.json` / `manifest.csv`. Credentials (API_KEY, CX) come from
/// the environment or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "pdf-finder")]
#[command(author, version, about)]
pub struct Args {
    /// Query terms to search (overrides the QUERIES environment variable)
    pub queries: Vec<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum result pages per query (1-10)
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_pages: Option<u32>,

    /// Delay between consecutive requests in seconds
    #[arg(short = 'd', long)]
    pub delay: Option<f64>,

    /// Per-download timeout in seconds (1-3600)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    /// Directory to save PDFs to
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Directory to write manifest files to
    #[arg(short = 'm', long)]
    pub manifest_dir: Option<PathBuf>,

    /// Reject downloads whose response Content-Type is not application/pdf
    #[arg(long)]
    pub strict: bool,
}
