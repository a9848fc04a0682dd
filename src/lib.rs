//! PDF Finder Core Library
//!
//! This library implements a sequential search-and-download pipeline:
//! keyword queries are issued against the Google Custom Search JSON API,
//! results are filtered to PDF documents, new documents are downloaded to
//! local storage, and every observed result is recorded in durable
//! manifest files (JSON + CSV).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Environment/CLI configuration resolution
//! - [`search`] - Paginated search API client with typed responses
//! - [`filter`] - PDF classification of search results
//! - [`dedup`] - In-run URL deduplication
//! - [`download`] - Streaming HTTP download with partial-file cleanup
//! - [`manifest`] - JSON/CSV manifest accumulation and persistence
//! - [`app`] - Run orchestration and exit-code mapping

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod filter;
pub mod manifest;
pub mod search;

// Re-export commonly used types
pub use app::{Orchestrator, RunOutcome, RunState};
pub use config::{Config, ConfigError};
pub use dedup::{SeenSet, canonical_url};
pub use download::{DownloadError, HttpClient};
pub use filter::is_pdf;
pub use manifest::{ManifestError, ManifestRecord, ManifestWriter, RecordStatus};
pub use search::{ApiError, SearchClient, SearchResult};

/// Process exit outcome for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// Run reached `Completed`: all pages processed (download failures are
    /// per-item and do not affect the exit code).
    Success,
    /// Run reached `Aborted`: configuration, search API, or manifest
    /// persistence failure, or an external interrupt.
    Aborted,
}

impl ProcessExit {
    /// Returns the process exit code for this outcome.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Aborted => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProcessExit;

    #[test]
    fn test_process_exit_codes() {
        assert_eq!(ProcessExit::Success.code(), 0);
        assert_eq!(ProcessExit::Aborted.code(), 1);
    }
}
