//! Run orchestrator: drives the search → filter → dedup → download →
//! manifest pipeline, one request at a time.
//!
//! Execution is deliberately sequential. The search API and the PDF hosts
//! are rate-sensitive, and the configured inter-request delay is the sole
//! backpressure mechanism; no requests run in parallel. The seen-set and
//! the manifest accumulator are owned exclusively by this single execution
//! context.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::dedup::SeenSet;
use crate::download::{HttpClient, filename};
use crate::filter::is_pdf;
use crate::manifest::{ManifestRecord, ManifestWriter, RecordStatus};
use crate::search::{SearchClient, SearchResult};

/// Run state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Constructed, no request issued yet.
    Idle,
    /// Requesting and processing result pages.
    Paginating,
    /// All queries exhausted their pages (download failures included).
    Completed,
    /// Fatal failure or external interrupt; partial manifest flushed.
    Aborted,
}

/// Accounting for a finished run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Terminal state: `Completed` or `Aborted`.
    pub state: RunState,
    /// PDFs written to disk.
    pub downloaded: usize,
    /// Download attempts that failed (non-fatal, recorded).
    pub failed: usize,
    /// Results skipped as duplicates.
    pub skipped_duplicate: usize,
    /// Results skipped as non-PDFs.
    pub skipped_not_pdf: usize,
    /// Why the run aborted, when it did.
    pub abort_reason: Option<String>,
}

impl RunOutcome {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
            downloaded: 0,
            failed: 0,
            skipped_duplicate: 0,
            skipped_not_pdf: 0,
            abort_reason: None,
        }
    }

    /// Total results processed (every one has a manifest record).
    #[must_use]
    pub fn total_results(&self) -> usize {
        self.downloaded + self.failed + self.skipped_duplicate + self.skipped_not_pdf
    }
}

/// Drives one run of the search-and-download pipeline.
pub struct Orchestrator {
    config: Config,
    search: SearchClient,
    downloader: HttpClient,
    seen: SeenSet,
    manifest: ManifestWriter,
    interrupted: Arc<AtomicBool>,
    issued_request: bool,
}

impl Orchestrator {
    /// Builds the clients and accumulators for a run.
    ///
    /// `interrupted` is set by the top-level signal handler; the run checks
    /// it between requests and flushes the manifest before stopping.
    #[must_use]
    pub fn new(config: Config, interrupted: Arc<AtomicBool>) -> Self {
        let search = SearchClient::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            config.search_engine_id.clone(),
        );
        let downloader = HttpClient::new(
            config.download_timeout_secs,
            &config.user_agent,
            config.strict_pdf,
        );
        let manifest = ManifestWriter::new(&config.manifest_dir);
        Self {
            config,
            search,
            downloader,
            seen: SeenSet::new(),
            manifest,
            interrupted,
            issued_request: false,
        }
    }

    /// Runs the pipeline to completion or abort.
    ///
    /// Per-item download failures are recorded and the run continues.
    /// Search API failures and interrupts abort the run after a final
    /// manifest flush.
    ///
    /// # Errors
    ///
    /// Returns an error only when the output directory cannot be created or
    /// the manifest cannot be persisted; results would otherwise be
    /// silently lost.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        let mut outcome = RunOutcome::new();
        outcome.state = RunState::Paginating;

        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                self.config.output_dir.display()
            )
        })?;

        info!(
            queries = self.config.query_terms.len(),
            max_pages = self.config.max_pages,
            output_dir = %self.config.output_dir.display(),
            "run started"
        );

        let query_terms = self.config.query_terms.clone();
        'queries: for term in &query_terms {
            info!(query = %term, "starting query");
            for page in 0..self.config.max_pages {
                if self.check_interrupted(&mut outcome)? {
                    break 'queries;
                }

                self.pace().await;
                let search_page = match self.search.search(term, page).await {
                    Ok(search_page) => search_page,
                    Err(api_error) => {
                        error!(query = %term, page, error = %api_error, "search failed, aborting run");
                        self.abort(&mut outcome, api_error.to_string())?;
                        break 'queries;
                    }
                };

                if search_page.is_empty() {
                    debug!(query = %term, page, "empty page, query exhausted");
                    break;
                }

                for result in &search_page.results {
                    if self.check_interrupted(&mut outcome)? {
                        break 'queries;
                    }
                    self.process_result(result, &mut outcome).await;
                }

                // Flush once per page so a crash loses at most one page.
                self.manifest
                    .flush()
                    .context("failed to persist manifest")?;

                if search_page.next_start.is_none() {
                    debug!(query = %term, page, "no next page advertised");
                    break;
                }
            }
        }

        if outcome.state == RunState::Paginating {
            outcome.state = RunState::Completed;
        }
        self.manifest.flush().context("failed to persist manifest")?;

        info!(
            downloaded = outcome.downloaded,
            failed = outcome.failed,
            duplicates = outcome.skipped_duplicate,
            not_pdf = outcome.skipped_not_pdf,
            state = ?outcome.state,
            "run finished"
        );
        Ok(outcome)
    }

    /// Waits the configured delay, except before the first request of the run.
    async fn pace(&mut self) {
        if self.issued_request && self.config.request_delay_secs > 0.0 {
            debug!(
                delay_secs = self.config.request_delay_secs,
                "waiting before next request"
            );
            tokio::time::sleep(Duration::from_secs_f64(self.config.request_delay_secs)).await;
        }
        self.issued_request = true;
    }

    /// Applies filter → dedup → download to one result and records the outcome.
    async fn process_result(&mut self, result: &SearchResult, outcome: &mut RunOutcome) {
        if self.seen.seen(&result.url) {
            debug!(url = %result.url, "duplicate result");
            outcome.skipped_duplicate += 1;
            self.manifest.record(record_for(result, RecordStatus::SkippedDuplicate));
            return;
        }
        self.seen.mark_seen(&result.url);

        if !is_pdf(result) {
            debug!(url = %result.url, "not a PDF");
            outcome.skipped_not_pdf += 1;
            self.manifest.record(record_for(result, RecordStatus::SkippedNotPdf));
            return;
        }

        let name = filename::sanitize(&result.title, &result.url);
        let dest = filename::resolve_unique_path(&self.config.output_dir, &name);
        let local_name = dest
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&name)
            .to_string();

        match self.downloader.download(&result.url, &dest).await {
            Ok(bytes) => {
                info!(url = %result.url, file = %local_name, bytes, "downloaded");
                outcome.downloaded += 1;
                self.manifest.record(
                    record_for(result, RecordStatus::Downloaded).with_filename(local_name),
                );
            }
            Err(download_error) => {
                warn!(url = %result.url, error = %download_error, "download failed");
                outcome.failed += 1;
                self.manifest.record(
                    record_for(result, RecordStatus::Failed)
                        .with_error(download_error.to_string()),
                );
            }
        }
    }

    /// When the interrupt flag is set, flushes and marks the run aborted.
    fn check_interrupted(&mut self, outcome: &mut RunOutcome) -> Result<bool> {
        if !self.interrupted.load(Ordering::SeqCst) {
            return Ok(false);
        }
        warn!("interrupted, flushing partial manifest");
        self.abort(outcome, "interrupted".to_string())?;
        Ok(true)
    }

    fn abort(&mut self, outcome: &mut RunOutcome, reason: String) -> Result<()> {
        outcome.state = RunState::Aborted;
        outcome.abort_reason = Some(reason);
        self.manifest.flush().context("failed to persist manifest")?;
        Ok(())
    }
}

fn record_for(result: &SearchResult, status: RecordStatus) -> ManifestRecord {
    ManifestRecord::new(
        result.url.clone(),
        result.title.clone(),
        result.query.clone(),
        status,
    )
}
