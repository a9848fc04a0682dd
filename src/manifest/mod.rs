//! Manifest accumulation and persistence (JSON + CSV).
//!
//! The manifest is the durable record of every search result encountered
//! and its disposition. Records accumulate in memory and `flush()` rewrites
//! both files, so a crash mid-run loses at most the results recorded since
//! the last flush (the orchestrator flushes after every page).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Filename of the JSON manifest inside the manifest directory.
pub const MANIFEST_JSON: &str = "manifest.json";
/// Filename of the CSV manifest inside the manifest directory.
pub const MANIFEST_CSV: &str = "manifest.csv";

/// Disposition of one observed search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    /// The PDF was downloaded; `filename` is set.
    #[serde(rename = "downloaded")]
    Downloaded,
    /// The URL's canonical form was already seen earlier in the run.
    #[serde(rename = "skipped-duplicate")]
    SkippedDuplicate,
    /// The result was not classified as a PDF.
    #[serde(rename = "skipped-not-pdf")]
    SkippedNotPdf,
    /// The download was attempted and failed; `error_detail` is set.
    #[serde(rename = "failed")]
    Failed,
}

impl RecordStatus {
    /// Stable string label, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Downloaded => "downloaded",
            Self::SkippedDuplicate => "skipped-duplicate",
            Self::SkippedNotPdf => "skipped-not-pdf",
            Self::Failed => "failed",
        }
    }
}

/// One manifest entry. Field order here is the stable CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Result URL as returned by the search API.
    pub url: String,
    /// Result title.
    pub title: String,
    /// The query term that produced this result.
    pub query: String,
    /// Local filename, present iff `status` is `Downloaded`.
    pub filename: Option<String>,
    /// Disposition of this result.
    pub status: RecordStatus,
    /// Failure description, present for `Failed` records.
    pub error_detail: Option<String>,
    /// RFC 3339 timestamp of when the result was processed.
    pub timestamp: String,
}

impl ManifestRecord {
    /// Creates a record with the current timestamp.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        query: impl Into<String>,
        status: RecordStatus,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            query: query.into(),
            filename: None,
            status,
            error_detail: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Sets the local filename (for `Downloaded` records).
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the failure description (for `Failed` records).
    #[must_use]
    pub fn with_error(mut self, detail: impl Into<String>) -> Self {
        self.error_detail = Some(detail.into());
        self
    }
}

/// Errors writing manifest files.
///
/// These are fatal: if the manifest cannot be persisted, results would be
/// silently lost.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to create the manifest directory or write a manifest file.
    #[error("failed to write manifest {path}: {source}")]
    Io {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize records to JSON.
    #[error("failed to serialize manifest JSON: {source}")]
    Json {
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write a CSV row.
    #[error("failed to write manifest CSV: {source}")]
    Csv {
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// Accumulates manifest records and persists them to JSON and CSV.
///
/// Owned exclusively by the orchestrator; records are append-only during a
/// run and both files are rewritten in full on every flush.
#[derive(Debug)]
pub struct ManifestWriter {
    records: Vec<ManifestRecord>,
    json_path: PathBuf,
    csv_path: PathBuf,
}

impl ManifestWriter {
    /// Creates a writer targeting `manifest.json` / `manifest.csv` in `dir`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            records: Vec::new(),
            json_path: dir.join(MANIFEST_JSON),
            csv_path: dir.join(MANIFEST_CSV),
        }
    }

    /// Appends a record in memory. Does not touch disk.
    pub fn record(&mut self, record: ManifestRecord) {
        debug!(url = %record.url, status = record.status.as_str(), "recorded result");
        self.records.push(record);
    }

    /// Records accumulated so far.
    #[must_use]
    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    /// Number of records accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records have been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the full current record set to both files, overwriting any
    /// prior contents.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` when the manifest directory or either file
    /// cannot be written, or serialization fails.
    pub fn flush(&self) -> Result<(), ManifestError> {
        if let Some(dir) = self.json_path.parent() {
            fs::create_dir_all(dir).map_err(|e| ManifestError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| ManifestError::Json { source: e })?;
        fs::write(&self.json_path, json).map_err(|e| ManifestError::Io {
            path: self.json_path.clone(),
            source: e,
        })?;

        let mut csv_writer = csv::Writer::from_path(&self.csv_path)
            .map_err(|e| ManifestError::Csv { source: e })?;
        for record in &self.records {
            csv_writer
                .serialize(record)
                .map_err(|e| ManifestError::Csv { source: e })?;
        }
        csv_writer.flush().map_err(|e| ManifestError::Io {
            path: self.csv_path.clone(),
            source: e,
        })?;

        info!(
            records = self.records.len(),
            json = %self.json_path.display(),
            csv = %self.csv_path.display(),
            "manifest flushed"
        );
        Ok(())
    }
}
