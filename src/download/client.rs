//! HTTP client wrapper for streaming PDF downloads.
//!
//! The response body is streamed to disk chunk by chunk rather than
//! buffered in memory (PDF sizes are unbounded). On any failure the
//! partially-written file is removed; no half-written PDFs are left in the
//! output directory. The response stream is owned by the download call and
//! dropped on every exit path.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::CONNECT_TIMEOUT_SECS;
use super::error::DownloadError;
use crate::filter::url_path_is_pdf;

/// HTTP client for downloading files with streaming support.
///
/// Created once per run and reused for every download, taking advantage of
/// connection pooling. The per-request timeout covers the whole transfer.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    strict_pdf: bool,
}

impl HttpClient {
    /// Creates a new download client.
    ///
    /// * `timeout_secs` - total per-request timeout covering the transfer
    /// * `user_agent` - User-Agent header sent to PDF hosts
    /// * `strict_pdf` - when true, a response whose Content-Type is not
    ///   `application/pdf` fails with [`DownloadError::NotPdf`] unless the
    ///   URL path itself ends in `.pdf`
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(timeout_secs: u64, user_agent: &str, strict_pdf: bool) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .user_agent(user_agent)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client, strict_pdf }
    }

    /// Downloads `url` to `dest`, returning the number of bytes written.
    ///
    /// The caller chooses `dest` (already sanitized and collision-resolved).
    /// On any failure the partial file at `dest` is removed before the
    /// error is returned.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - Strict mode is on and the response is not a PDF
    /// - Writing to disk fails
    #[instrument(skip(self), fields(url = %url, path = %dest.display()))]
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        url::Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        debug!("starting download");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        if self.strict_pdf && !url_path_is_pdf(url) {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let is_pdf_body = content_type
                .as_deref()
                .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/pdf"));
            if !is_pdf_body {
                return Err(DownloadError::not_pdf(url, content_type.as_deref()));
            }
        }

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::io(dest, e))?;

        let stream_result = stream_to_file(&mut file, response, url, dest).await;
        if stream_result.is_err() {
            debug!("cleaning up partial file after error");
            drop(file);
            let _ = tokio::fs::remove_file(dest).await;
        }
        let bytes_written = stream_result?;

        info!(bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    dest: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::request(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(dest, e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer.flush().await.map_err(|e| DownloadError::io(dest, e))?;

    Ok(bytes_written)
}
