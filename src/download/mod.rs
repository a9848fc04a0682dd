//! Streaming PDF download with guaranteed partial-file cleanup.
//!
//! - [`client`] - HTTP client wrapper that streams response bodies to disk
//! - [`error`] - Structured download errors
//! - [`filename`] - Filename sanitization and unique-path resolution

mod client;
mod error;
pub mod filename;

pub use client::HttpClient;
pub use error::DownloadError;

/// Connection timeout for download requests, in seconds.
pub(crate) const CONNECT_TIMEOUT_SECS: u64 = 30;
