//! Error types for the search API client.

use thiserror::Error;

/// Errors returned by the search API client.
///
/// Any of these is fatal for the run: the orchestrator flushes the partial
/// manifest and aborts rather than repeat a failing request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error querying search API: {source}")]
    Network {
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Search request timed out before completion.
    #[error("timeout querying search API for '{query}'")]
    Timeout {
        /// The query term that timed out.
        query: String,
    },

    /// Non-2xx HTTP response from the search API (403 quota exceeded,
    /// 429 rate limited, 5xx, ...).
    #[error("search API returned HTTP {status} for '{query}'")]
    HttpStatus {
        /// The query term that failed.
        query: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body did not match the expected payload schema.
    #[error("malformed search API payload: {detail}")]
    MalformedPayload {
        /// Description of the schema mismatch.
        detail: String,
    },
}

impl ApiError {
    /// Creates a network or timeout error from a reqwest error.
    pub fn request(query: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                query: query.into(),
            }
        } else {
            Self::Network { source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(query: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            query: query.into(),
            status,
        }
    }

    /// Creates a malformed payload error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedPayload {
            detail: detail.into(),
        }
    }
}
