//! Paginated client for the Google Custom Search JSON API.

use std::time::Duration;

use tracing::{debug, info, instrument};

use super::error::ApiError;
use super::types::{SearchPage, SearchResponse};

/// Results per page requested from the API (the API maximum).
pub(crate) const RESULTS_PER_PAGE: u32 = 10;

/// Timeout for a single search API request.
const SEARCH_TIMEOUT_SECS: u64 = 30;

/// Client for issuing paginated search queries.
///
/// Created once per run and reused across pages, taking advantage of
/// connection pooling. The client performs no pacing of its own.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    search_engine_id: String,
}

impl SearchClient {
    /// Creates a new search client for the given endpoint and credentials.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
        }
    }

    /// Fetches one page of results for `term`.
    ///
    /// `page` is zero-based and maps to the API's 1-based `start` offset
    /// (`page * 10 + 1`). A well-formed success payload without an `items`
    /// field is an empty page, which terminates pagination upstream.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on a non-2xx response, a network failure or
    /// timeout, or a payload that does not match the expected schema.
    #[instrument(skip(self), fields(query = %term, page))]
    pub async fn search(&self, term: &str, page: u32) -> Result<SearchPage, ApiError> {
        let start = page * RESULTS_PER_PAGE + 1;
        debug!(start, "requesting search page");

        let num = RESULTS_PER_PAGE.to_string();
        let start_param = start.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.search_engine_id.as_str()),
                ("q", term),
                ("num", num.as_str()),
                ("start", start_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::request(term, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(term, status.as_u16()));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| ApiError::malformed(e.to_string()))?;

        let search_page = payload.into_page(term, page);
        info!(
            results = search_page.results.len(),
            has_next = search_page.next_start.is_some(),
            "received search page"
        );
        Ok(search_page)
    }
}
