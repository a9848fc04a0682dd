//! Typed response payloads for the Google Custom Search JSON API.
//!
//! The wire format is validated here, at the parse boundary. A payload that
//! does not deserialize is reported as a schema mismatch instead of failing
//! deep inside the pipeline.

use serde::Deserialize;

/// A single search hit, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Result URL as returned by the API.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Short snippet, when the API supplies one.
    pub snippet: Option<String>,
    /// Declared MIME type, when the API supplies one (e.g. `application/pdf`).
    pub mime: Option<String>,
    /// Zero-based page index this result came from.
    pub source_page: u32,
    /// The query term that produced this result.
    pub query: String,
}

/// One parsed page of search results.
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Results on this page; empty when the API reported no items.
    pub results: Vec<SearchResult>,
    /// Start index of the next page, when the API advertises one.
    pub next_start: Option<u32>,
}

impl SearchPage {
    /// Whether the API reported zero results for this page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Top-level API response.
///
/// `items` is absent (not an empty list) when a page has no results, so it
/// is an explicit `Option` here rather than a serde default.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub(crate) items: Option<Vec<SearchItem>>,
    pub(crate) queries: Option<ResponseQueries>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub(crate) link: String,
    #[serde(default)]
    pub(crate) title: String,
    pub(crate) snippet: Option<String>,
    pub(crate) mime: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseQueries {
    #[serde(rename = "nextPage")]
    pub(crate) next_page: Option<Vec<PageInfo>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageInfo {
    #[serde(rename = "startIndex")]
    pub(crate) start_index: Option<u32>,
}

impl SearchResponse {
    /// Converts the wire payload into a [`SearchPage`] for the given query/page.
    pub(crate) fn into_page(self, query: &str, page: u32) -> SearchPage {
        let results = self
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| SearchResult {
                url: item.link,
                title: item.title,
                snippet: item.snippet,
                mime: item.mime,
                source_page: page,
                query: query.to_string(),
            })
            .collect();
        let next_start = self
            .queries
            .and_then(|q| q.next_page)
            .and_then(|pages| pages.into_iter().next())
            .and_then(|info| info.start_index);
        SearchPage {
            results,
            next_start,
        }
    }
}
