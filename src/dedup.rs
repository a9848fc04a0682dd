//! In-run URL deduplication.
//!
//! The seen-set is an explicit struct instantiated once per run and owned by
//! the orchestrator's single execution context; nothing here is shared
//! across threads or persisted across runs.

use std::collections::HashSet;

use url::Url;

/// Canonical form of a URL used as the deduplication key.
///
/// Rule: `scheme://host/path` with scheme and host lowercased and default
/// ports dropped (both done by the `url` crate on parse), query string and
/// fragment stripped. The path is kept byte-exact since path case is
/// significant on most origins. Unparseable input falls back to the trimmed
/// raw string so exact repeats still deduplicate.
#[must_use]
pub fn canonical_url(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            match parsed.port() {
                Some(port) => format!("{}://{host}:{port}{}", parsed.scheme(), parsed.path()),
                None => format!("{}://{host}{}", parsed.scheme(), parsed.path()),
            }
        }
        Err(_) => url.trim().to_string(),
    }
}

/// Set of already-seen result URLs, keyed by canonical form.
#[derive(Debug, Default)]
pub struct SeenSet {
    seen: HashSet<String>,
}

impl SeenSet {
    /// Creates an empty seen-set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this URL (by canonical form) has been marked seen.
    #[must_use]
    pub fn seen(&self, url: &str) -> bool {
        self.seen.contains(&canonical_url(url))
    }

    /// Marks this URL as seen. A second call with the same canonical form
    /// is a no-op.
    pub fn mark_seen(&mut self, url: &str) {
        self.seen.insert(canonical_url(url));
    }

    /// Number of distinct canonical URLs seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no URLs have been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
