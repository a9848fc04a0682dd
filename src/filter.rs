//! PDF classification for search results.
//!
//! Classification uses only information already present in the result (URL
//! path and declared MIME type). No network round-trip is made at filter
//! time; the downloader re-checks the response Content-Type in strict mode.

use url::Url;

use crate::search::SearchResult;

/// Returns true when the result should be treated as a downloadable PDF.
///
/// A result is a PDF if its URL path ends in `.pdf` (case-insensitive) or
/// its declared MIME type is `application/pdf`.
#[must_use]
pub fn is_pdf(result: &SearchResult) -> bool {
    if result
        .mime
        .as_deref()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/pdf"))
    {
        return true;
    }
    url_path_is_pdf(&result.url)
}

/// Whether the URL's path component ends in `.pdf`, ignoring query/fragment.
#[must_use]
pub fn url_path_is_pdf(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Unparseable input: fall back to the raw string with any
        // query/fragment trimmed off.
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };
    path.to_ascii_lowercase().ends_with(".pdf")
}
