//! Filename sanitization and unique-path resolution for downloads.
//!
//! Derives a safe local filename from a result's title, falling back to the
//! URL's last path segment, and resolves collisions in the output directory
//! with numeric suffixes. Never fails on arbitrary Unicode input; unsafe
//! characters are replaced rather than rejected.

use std::path::{Component, Path, PathBuf};

use url::Url;

/// Maximum length of a generated filename in bytes, extension included.
/// Kept under the 255-byte component limit of common filesystems.
pub const MAX_FILENAME_BYTES: usize = 200;

/// Builds a sanitized `.pdf` filename from a result title and URL.
///
/// The title is preferred; when sanitization leaves nothing usable, the
/// URL's last path segment (percent-decoded, `.pdf` stripped) is used, and
/// `document` is the final fallback. The result always ends in `.pdf` and
/// never exceeds [`MAX_FILENAME_BYTES`] bytes; truncation happens on a
/// UTF-8 boundary so multibyte titles stay intact.
#[must_use]
pub fn sanitize(title: &str, url: &str) -> String {
    let stem = {
        let from_title = sanitize_component(title);
        if from_title.is_empty() {
            let from_url = stem_from_url(url);
            if from_url.is_empty() {
                "document".to_string()
            } else {
                from_url
            }
        } else {
            from_title
        }
    };

    let max_stem = MAX_FILENAME_BYTES - ".pdf".len();
    let truncated = truncate_utf8(&stem, max_stem).trim_end().trim_end_matches('.');
    if truncated.is_empty() {
        return "document.pdf".to_string();
    }
    format!("{truncated}.pdf")
}

/// Replaces filesystem-unsafe characters and collapses whitespace runs.
///
/// Replaced: `/ \ : * ? " < > |` and control characters.
#[must_use]
pub fn sanitize_component(value: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in value.chars() {
        let mapped = match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => ' ',
            c if c.is_control() => ' ',
            c if c.is_whitespace() => ' ',
            c => c,
        };
        if mapped == ' ' {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(mapped);
            prev_space = false;
        }
    }
    let trimmed = out.trim();
    if is_safe_segment(trimmed) {
        trimmed.to_string()
    } else {
        // Dot-only names (`.`, `..`) would escape the output directory
        trimmed.replace('.', "_")
    }
}

/// Resolves a unique file path, appending `-1`, `-2`, ... before the
/// extension until no file with that name exists in `dir`.
#[must_use]
pub fn resolve_unique_path(dir: &Path, filename: &str) -> PathBuf {
    let base_path = dir.join(filename);
    if !base_path.exists() {
        return base_path;
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(pos) => (&filename[..pos], &filename[pos..]),
        None => (filename, ""),
    };

    for i in 1..10_000 {
        let candidate = dir.join(format!("{stem}-{i}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }

    // Fallback (extremely unlikely)
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dir.join(format!("{stem}-{timestamp}{ext}"))
}

fn stem_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(last) = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back().map(str::to_string))
        .filter(|segment| !segment.is_empty())
    else {
        return String::new();
    };
    let decoded = urlencoding::decode(&last)
        .map(|d| d.into_owned())
        .unwrap_or(last);
    let stem = decoded
        .strip_suffix(".pdf")
        .or_else(|| decoded.strip_suffix(".PDF"))
        .unwrap_or(&decoded);
    sanitize_component(stem)
}

/// Longest prefix of `s` within `max_bytes` that ends on a char boundary.
fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn is_safe_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
