//! Run configuration resolved from environment variables and CLI flags.
//!
//! Environment variables (optionally from a `.env` file) supply defaults;
//! CLI flags override them. The result is an immutable [`Config`] validated
//! once at startup, before any request is made.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::cli::Args;

/// Default search API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
/// Default number of result pages per query. The API serves at most 10.
pub const DEFAULT_MAX_PAGES: u32 = 10;
/// Default delay between consecutive API/download requests, in seconds.
pub const DEFAULT_DELAY_SECS: f64 = 2.0;
/// Default per-download timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Default PDF output directory.
pub const DEFAULT_OUT_DIR: &str = "pdf_downloads";
/// Default manifest directory.
pub const DEFAULT_MANIFEST_DIR: &str = "manifests";
/// Default User-Agent sent to PDF hosts.
pub const DEFAULT_USER_AGENT: &str = "pdf-finder/1.0";

/// Configuration errors. Fatal: the run aborts before any request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent from both environment and CLI.
    #[error("missing required setting `{name}` (set the {name} environment variable)")]
    MissingRequired {
        /// Environment variable name.
        name: &'static str,
    },

    /// A setting was present but failed to parse or validate.
    #[error("invalid value for `{name}`: '{value}' ({detail})")]
    InvalidValue {
        /// Setting name.
        name: &'static str,
        /// The offending raw value.
        value: String,
        /// What was expected.
        detail: String,
    },
}

/// Immutable run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Search API key (opaque credential).
    pub api_key: String,
    /// Search engine identifier (the API's `cx` parameter).
    pub search_engine_id: String,
    /// Search API endpoint URL.
    pub endpoint: String,
    /// Query terms to run, in order.
    pub query_terms: Vec<String>,
    /// Maximum result pages per query (1..=10).
    pub max_pages: u32,
    /// Delay between consecutive requests, in seconds.
    pub request_delay_secs: f64,
    /// Per-download timeout, in seconds.
    pub download_timeout_secs: u64,
    /// Directory where PDFs are written.
    pub output_dir: PathBuf,
    /// Directory where manifest files are written.
    pub manifest_dir: PathBuf,
    /// User-Agent sent to PDF hosts.
    pub user_agent: String,
    /// Reject downloads whose response is not a PDF.
    pub strict_pdf: bool,
}

impl Config {
    /// Resolves configuration from the process environment and CLI args.
    ///
    /// Loads a `.env` file from the working directory when present, then
    /// applies CLI overrides and validates every value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required setting is missing or a value
    /// is out of range.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        // Missing .env is fine; explicit env vars still apply.
        let _ = dotenvy::dotenv();
        Self::from_env_with(args, |name| env::var(name).ok())
    }

    /// Same as [`resolve`](Self::resolve) but reads variables through
    /// `lookup`, keeping resolution testable without mutating process env.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required setting is missing or a value
    /// is out of range.
    pub fn from_env_with(
        args: &Args,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = required(&lookup, "API_KEY")?;
        let search_engine_id = required(&lookup, "CX")?;
        let endpoint = non_empty(lookup("API_ENDPOINT"))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let query_terms = if args.queries.is_empty() {
            parse_query_terms(&lookup("QUERIES").unwrap_or_default())
        } else {
            args.queries.clone()
        };
        if query_terms.is_empty() {
            return Err(ConfigError::MissingRequired { name: "QUERIES" });
        }

        let max_pages = match args.max_pages {
            Some(pages) => pages,
            None => parse_env(&lookup, "PAGES", DEFAULT_MAX_PAGES)?,
        };
        if !(1..=10).contains(&max_pages) {
            return Err(invalid("PAGES", max_pages, "expected range: 1..=10"));
        }

        let request_delay_secs = match args.delay {
            Some(delay) => delay,
            None => parse_env(&lookup, "DELAY", DEFAULT_DELAY_SECS)?,
        };
        if !(0.0..=60.0).contains(&request_delay_secs) {
            return Err(invalid(
                "DELAY",
                request_delay_secs,
                "expected range: 0..=60 seconds",
            ));
        }

        let download_timeout_secs = match args.timeout {
            Some(timeout) => timeout,
            None => parse_env(&lookup, "TIMEOUT", DEFAULT_TIMEOUT_SECS)?,
        };
        if !(1..=3600).contains(&download_timeout_secs) {
            return Err(invalid(
                "TIMEOUT",
                download_timeout_secs,
                "expected range: 1..=3600 seconds",
            ));
        }

        let output_dir = args
            .output_dir
            .clone()
            .or_else(|| non_empty(lookup("OUT_DIR")).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
        let manifest_dir = args
            .manifest_dir
            .clone()
            .or_else(|| non_empty(lookup("MANIFEST_DIR")).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_DIR));
        let user_agent = non_empty(lookup("USER_AGENT"))
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            api_key,
            search_engine_id,
            endpoint,
            query_terms,
            max_pages,
            request_delay_secs,
            download_timeout_secs,
            output_dir,
            manifest_dir,
            user_agent,
            strict_pdf: args.strict,
        })
    }
}

/// Parses the `QUERIES` value: a JSON array of strings, or a
/// comma-separated list. Blank entries are dropped.
#[must_use]
pub fn parse_query_terms(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    if raw.starts_with('[') {
        if let Ok(terms) = serde_json::from_str::<Vec<String>>(raw) {
            return terms
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }
    }
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    non_empty(lookup(name)).ok_or(ConfigError::MissingRequired { name })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(raw) = non_empty(lookup(name)) else {
        return Ok(default);
    };
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: raw,
        detail: format!("expected a {}", std::any::type_name::<T>()),
    })
}

fn invalid(
    name: &'static str,
    value: impl std::fmt::Display,
    detail: &str,
) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        detail: detail.to_string(),
    }
}
