//! Search API client for the Google Custom Search JSON API.
//!
//! Issues paginated keyword queries and parses the response into typed
//! [`SearchResult`] values at the boundary. The client never sleeps between
//! requests; inter-request delay is the orchestrator's responsibility so it
//! stays testable on its own.

mod client;
mod error;
mod types;

pub use client::SearchClient;
pub use error::ApiError;
pub use types::{SearchPage, SearchResult};
