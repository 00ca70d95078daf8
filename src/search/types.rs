use thiserror::Error;

/// A raw result of the search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
}

/// A search result that survived exclusion, with its length resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    pub duration_minutes: f64,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected search response: {0}")]
    InvalidResponse(String),

    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}
