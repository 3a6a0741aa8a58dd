//! Error types for search backends and the paging controller

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Search service returned {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Request timed out after {0:?}")]
    TimeoutError(std::time::Duration),

    #[error("Stale response from generation {issued} (current is {current})")]
    StaleResponse { issued: u64, current: u64 },

    #[error("Page {page} is out of range (1..={total_pages})")]
    InvalidPage { page: usize, total_pages: usize },

    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SearchError {
    /// Whether this error came from talking to the backend
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SearchError::HttpError(_)
                | SearchError::StatusError { .. }
                | SearchError::JsonError(_)
                | SearchError::TimeoutError(_)
        )
    }

    /// Whether this error should stay out of the user's sight
    pub fn is_silent(&self) -> bool {
        matches!(self, SearchError::StaleResponse { .. })
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
