//! Data types shared by the search backends and the paging controller

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of results per page, fixed by the search service
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed to show `total_results` items
pub fn total_pages(total_results: usize) -> usize {
    total_results.div_ceil(PAGE_SIZE)
}

/// Zero-based offset of the first result on a 1-based `page`
pub fn start_index(page: usize) -> usize {
    page.saturating_sub(1) * PAGE_SIZE
}

/// A single search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Authors, already joined for display
    #[serde(default)]
    pub authors: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

impl Book {
    pub fn new(authors: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            authors: authors.into(),
            title: title.into(),
            description: None,
            published_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }

    /// The "authors - title" headline shown for collapsed items
    pub fn headline(&self) -> String {
        format!("{} - {}", self.authors, self.title)
    }

    /// Description text, falling back to a placeholder
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "No description available.",
        }
    }
}

/// Response to the initial query (first page plus aggregates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub books: Vec<Book>,

    #[serde(default)]
    pub total_items: usize,

    #[serde(default)]
    pub most_common_author: String,

    #[serde(default)]
    pub earliest_pub_date: String,

    #[serde(default)]
    pub latest_pub_date: String,
}

/// Response to a follow-up page request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Aggregate statistics captured for the initial query only
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    pub total_results: usize,
    pub most_common_author: String,
    pub earliest_date: String,
    pub latest_date: String,
    pub response_time: Duration,
}

impl SearchStats {
    pub fn from_response(response: &SearchResponse, response_time: Duration) -> Self {
        Self {
            total_results: response.total_items,
            most_common_author: response.most_common_author.clone(),
            earliest_date: response.earliest_pub_date.clone(),
            latest_date: response.latest_pub_date.clone(),
            response_time,
        }
    }

    /// Response time in seconds, as shown to the user
    pub fn response_time_secs(&self) -> f64 {
        self.response_time.as_secs_f64()
    }
}
