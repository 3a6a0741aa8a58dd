//! Session state for one query

use crate::search::{total_pages, SearchStats};

use super::cache::PageCache;

/// Where a session is in its fetch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No query yet, or the initial fetch failed
    Idle,
    /// Waiting for the first page of a new query
    AwaitingInitial,
    /// Page data is available
    Ready,
    /// Waiting for a page that missed the cache
    AwaitingPage,
}

/// Everything known about the current query
#[derive(Debug, Clone)]
pub struct SessionState {
    pub query: String,
    pub current_page: usize,
    pub total_results: usize,
    pub total_pages: usize,
    pub cache: PageCache,
    pub stats: Option<SearchStats>,
    pub phase: Phase,
    /// Last transport error shown to the user
    pub last_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            query: String::new(),
            current_page: 1,
            total_results: 0,
            total_pages: 0,
            cache: PageCache::new(),
            stats: None,
            phase: Phase::Idle,
            last_error: None,
        }
    }
}

impl SessionState {
    /// Fresh state for a newly submitted query
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            phase: Phase::AwaitingInitial,
            ..Self::default()
        }
    }

    /// Record the totals reported by the initial fetch
    pub fn set_totals(&mut self, total_results: usize) {
        self.total_results = total_results;
        self.total_pages = total_pages(total_results);
    }

    pub fn has_prev(&self) -> bool {
        self.total_pages > 0 && self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn contains_page(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}
