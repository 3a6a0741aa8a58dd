//! Per-session page cache

use std::collections::HashMap;

use crate::search::Book;

/// Results already fetched for the current query, keyed by 1-based page.
///
/// Entries are never evicted; the whole cache is replaced when a new query
/// starts.
#[derive(Debug, Default, Clone)]
pub struct PageCache {
    pages: HashMap<usize, Vec<Book>>,
    metrics: CacheMetrics,
}

/// Hit/miss counters for a cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store results for a page, replacing nothing already cached
    pub fn insert(&mut self, page: usize, books: Vec<Book>) {
        self.pages.entry(page).or_insert(books);
    }

    /// Look up a page, counting the access as a hit or miss
    pub fn lookup(&mut self, page: usize) -> Option<&[Book]> {
        match self.pages.get(&page) {
            Some(books) => {
                self.metrics.hits += 1;
                Some(books.as_slice())
            }
            None => {
                self.metrics.misses += 1;
                None
            }
        }
    }

    /// Read a page without touching the counters
    pub fn get(&self, page: usize) -> Option<&[Book]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    pub fn contains(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.metrics
    }
}
