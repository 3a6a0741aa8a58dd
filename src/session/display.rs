//! Rendering seam between the controller and whatever shows results

use crate::search::{Book, SearchStats};

/// Something that can show a page of results and its pagination controls
pub trait DisplaySurface {
    /// Replace the displayed result list
    fn render_results(&mut self, results: &[Book]);

    /// Replace the row of page selectors
    fn render_pagination(&mut self, pages: &[usize], current_page: usize, has_prev: bool, has_next: bool);

    /// Show the aggregates of a fresh query
    fn render_stats(&mut self, stats: &SearchStats);

    /// Show a user-facing error banner
    fn render_error(&mut self, message: &str);

    /// Remove the error banner, if any
    fn clear_error(&mut self) {}
}
