//! Widgets that make up the search screen

pub mod pagination;
pub mod results;
pub mod search_bar;
pub mod stats;

pub use pagination::PaginationBar;
pub use results::ResultsView;
pub use search_bar::SearchBar;
pub use stats::StatsPanel;

use crate::search::{Book, SearchStats};
use crate::session::DisplaySurface;
use crate::tui::{styles::Theme, Frame};
use ratatui::layout::Rect;

/// Base trait for all UI components
pub trait Component {
    /// Render the component
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Set component focus
    fn set_focus(&mut self, focus: bool) {
        let _ = focus;
    }
}

/// Display surface backed by the terminal widgets
#[derive(Debug)]
pub struct TerminalDisplay {
    pub results: ResultsView,
    pub pagination: PaginationBar,
    pub stats: StatsPanel,
    pub error: Option<String>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            results: ResultsView::new(),
            pagination: PaginationBar::new(),
            stats: StatsPanel::new(),
            error: None,
        }
    }
}

impl DisplaySurface for TerminalDisplay {
    fn render_results(&mut self, results: &[Book]) {
        self.results.set_results(results);
    }

    fn render_pagination(&mut self, pages: &[usize], current_page: usize, has_prev: bool, has_next: bool) {
        self.pagination.update(pages, current_page, has_prev, has_next);
    }

    fn render_stats(&mut self, stats: &SearchStats) {
        self.stats.set_stats(stats);
    }

    fn render_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}
