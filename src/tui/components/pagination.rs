//! Pagination row: "< 1 2 [3] 4 5 >"

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::tui::{styles::Theme, Frame};

/// Page selectors for the current window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationBar {
    pages: Vec<usize>,
    current_page: usize,
    has_prev: bool,
    has_next: bool,
}

impl PaginationBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, pages: &[usize], current_page: usize, has_prev: bool, has_next: bool) {
        self.pages = pages.to_vec();
        self.current_page = current_page;
        self.has_prev = has_prev;
        self.has_next = has_next;
    }

    /// Page shown in the `slot`-th (1-based) selector, if any
    pub fn page_at_slot(&self, slot: usize) -> Option<usize> {
        slot.checked_sub(1).and_then(|index| self.pages.get(index)).copied()
    }

    /// Build the styled selector line
    pub fn line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();

        // Previous arrow
        if self.has_prev {
            spans.push(Span::styled("< ", theme.navigation_style()));
        } else {
            spans.push(Span::styled("< ", theme.disabled_style()));
        }

        for &page in &self.pages {
            if page == self.current_page {
                spans.push(Span::styled(format!("[{}]", page), theme.current_page_style()));
            } else {
                spans.push(Span::styled(format!(" {} ", page), theme.page_style()));
            }
            spans.push(Span::raw(" "));
        }

        // Next arrow
        if self.has_next {
            spans.push(Span::styled(">", theme.navigation_style()));
        } else {
            spans.push(Span::styled(">", theme.disabled_style()));
        }

        Line::from(spans)
    }
}

impl Component for PaginationBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let paragraph = Paragraph::new(self.line(theme))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Pages")
                    .border_style(theme.border_style()),
            );

        frame.render_widget(paragraph, area);
    }
}
