//! Result list with per-item expandable descriptions

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::Component;
use crate::search::Book;
use crate::tui::{styles::Theme, Frame};
use crate::utils::text::{truncate_to_width, wrap_indented};

/// One displayed result and its description toggle
#[derive(Debug, Clone)]
pub struct ResultEntry {
    pub book: Book,
    pub expanded: bool,
}

/// List of the current page's results
#[derive(Debug, Default)]
pub struct ResultsView {
    entries: Vec<ResultEntry>,
    selected: Option<usize>,
    focused: bool,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list; every entry starts collapsed
    pub fn set_results(&mut self, books: &[Book]) {
        self.entries = books
            .iter()
            .cloned()
            .map(|book| ResultEntry { book, expanded: false })
            .collect();
        self.selected = if self.entries.is_empty() { None } else { Some(0) };
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select_next(&mut self) {
        if let Some(index) = self.selected {
            self.selected = Some((index + 1).min(self.entries.len() - 1));
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(index) = self.selected {
            self.selected = Some(index.saturating_sub(1));
        }
    }

    /// Show or hide the description of the selected entry
    pub fn toggle_selected(&mut self) {
        if let Some(entry) = self.selected.and_then(|index| self.entries.get_mut(index)) {
            entry.expanded = !entry.expanded;
        }
    }

    fn list_item(entry: &ResultEntry, width: usize, theme: &Theme) -> ListItem<'static> {
        let marker = if entry.expanded { "▾ " } else { "▸ " };
        let mut lines = vec![Line::from(vec![
            Span::styled(marker, theme.accent_style()),
            Span::styled(
                truncate_to_width(&entry.book.headline(), width.saturating_sub(2)),
                theme.text_style(),
            ),
        ])];

        if entry.expanded {
            if let Some(date) = &entry.book.published_date {
                lines.push(Line::from(Span::styled(format!("    Published: {}", date), theme.dim_style())));
            }
            for line in wrap_indented(entry.book.description_or_default(), width, "    ") {
                lines.push(Line::from(Span::styled(line, theme.dim_style())));
            }
        }

        ListItem::new(lines)
    }
}

impl Component for ResultsView {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| Self::list_item(entry, width, theme))
            .collect();

        let border_style = if self.focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Results")
                    .border_style(border_style),
            )
            .highlight_style(theme.selection_style());

        let mut state = ListState::default();
        if self.focused {
            state.select(self.selected);
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn set_focus(&mut self, focus: bool) {
        self.focused = focus;
    }
}
