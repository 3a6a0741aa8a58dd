//! Single-line query input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::Component;
use crate::tui::{styles::Theme, Frame};

#[derive(Debug, Default)]
pub struct SearchBar {
    input: String,
    focused: bool,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    /// Apply an editing key; returns whether it was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Char('u') => {
                self.input.clear();
                true
            }
            _ => false,
        }
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };

        let paragraph = if self.input.is_empty() && !self.focused {
            Paragraph::new("Search books…").style(theme.placeholder_style())
        } else {
            Paragraph::new(self.input.as_str()).style(theme.text_style())
        };

        frame.render_widget(
            paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search")
                    .border_style(border_style),
            ),
            area,
        );

        if self.focused {
            let x = area.x + 1 + self.input.width() as u16;
            frame.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
        }
    }

    fn set_focus(&mut self, focus: bool) {
        self.focused = focus;
    }
}
