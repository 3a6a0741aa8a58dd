use crate::session::{FetchOutcome, Phase, SearchController};
use crate::tui::{
    components::{Component, SearchBar, TerminalDisplay},
    events::Event,
    keys::{Action, KeyMap},
    styles::Theme,
    Frame,
};
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::{debug, warn};

/// Which widget receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
}

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Paging controller, which owns the display surface
    pub controller: SearchController<TerminalDisplay>,

    /// Query input
    pub search_bar: SearchBar,

    /// Widget with keyboard focus
    pub focus: Focus,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Current theme for styling
    pub theme: Theme,

    /// Show help overlay
    pub show_help: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(controller: SearchController<TerminalDisplay>) -> Self {
        let mut search_bar = SearchBar::new();
        search_bar.set_focus(true);

        Self {
            should_quit: false,
            controller,
            search_bar,
            focus: Focus::Search,
            key_map: KeyMap::default(),
            theme: Theme::default(),
            show_help: false,
        }
    }

    /// Handle incoming terminal events; returns whether to quit
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => {
                let action = match self.focus {
                    Focus::Search => self.key_map.search_action(&key_event),
                    Focus::Results => self.key_map.browse_action(&key_event),
                };

                match action {
                    Some(action) => self.perform(action),
                    None if self.focus == Focus::Search => {
                        self.search_bar.handle_key(key_event);
                    }
                    None => {}
                }
            }

            // Layout is recomputed on every draw
            Event::Resize(..) | Event::Tick => {}
        }

        Ok(self.should_quit)
    }

    /// Apply a completed fetch from the controller's channel
    pub fn handle_outcome(&mut self, outcome: FetchOutcome) {
        match self.controller.apply(outcome) {
            Ok(()) => {}
            Err(e) if e.is_silent() => debug!("{}", e),
            // Already logged and shown by the controller
            Err(e) if e.is_transport() => {}
            Err(e) => warn!("Unexpected fetch outcome: {}", e),
        }
    }

    fn perform(&mut self, action: Action) {
        let result = match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                Ok(())
            }
            Action::SwitchFocus => {
                self.set_focus(match self.focus {
                    Focus::Search => Focus::Results,
                    Focus::Results => Focus::Search,
                });
                Ok(())
            }
            Action::Submit => {
                let query = self.search_bar.value().to_string();
                let submitted = self.controller.submit_query(&query);
                if submitted.is_ok() {
                    self.set_focus(Focus::Results);
                }
                submitted
            }
            Action::NextPage => self.controller.next_page().map(|_| ()),
            Action::PreviousPage => self.controller.previous_page().map(|_| ()),
            Action::PageSlot(slot) => {
                match self.controller.display().pagination.page_at_slot(slot) {
                    Some(page) => self.controller.go_to_page(page).map(|load| {
                        debug!("Page {} requested: {:?}", page, load);
                    }),
                    None => Ok(()),
                }
            }
            Action::SelectNext => {
                self.controller.display_mut().results.select_next();
                Ok(())
            }
            Action::SelectPrevious => {
                self.controller.display_mut().results.select_previous();
                Ok(())
            }
            Action::ToggleDescription => {
                self.controller.display_mut().results.toggle_selected();
                Ok(())
            }
        };

        if let Err(e) = result {
            // Out-of-range pages are never offered by the UI; anything else was shown already
            debug!("Action {:?} failed: {}", action, e);
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.search_bar.set_focus(focus == Focus::Search);
        self.controller
            .display_mut()
            .results
            .set_focus(focus == Focus::Results);
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        frame.render_widget(Block::default().style(self.theme.base_style()), frame.size());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Length(7), // Statistics
                Constraint::Min(3),    // Results
                Constraint::Length(3), // Pagination
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        self.search_bar.render(frame, chunks[0], &self.theme);

        let theme = &self.theme;
        let display = self.controller.display_mut();
        display.stats.render(frame, chunks[1], theme);
        display.results.render(frame, chunks[2], theme);
        display.pagination.render(frame, chunks[3], theme);

        self.render_status_bar(frame, chunks[4]);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    /// Text for the status bar: error banner first, then fetch state
    pub fn status_text(&self) -> String {
        if let Some(error) = &self.controller.display().error {
            return format!("Error: {}", error);
        }

        let state = self.controller.state();
        match state.phase {
            Phase::Idle => "Ctrl+G for help | Ctrl+C to quit".to_string(),
            Phase::AwaitingInitial => format!("Searching for \"{}\"…", state.query),
            Phase::AwaitingPage => format!("Loading page {}…", state.current_page),
            Phase::Ready if state.total_pages == 0 => format!("No results for \"{}\"", state.query),
            Phase::Ready => {
                let results = &self.controller.display().results;
                let mut parts = vec![format!("Page {} of {}", state.current_page, state.total_pages)];
                if let Some(index) = results.selected() {
                    parts.push(format!("Result {}/{}", index + 1, results.entries().len()));
                }
                if let Some(stats) = &state.stats {
                    parts.push(format!("{} results in {:.2}s", stats.total_results, stats.response_time_secs()));
                }
                parts.push(format!("{} backend", self.controller.backend_name()));
                parts.push("Ctrl+G for help".to_string());
                parts.join(" | ")
            }
        }
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let style = if self.controller.display().error.is_some() {
            self.theme.error_style()
        } else if self.controller.is_fetching() {
            self.theme.loading_style()
        } else {
            self.theme.status_bar_style()
        };

        frame.render_widget(Paragraph::new(self.status_text()).style(style), area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = centered_rect(60, 50, frame.size());

        let help_block = Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .style(self.theme.help_style());

        let help_paragraph = Paragraph::new(self.key_map.help_text())
            .block(help_block)
            .style(self.theme.text_style());

        frame.render_widget(Clear, help_area);
        frame.render_widget(help_paragraph, help_area);
    }
}

/// Create a centered rectangle with given percentage of the screen
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
