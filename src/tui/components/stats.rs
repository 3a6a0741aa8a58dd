//! Aggregate statistics of the current query

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::search::SearchStats;
use crate::tui::{styles::Theme, Frame};

#[derive(Debug, Default)]
pub struct StatsPanel {
    stats: Option<SearchStats>,
}

impl StatsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stats(&mut self, stats: &SearchStats) {
        self.stats = Some(stats.clone());
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let Some(stats) = &self.stats else {
            return vec![Line::from(Span::styled(
                "Type a query and press Enter",
                theme.placeholder_style(),
            ))];
        };

        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<20}", label), theme.dim_style()),
                Span::styled(value, theme.text_style()),
            ])
        };

        vec![
            field("Total results", stats.total_results.to_string()),
            field("Most common author", stats.most_common_author.clone()),
            field("Earliest published", stats.earliest_date.clone()),
            field("Latest published", stats.latest_date.clone()),
            field("Response time", format!("{:.2}s", stats.response_time_secs())),
        ]
    }
}

impl Component for StatsPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let paragraph = Paragraph::new(self.lines(theme)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Statistics")
                .border_style(theme.border_style()),
        );

        frame.render_widget(paragraph, area);
    }
}
