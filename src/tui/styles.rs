use ratatui::style::{Color, Modifier, Style};

/// Colors of the search screen
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,
    pub accent: Color,
    pub background: Color,
    pub status_background: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub placeholder: Color,

    /// Pagination row
    pub current_page: Color,
    pub page_link: Color,
    pub navigation: Color,

    pub loading: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Stone and teal
        Self {
            text: Color::Rgb(245, 245, 244),
            text_dim: Color::Rgb(168, 162, 158),
            text_bright: Color::White,
            accent: Color::Rgb(251, 191, 36),
            background: Color::Rgb(28, 25, 23),
            status_background: Color::Rgb(41, 37, 36),
            border: Color::Rgb(87, 83, 78),
            border_focused: Color::Rgb(20, 184, 166),
            selection: Color::Rgb(19, 78, 74),
            placeholder: Color::Rgb(120, 113, 108),
            current_page: Color::Rgb(13, 148, 136),
            page_link: Color::Rgb(45, 212, 191),
            navigation: Color::Rgb(56, 189, 248),
            loading: Color::Rgb(245, 158, 11),
            error: Color::Rgb(239, 68, 68),
        }
    }
}

impl Theme {
    /// Base style for normal elements
    pub fn base_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background)
    }

    /// Style for text content
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for focused borders
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected items
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the status bar
    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.status_background)
    }

    /// Style for help text
    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for placeholder text
    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.placeholder)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for secondary text such as labels and descriptions
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Style for markers and highlights
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for the current page selector
    pub fn current_page_style(&self) -> Style {
        Style::default()
            .bg(self.current_page)
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for other page selectors
    pub fn page_style(&self) -> Style {
        Style::default().fg(self.page_link)
    }

    /// Style for enabled prev/next arrows
    pub fn navigation_style(&self) -> Style {
        Style::default()
            .fg(self.navigation)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for disabled controls
    pub fn disabled_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the error banner
    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for in-progress indicators
    pub fn loading_style(&self) -> Style {
        Style::default().fg(self.loading)
    }
}