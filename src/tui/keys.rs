use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub label: &'static str,
    pub description: &'static str,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, label: &'static str, description: &'static str) -> Self {
        Self {
            key,
            modifiers,
            label,
            description,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }
}

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    SwitchFocus,
    Submit,
    NextPage,
    PreviousPage,
    /// Jump to the n-th (1-based) page selector of the window
    PageSlot(usize),
    SelectNext,
    SelectPrevious,
    ToggleDescription,
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub switch_focus: KeyBinding,
    pub next_page: KeyBinding,
    pub previous_page: KeyBinding,
    pub select_next: KeyBinding,
    pub select_previous: KeyBinding,
    pub toggle_description: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Ctrl+C", "Quit application"),
            help: KeyBinding::new(KeyCode::Char('g'), KeyModifiers::CONTROL, "Ctrl+G", "Show/hide help"),
            switch_focus: KeyBinding::new(KeyCode::Tab, KeyModifiers::NONE, "Tab", "Switch between search and results"),
            next_page: KeyBinding::new(KeyCode::Right, KeyModifiers::NONE, "→", "Next page"),
            previous_page: KeyBinding::new(KeyCode::Left, KeyModifiers::NONE, "←", "Previous page"),
            select_next: KeyBinding::new(KeyCode::Down, KeyModifiers::NONE, "↓", "Select next result"),
            select_previous: KeyBinding::new(KeyCode::Up, KeyModifiers::NONE, "↑", "Select previous result"),
            toggle_description: KeyBinding::new(KeyCode::Char(' '), KeyModifiers::NONE, "Space", "Show/hide description"),
        }
    }
}

impl KeyMap {
    /// Bindings active everywhere
    pub fn global_action(&self, event: &KeyEvent) -> Option<Action> {
        if self.quit.matches(event) {
            Some(Action::Quit)
        } else if self.help.matches(event) {
            Some(Action::ToggleHelp)
        } else if self.switch_focus.matches(event) || event.code == KeyCode::Esc {
            Some(Action::SwitchFocus)
        } else {
            None
        }
    }

    /// Bindings active while the result list has focus
    pub fn browse_action(&self, event: &KeyEvent) -> Option<Action> {
        if let Some(action) = self.global_action(event) {
            return Some(action);
        }

        if self.next_page.matches(event) {
            return Some(Action::NextPage);
        }
        if self.previous_page.matches(event) {
            return Some(Action::PreviousPage);
        }
        if self.select_next.matches(event) {
            return Some(Action::SelectNext);
        }
        if self.select_previous.matches(event) {
            return Some(Action::SelectPrevious);
        }
        if self.toggle_description.matches(event) || event.code == KeyCode::Enter {
            return Some(Action::ToggleDescription);
        }

        match event.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('l') => Some(Action::NextPage),
            KeyCode::Char('h') => Some(Action::PreviousPage),
            KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Char('k') => Some(Action::SelectPrevious),
            KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|slot| Action::PageSlot(slot as usize)),
            _ => None,
        }
    }

    /// Bindings active while the search bar has focus (besides text editing)
    pub fn search_action(&self, event: &KeyEvent) -> Option<Action> {
        if let Some(action) = self.global_action(event) {
            return Some(action);
        }

        match event.code {
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        }
    }

    /// Get help text for all key bindings
    pub fn help_text(&self) -> String {
        let bindings = [
            &self.quit,
            &self.help,
            &self.switch_focus,
            &self.previous_page,
            &self.next_page,
            &self.select_previous,
            &self.select_next,
            &self.toggle_description,
        ];

        let mut lines: Vec<String> = bindings
            .iter()
            .map(|binding| format!("{:<8} {}", binding.label, binding.description))
            .collect();
        lines.insert(3, format!("{:<8} {}", "Enter", "Search (in search bar)"));
        lines.push(format!("{:<8} {}", "1-9", "Go to the n-th page shown"));
        lines.join("\n")
    }
}
