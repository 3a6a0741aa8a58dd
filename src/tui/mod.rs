//! Terminal User Interface module using ratatui
//!
//! The terminal is one display surface for the paging controller: key presses
//! and fetch completions are multiplexed onto a single loop, which is the
//! only place session state changes.

mod app;
mod components;
mod events;
mod keys;
mod styles;

use app::App;
use components::TerminalDisplay;
use events::EventHandler;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::search::SearchBackend;
use crate::session::{ControllerOptions, FetchOutcome, SearchController};

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main TUI entry point
pub async fn run(
    backend: Arc<dyn SearchBackend>,
    options: ControllerOptions,
    tick_rate: Duration,
) -> Result<()> {
    let (controller, outcomes) = SearchController::new(backend, TerminalDisplay::new(), options);
    let mut app = App::new(controller);

    let mut terminal = init_terminal()?;
    let mut event_handler = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &mut event_handler, outcomes).await;

    restore_terminal(&mut terminal)?;
    let metrics = app.controller.metrics();
    info!(
        "Interactive session finished: {} network fetches, {} failures, {} stale responses dropped",
        metrics.network_fetches, metrics.failures, metrics.stale_dropped
    );
    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    event_handler: &mut EventHandler,
    mut outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            event = event_handler.next() => match event {
                Some(event) => {
                    if app.handle_event(event)? {
                        break; // Exit requested
                    }
                }
                None => break,
            },
            Some(outcome) = outcomes.recv() => app.handle_outcome(outcome),
        }
    }
    Ok(())
}
