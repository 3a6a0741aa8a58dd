use anyhow::{anyhow, Result};
use clap::Args;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::Config;
use crate::search::{BackendFactory, Book, SearchStats};
use crate::session::{DisplaySurface, FetchOutcome, Phase, SearchController};
use crate::utils::text::wrap_indented;

const DESCRIPTION_INDENT: &str = "     ";

/// Run a single query and print one page of results
#[derive(Args)]
pub struct SearchCommand {
    /// Search terms
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Page to print (1-based)
    #[arg(short = 'p', long = "page", default_value_t = 1)]
    pub page: usize,

    /// Wrap descriptions at this many columns
    #[arg(short = 'w', long = "width", default_value_t = 80)]
    pub width: usize,
}

impl SearchCommand {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    pub async fn execute(&self, config: &Config) -> Result<()> {
        let query = self.query_text();
        info!("Running one-shot search for '{}', page {}", query, self.page);

        let backend = BackendFactory::create_backend(config.backend_config()?)?;
        let (mut controller, mut outcomes) = SearchController::new(
            Arc::from(backend),
            PlainDisplay::new(self.width),
            config.controller_options()?,
        );

        run_query(&mut controller, &mut outcomes, &query, self.page).await?;

        print!("{}", controller.display().output());
        Ok(())
    }
}

/// Submit `query`, wait for it, then move to `page` and wait again
async fn run_query<D: DisplaySurface>(
    controller: &mut SearchController<D>,
    outcomes: &mut mpsc::UnboundedReceiver<FetchOutcome>,
    query: &str,
    page: usize,
) -> Result<()> {
    controller.submit_query(query)?;
    settle(controller, outcomes).await;

    if controller.state().phase == Phase::Idle {
        let message = controller.state().last_error.clone().unwrap_or_default();
        return Err(anyhow!("Search failed: {}", message));
    }

    if page != 1 {
        controller.go_to_page(page)?;
        settle(controller, outcomes).await;

        if let Some(error) = &controller.state().last_error {
            return Err(anyhow!("Failed to fetch page {}: {}", page, error));
        }
    }

    Ok(())
}

/// Apply outcomes until no fetch is outstanding
async fn settle<D: DisplaySurface>(
    controller: &mut SearchController<D>,
    outcomes: &mut mpsc::UnboundedReceiver<FetchOutcome>,
) {
    while controller.is_fetching() {
        match outcomes.recv().await {
            Some(outcome) => {
                if let Err(e) = controller.apply(outcome) {
                    debug!("Fetch of generation {} did not complete: {}", controller.generation(), e);
                }
            }
            None => break,
        }
    }
}

/// Display surface that renders to plain text for stdout
#[derive(Debug, Default)]
pub struct PlainDisplay {
    width: usize,
    stats: Vec<String>,
    results: Vec<String>,
    pagination: String,
    error: Option<String>,
}

impl PlainDisplay {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Everything rendered so far, in print order
    pub fn output(&self) -> String {
        let mut lines = self.stats.clone();
        if !lines.is_empty() {
            lines.push(String::new());
        }

        if self.results.is_empty() {
            lines.push("No results.".to_string());
        } else {
            lines.extend(self.results.iter().cloned());
        }

        if !self.pagination.is_empty() {
            lines.push(String::new());
            lines.push(self.pagination.clone());
        }

        if let Some(error) = &self.error {
            lines.push(format!("Error: {}", error));
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }

    fn format_book(&self, number: usize, book: &Book) -> Vec<String> {
        let mut lines = vec![format!("{:>3}. {}", number, book.headline())];
        if let Some(date) = &book.published_date {
            lines.push(format!("{}Published: {}", DESCRIPTION_INDENT, date));
        }
        lines.extend(wrap_indented(
            book.description_or_default(),
            self.width,
            DESCRIPTION_INDENT,
        ));
        lines
    }
}

impl DisplaySurface for PlainDisplay {
    fn render_results(&mut self, results: &[Book]) {
        let lines: Vec<String> = results
            .iter()
            .enumerate()
            .flat_map(|(i, book)| self.format_book(i + 1, book))
            .collect();
        self.results = lines;
    }

    fn render_pagination(&mut self, pages: &[usize], current_page: usize, has_prev: bool, has_next: bool) {
        let mut parts = Vec::with_capacity(pages.len() + 2);
        if has_prev {
            parts.push("<".to_string());
        }
        parts.extend(pages.iter().map(|&page| {
            if page == current_page {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        }));
        if has_next {
            parts.push(">".to_string());
        }
        self.pagination = parts.join(" ");
    }

    fn render_stats(&mut self, stats: &SearchStats) {
        self.stats = vec![
            format!("Total results:      {}", stats.total_results),
            format!("Most common author: {}", stats.most_common_author),
            format!("Earliest published: {}", stats.earliest_date),
            format!("Latest published:   {}", stats.latest_date),
            format!("Response time:      {:.2}s", stats.response_time_secs()),
        ];
    }

    fn render_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}
