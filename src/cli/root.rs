use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::search::SearchCommand;
use crate::config::Config;
use crate::search::BackendFactory;
use crate::tui;

/// booksearch - browse book search results page by page from your terminal
#[derive(Parser)]
#[command(
    name = "booksearch",
    version,
    about = "Browse book search results page by page from your terminal",
    long_about = r#"booksearch queries a book search service and lets you page through the results.
Pages you have already seen are served from memory; only new pages hit the network.

Examples:
  booksearch                                # Start interactive mode
  booksearch search rust programming        # Print the first page of results
  booksearch search dune --page 3           # Print the third page
  booksearch --backend google search tolkien"#
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Search backend to use (proxy or google)
    #[arg(short = 'b', long = "backend", global = true)]
    pub backend: Option<String>,

    /// Base URL of the search backend
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Path to a configuration file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single query and print one page of results
    Search(SearchCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let mut config = Config::init(self.config.as_deref()).await?;
        self.apply_overrides(&mut config);
        config.validate()?;
        debug!("Configuration initialized: backend={}", config.backend);

        match self.command {
            Some(Commands::Search(search_cmd)) => search_cmd.execute(&config).await,
            None => Self::start_interactive_mode(&config).await,
        }
    }

    /// Command-line flags take precedence over file and environment settings
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(backend) = &self.backend {
            config.backend = backend.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
    }

    async fn start_interactive_mode(config: &Config) -> Result<()> {
        info!("Starting interactive mode");

        let backend = BackendFactory::create_backend(config.backend_config()?)?;
        tui::run(Arc::from(backend), config.controller_options()?, config.tick_rate()).await?;

        info!("Application finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_subcommand() {
        let cli = Cli::try_parse_from([
            "booksearch", "--backend", "google", "search", "the", "hobbit", "--page", "2",
        ])
        .unwrap();

        assert_eq!(cli.backend.as_deref(), Some("google"));
        match cli.command {
            Some(Commands::Search(cmd)) => {
                assert_eq!(cmd.query_text(), "the hobbit");
                assert_eq!(cmd.page, 2);
            }
            None => panic!("expected search subcommand"),
        }
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["booksearch", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["booksearch", "--base-url", "http://localhost:9000"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.backend, "proxy");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
    }
}
