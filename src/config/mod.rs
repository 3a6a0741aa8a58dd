use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::search::{BackendConfig, BackendFactory};
use crate::session::ControllerOptions;

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search backend type ("proxy" or "google")
    pub backend: String,

    /// Base URL of the backend; each backend has its own default
    pub base_url: Option<String>,

    /// API key sent to the Google Books backend
    pub api_key: Option<String>,

    /// Maximum number of page selectors to show
    pub max_visible_pages: usize,

    /// Timeout for a single backend request, e.g. "10s" or "1500ms"
    pub request_timeout: String,

    /// UI refresh interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: "proxy".to_string(),
            base_url: None,
            api_key: None,
            max_visible_pages: 7,
            request_timeout: "10s".to_string(),
            tick_rate_ms: 250,
        }
    }
}

impl Config {
    /// Initialize configuration from the config file and environment
    pub async fn init(explicit_path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match explicit_path {
            Some(path) => Self::load_from_path(path).await?,
            None => Self::load_from_file().await?.unwrap_or_default(),
        };

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("BOOKSEARCH_BACKEND") {
            self.backend = backend;
        }

        if let Some(base_url) = lookup("BOOKSEARCH_BASE_URL") {
            self.base_url = Some(base_url);
        }

        if let Some(key) = lookup("BOOKSEARCH_API_KEY") {
            self.api_key = Some(key);
        }

        if let Some(pages) = lookup("BOOKSEARCH_MAX_VISIBLE_PAGES") {
            if let Ok(pages) = pages.parse() {
                self.max_visible_pages = pages;
            }
        }

        if let Some(timeout) = lookup("BOOKSEARCH_TIMEOUT") {
            self.request_timeout = timeout;
        }
    }

    /// Load configuration from the first booksearch.json found
    pub async fn load_from_file() -> Result<Option<Self>> {
        // 1. ./.booksearch.json
        // 2. ./booksearch.json
        // 3. $CONFIG_DIR/booksearch/booksearch.json
        let mut config_paths = vec![
            PathBuf::from("./.booksearch.json"),
            PathBuf::from("./booksearch.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("booksearch").join("booksearch.json"));
        }

        for path in config_paths {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parsed request timeout
    pub fn request_timeout(&self) -> Result<Duration> {
        humantime::parse_duration(&self.request_timeout)
            .with_context(|| format!("Invalid request_timeout '{}'", self.request_timeout))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Settings for the backend factory
    pub fn backend_config(&self) -> Result<BackendConfig> {
        Ok(BackendConfig {
            backend_type: self.backend.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout: self.request_timeout()?,
        })
    }

    /// Settings for the paging controller
    pub fn controller_options(&self) -> Result<ControllerOptions> {
        Ok(ControllerOptions {
            max_visible_pages: self.max_visible_pages,
            request_timeout: self.request_timeout()?,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !BackendFactory::available_backends().contains(&self.backend.as_str()) {
            return Err(anyhow::anyhow!(
                "Unknown backend '{}'. Available backends: {}",
                self.backend,
                BackendFactory::available_backends().join(", ")
            ));
        }

        if self.max_visible_pages == 0 {
            return Err(anyhow::anyhow!("max_visible_pages must be greater than 0"));
        }

        if self.request_timeout()?.is_zero() {
            return Err(anyhow::anyhow!("request_timeout must be greater than 0"));
        }

        if self.tick_rate_ms == 0 {
            return Err(anyhow::anyhow!("tick_rate_ms must be greater than 0"));
        }

        Ok(())
    }
}
