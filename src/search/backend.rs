//! Backend trait and factory for search services

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::search::{
    errors::{SearchError, SearchResult},
    google_books::GoogleBooksBackend,
    proxy::ProxyBackend,
    types::{PageResponse, SearchResponse},
};

/// Trait for remote search services
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run the initial query: first page plus aggregate statistics
    async fn search(&self, query: &str) -> SearchResult<SearchResponse>;

    /// Fetch a later page starting at the zero-based `start_index`
    async fn fetch_page(&self, query: &str, start_index: usize) -> SearchResult<PageResponse>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Settings needed to build a backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub backend_type: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Factory for creating search backends
pub struct BackendFactory;

impl BackendFactory {
    /// Create a new backend from configuration
    pub fn create_backend(config: BackendConfig) -> SearchResult<Box<dyn SearchBackend>> {
        match config.backend_type.as_str() {
            "proxy" => Ok(Box::new(ProxyBackend::new(config)?)),
            "google" => Ok(Box::new(GoogleBooksBackend::new(config)?)),
            other => Err(SearchError::ConfigError(format!(
                "Unsupported backend type: {}",
                other
            ))),
        }
    }

    /// Get available backend types
    pub fn available_backends() -> Vec<&'static str> {
        vec!["proxy", "google"]
    }
}

/// Shared HTTP helpers for backends
pub(crate) mod utils {
    use super::*;
    use serde::de::DeserializeOwned;

    pub fn build_client(timeout: Duration) -> SearchResult<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("booksearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::ConfigError(format!("Failed to create HTTP client: {}", e)))
    }

    /// Send a GET request and decode a JSON body, treating non-2xx as failure
    pub async fn get_json<T: DeserializeOwned>(
        client: &Client,
        url: &str,
        query: &[(&str, String)],
    ) -> SearchResult<T> {
        let response = client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::StatusError { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
