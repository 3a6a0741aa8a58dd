//! Backend for the JSON search proxy (`/search` and `/fetch_page`)

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{
    backend::{utils, BackendConfig, SearchBackend},
    errors::SearchResult,
    types::{PageResponse, SearchResponse},
};

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:5000";

/// Search proxy client
#[derive(Debug, Clone)]
pub struct ProxyBackend {
    client: Client,
    base_url: String,
}

impl ProxyBackend {
    pub fn new(config: BackendConfig) -> SearchResult<Self> {
        let client = utils::build_client(config.timeout)?;
        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl SearchBackend for ProxyBackend {
    async fn search(&self, query: &str) -> SearchResult<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        debug!("Sending search request to: {}", url);

        utils::get_json(&self.client, &url, &[("q", query.to_string())]).await
    }

    async fn fetch_page(&self, query: &str, start_index: usize) -> SearchResult<PageResponse> {
        let url = format!("{}/fetch_page", self.base_url);
        debug!("Fetching page with startIndex={} from: {}", start_index, url);

        utils::get_json(
            &self.client,
            &url,
            &[("q", query.to_string()), ("startIndex", start_index.to_string())],
        )
        .await
    }

    fn name(&self) -> &str {
        "proxy"
    }
}
