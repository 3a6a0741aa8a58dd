//! Google Books volumes API backend
//!
//! Talks to the public volumes endpoint directly and derives the aggregate
//! statistics (most common author, publication date range) from the first
//! page of results.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::{
    backend::{utils, BackendConfig, SearchBackend},
    errors::SearchResult,
    types::{Book, PageResponse, SearchResponse, PAGE_SIZE},
};

pub const DEFAULT_GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

const UNKNOWN_AUTHOR: &str = "Unknown Author";
const NO_TITLE: &str = "No Title";
const NO_DESCRIPTION: &str = "No description available.";
const UNKNOWN_DATE: &str = "Unknown Date";
const NO_AUTHOR: &str = "No Author";
const NO_DATE: &str = "N/A";

/// Google Books API client
#[derive(Debug, Clone)]
pub struct GoogleBooksBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Volumes list response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: usize,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    authors: Vec<String>,
    title: Option<String>,
    description: Option<String>,
    published_date: Option<String>,
}

/// Books plus the aggregates computed over them
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSummary {
    pub books: Vec<Book>,
    pub most_common_author: String,
    pub earliest_pub_date: String,
    pub latest_pub_date: String,
}

impl GoogleBooksBackend {
    pub fn new(config: BackendConfig) -> SearchResult<Self> {
        let client = utils::build_client(config.timeout)?;
        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_GOOGLE_BOOKS_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    async fn list_volumes(&self, query: &str, start_index: usize) -> SearchResult<VolumesResponse> {
        debug!("Requesting volumes for '{}' at startIndex={}", query, start_index);

        let mut params = vec![
            ("q", query.to_string()),
            ("startIndex", start_index.to_string()),
            ("maxResults", PAGE_SIZE.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        utils::get_json(&self.client, &self.base_url, &params).await
    }
}

#[async_trait]
impl SearchBackend for GoogleBooksBackend {
    async fn search(&self, query: &str) -> SearchResult<SearchResponse> {
        let volumes = self.list_volumes(query, 0).await?;
        let summary = summarize_volumes(volumes.items);

        Ok(SearchResponse {
            books: summary.books,
            total_items: volumes.total_items,
            most_common_author: summary.most_common_author,
            earliest_pub_date: summary.earliest_pub_date,
            latest_pub_date: summary.latest_pub_date,
        })
    }

    async fn fetch_page(&self, query: &str, start_index: usize) -> SearchResult<PageResponse> {
        let volumes = self.list_volumes(query, start_index).await?;
        Ok(PageResponse {
            books: summarize_volumes(volumes.items).books,
        })
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Format an author list for display
fn format_authors(authors: &[String]) -> String {
    if authors.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        authors.join(", ")
    }
}

/// Convert raw volumes into books and compute the first-page aggregates
fn summarize_volumes(items: Vec<Volume>) -> VolumeSummary {
    let mut books = Vec::with_capacity(items.len());
    // author -> (count, first position seen)
    let mut author_counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut pub_dates: Vec<String> = Vec::new();

    for item in items {
        let info = item.volume_info;

        for author in &info.authors {
            let seen = author_counts.len();
            author_counts.entry(author.clone()).or_insert((0, seen)).0 += 1;
        }

        let published_date = info.published_date.unwrap_or_else(|| UNKNOWN_DATE.to_string());
        if published_date != UNKNOWN_DATE {
            pub_dates.push(published_date.clone());
        }

        books.push(
            Book::new(
                format_authors(&info.authors),
                info.title.unwrap_or_else(|| NO_TITLE.to_string()),
            )
            .with_description(info.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()))
            .with_published_date(published_date),
        );
    }

    let most_common_author = author_counts
        .into_iter()
        .max_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
            count_a.cmp(count_b).then(seen_b.cmp(seen_a))
        })
        .map(|(author, _)| author)
        .unwrap_or_else(|| NO_AUTHOR.to_string());

    VolumeSummary {
        books,
        most_common_author,
        earliest_pub_date: pub_dates.iter().min().cloned().unwrap_or_else(|| NO_DATE.to_string()),
        latest_pub_date: pub_dates.iter().max().cloned().unwrap_or_else(|| NO_DATE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::errors::SearchError;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn volumes(json: &str) -> Vec<Volume> {
        serde_json::from_str::<VolumesResponse>(json).unwrap().items
    }

    #[test]
    fn test_summary_applies_field_defaults() {
        let summary = summarize_volumes(volumes(r#"{"items": [{"volumeInfo": {}}, {}]}"#));

        assert_eq!(summary.books.len(), 2);
        let book = &summary.books[0];
        assert_eq!(book.authors, UNKNOWN_AUTHOR);
        assert_eq!(book.title, NO_TITLE);
        assert_eq!(book.description.as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(book.published_date.as_deref(), Some(UNKNOWN_DATE));
        assert_eq!(summary.most_common_author, NO_AUTHOR);
        assert_eq!(summary.earliest_pub_date, NO_DATE);
        assert_eq!(summary.latest_pub_date, NO_DATE);
    }

    #[test]
    fn test_summary_aggregates() {
        let summary = summarize_volumes(volumes(
            r#"{"items": [
                {"volumeInfo": {"authors": ["Ursula K. Le Guin"], "title": "A", "publishedDate": "1969"}},
                {"volumeInfo": {"authors": ["Iain Banks", "Ursula K. Le Guin"], "title": "B", "publishedDate": "2004-05-01"}},
                {"volumeInfo": {"authors": ["Iain Banks"], "title": "C"}},
                {"volumeInfo": {"authors": ["Ursula K. Le Guin"], "title": "D", "publishedDate": "1974"}}
            ]}"#,
        ));

        assert_eq!(summary.books[1].authors, "Iain Banks, Ursula K. Le Guin");
        assert_eq!(summary.most_common_author, "Ursula K. Le Guin");
        assert_eq!(summary.earliest_pub_date, "1969");
        assert_eq!(summary.latest_pub_date, "2004-05-01");
    }

    #[test]
    fn test_most_common_author_tie_prefers_first_seen() {
        let summary = summarize_volumes(volumes(
            r#"{"items": [
                {"volumeInfo": {"authors": ["Zadie Smith"]}},
                {"volumeInfo": {"authors": ["Alan Moore"]}}
            ]}"#,
        ));
        assert_eq!(summary.most_common_author, "Zadie Smith");
    }

    #[tokio::test]
    async fn test_search_requests_first_page_with_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/volumes")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "borges".into()),
                Matcher::UrlEncoded("startIndex".into(), "0".into()),
                Matcher::UrlEncoded("maxResults".into(), "10".into()),
                Matcher::UrlEncoded("key".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"totalItems": 42, "items": [
                    {"volumeInfo": {"authors": ["Jorge Luis Borges"], "title": "Ficciones", "publishedDate": "1944"}}
                ]}"#,
            )
            .create_async()
            .await;

        let backend = GoogleBooksBackend::new(BackendConfig {
            backend_type: "google".to_string(),
            base_url: Some(format!("{}/volumes", server.url())),
            api_key: Some("secret".to_string()),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let response = backend.search("borges").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.total_items, 42);
        assert_eq!(response.most_common_author, "Jorge Luis Borges");
        assert_eq!(response.earliest_pub_date, "1944");
        assert_eq!(response.books[0].title, "Ficciones");
    }

    #[tokio::test]
    async fn test_fetch_page_failure_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/volumes")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("quota")
            .create_async()
            .await;

        let backend = GoogleBooksBackend::new(BackendConfig {
            backend_type: "google".to_string(),
            base_url: Some(format!("{}/volumes", server.url())),
            api_key: None,
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let err = backend.fetch_page("borges", 10).await.unwrap_err();
        assert!(matches!(err, SearchError::StatusError { status: 403, .. }));
    }
}
