//! Page cache and fetch controller
//!
//! The controller is the only owner of [`SessionState`]. It decides whether a
//! page comes from the cache or the network, spawns network fetches as tokio
//! tasks and applies their [`FetchOutcome`]s when the event loop hands them
//! back. Every fetch carries the generation of the query that issued it, so
//! responses that arrive after a newer query was submitted are discarded.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::search::{
    start_index, PageResponse, SearchBackend, SearchError, SearchResponse, SearchResult,
    SearchStats,
};

use super::{
    display::DisplaySurface,
    state::{Phase, SessionState},
    window::compute_window,
};

/// Tunables for the controller
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Maximum number of page selectors to show
    pub max_visible_pages: usize,

    /// Upper bound for a single backend call
    pub request_timeout: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            max_visible_pages: 7,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Completion of a spawned fetch, delivered back to the event loop
#[derive(Debug)]
pub enum FetchOutcome {
    /// First page of a query, with aggregates
    Initial {
        generation: u64,
        elapsed: Duration,
        result: SearchResult<SearchResponse>,
    },

    /// A later page
    Page {
        generation: u64,
        page: usize,
        result: SearchResult<PageResponse>,
    },
}

impl FetchOutcome {
    /// Generation of the query that issued this fetch
    pub fn generation(&self) -> u64 {
        match self {
            FetchOutcome::Initial { generation, .. } | FetchOutcome::Page { generation, .. } => {
                *generation
            }
        }
    }
}

/// What a navigation request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    /// Served from cache and rendered immediately
    CacheHit,
    /// A network fetch was issued
    Fetching,
    /// The page is already being fetched
    AlreadyFetching,
    /// Nothing to do (at a boundary)
    Unchanged,
}

/// Counters kept across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchMetrics {
    pub network_fetches: u64,
    pub failures: u64,
    pub stale_dropped: u64,
}

/// Controller for one search session at a time
pub struct SearchController<D: DisplaySurface> {
    backend: Arc<dyn SearchBackend>,
    display: D,
    options: ControllerOptions,
    state: SessionState,
    generation: u64,
    in_flight: HashMap<usize, JoinHandle<()>>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    metrics: FetchMetrics,
}

impl<D: DisplaySurface> SearchController<D> {
    /// Create a controller and the receiver its fetch outcomes arrive on
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        display: D,
        options: ControllerOptions,
    ) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let controller = Self {
            backend,
            display,
            options,
            state: SessionState::default(),
            generation: 0,
            in_flight: HashMap::new(),
            outcome_tx,
            metrics: FetchMetrics::default(),
        };

        (controller, outcome_rx)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn metrics(&self) -> FetchMetrics {
        self.metrics
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Whether any fetch of the current generation is outstanding
    pub fn is_fetching(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Page numbers currently offered as selectors
    pub fn page_window(&self) -> Vec<usize> {
        compute_window(
            self.state.current_page,
            self.state.total_pages,
            self.options.max_visible_pages,
        )
    }

    /// Start a new session for `query` and fetch its first page
    pub fn submit_query(&mut self, query: &str) -> SearchResult<()> {
        let query = query.trim();
        if query.is_empty() {
            let error = SearchError::EmptyQuery;
            self.display.render_error(&error.to_string());
            return Err(error);
        }

        self.cancel_in_flight();
        self.generation += 1;

        let previous = std::mem::replace(&mut self.state, SessionState::for_query(query));
        if !previous.cache.is_empty() {
            let cache = previous.cache.metrics();
            debug!(
                "Dropping session '{}' ({} cached pages, {} hits, {} misses, {:.0}% hit rate, {:?})",
                previous.query,
                previous.cache.len(),
                cache.hits,
                cache.misses,
                cache.hit_rate() * 100.0,
                self.metrics
            );
        }

        info!("Fetching initial results for '{}' (generation {})", query, self.generation);
        self.spawn_initial_fetch();
        Ok(())
    }

    /// Navigate to a 1-based page, from cache when possible
    pub fn go_to_page(&mut self, page: usize) -> SearchResult<PageLoad> {
        if !self.state.contains_page(page) {
            debug!("Ignoring request for page {} of {}", page, self.state.total_pages);
            return Err(SearchError::InvalidPage {
                page,
                total_pages: self.state.total_pages,
            });
        }

        self.state.current_page = page;

        if self.state.cache.lookup(page).is_some() {
            debug!("Cache hit for page {}", page);
            self.state.phase = Phase::Ready;
            self.refresh_display();
            return Ok(PageLoad::CacheHit);
        }

        self.state.phase = Phase::AwaitingPage;

        if self.in_flight.contains_key(&page) {
            debug!("Page {} is already being fetched", page);
            return Ok(PageLoad::AlreadyFetching);
        }

        debug!("Cache miss for page {}, start index {}", page, start_index(page));
        self.spawn_page_fetch(page);
        Ok(PageLoad::Fetching)
    }

    pub fn next_page(&mut self) -> SearchResult<PageLoad> {
        if self.state.has_next() {
            self.go_to_page(self.state.current_page + 1)
        } else {
            Ok(PageLoad::Unchanged)
        }
    }

    pub fn previous_page(&mut self) -> SearchResult<PageLoad> {
        if self.state.has_prev() {
            self.go_to_page(self.state.current_page - 1)
        } else {
            Ok(PageLoad::Unchanged)
        }
    }

    /// Apply a completed fetch.
    ///
    /// Returns `StaleResponse` for outcomes of a superseded query and the
    /// transport error for failed fetches; both have already been handled
    /// (logged, and for transport errors shown) by the time this returns.
    pub fn apply(&mut self, outcome: FetchOutcome) -> SearchResult<()> {
        let issued = outcome.generation();
        if issued != self.generation {
            self.metrics.stale_dropped += 1;
            debug!("Dropping response of generation {} (current {})", issued, self.generation);
            return Err(SearchError::StaleResponse {
                issued,
                current: self.generation,
            });
        }

        match outcome {
            FetchOutcome::Initial { elapsed, result, .. } => {
                self.in_flight.remove(&1);
                match result {
                    Ok(response) => {
                        self.on_initial_results(response, elapsed);
                        Ok(())
                    }
                    Err(error) => Err(self.on_fetch_failed(error, Phase::Idle, true)),
                }
            }
            FetchOutcome::Page { page, result, .. } => {
                self.in_flight.remove(&page);
                match result {
                    Ok(response) => {
                        self.on_page_results(page, response);
                        Ok(())
                    }
                    Err(error) => {
                        // The current page may still be pending if this was a different one
                        let phase = if self.in_flight.contains_key(&self.state.current_page) {
                            Phase::AwaitingPage
                        } else {
                            Phase::Ready
                        };
                        let visible = page == self.state.current_page;
                        Err(self.on_fetch_failed(error, phase, visible))
                    }
                }
            }
        }
    }

    fn on_initial_results(&mut self, response: SearchResponse, elapsed: Duration) {
        self.state.set_totals(response.total_items);
        info!(
            "Total results: {}, total pages: {}",
            self.state.total_results, self.state.total_pages
        );

        let stats = SearchStats::from_response(&response, elapsed);
        self.state.cache.insert(1, response.books);
        self.state.stats = Some(stats.clone());
        self.state.phase = Phase::Ready;

        self.display.render_stats(&stats);
        self.refresh_display();
    }

    fn on_page_results(&mut self, page: usize, response: PageResponse) {
        debug!("Received {} results for page {}", response.books.len(), page);
        if self.state.cache.contains(page) {
            debug!("Page {} is already cached, keeping the first copy", page);
        }
        self.state.cache.insert(page, response.books);

        if page == self.state.current_page {
            self.state.phase = Phase::Ready;
            self.refresh_display();
        }
    }

    /// Record a failed fetch; only failures of the page on screen reach the banner
    fn on_fetch_failed(&mut self, error: SearchError, phase: Phase, visible: bool) -> SearchError {
        self.metrics.failures += 1;
        warn!("Error fetching results for '{}': {}", self.state.query, error);

        if visible {
            let message = error.to_string();
            self.display.render_error(&message);
            self.state.last_error = Some(message);
        }
        self.state.phase = phase;
        error
    }

    /// Re-render the current page and the pagination row, dropping any error banner
    fn refresh_display(&mut self) {
        let page = self.state.current_page;
        debug!("Displaying results for page {}", page);

        self.state.last_error = None;
        self.display.clear_error();

        let results = self.state.cache.get(page).unwrap_or(&[]);
        self.display.render_results(results);

        let window = self.page_window();
        self.display.render_pagination(
            &window,
            page,
            self.state.has_prev(),
            self.state.has_next(),
        );
    }

    fn cancel_in_flight(&mut self) {
        for (page, handle) in self.in_flight.drain() {
            debug!("Cancelling in-flight fetch for page {}", page);
            handle.abort();
        }
    }

    fn spawn_initial_fetch(&mut self) {
        let backend = Arc::clone(&self.backend);
        let outcome_tx = self.outcome_tx.clone();
        let query = self.state.query.clone();
        let generation = self.generation;
        let limit = self.options.request_timeout;

        self.metrics.network_fetches += 1;
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let result = with_timeout(limit, backend.search(&query)).await;
            let _ = outcome_tx.send(FetchOutcome::Initial {
                generation,
                elapsed: started.elapsed(),
                result,
            });
        });
        self.in_flight.insert(1, handle);
    }

    fn spawn_page_fetch(&mut self, page: usize) {
        let backend = Arc::clone(&self.backend);
        let outcome_tx = self.outcome_tx.clone();
        let query = self.state.query.clone();
        let generation = self.generation;
        let limit = self.options.request_timeout;

        self.metrics.network_fetches += 1;
        let handle = tokio::spawn(async move {
            let result = with_timeout(limit, backend.fetch_page(&query, start_index(page))).await;
            let _ = outcome_tx.send(FetchOutcome::Page {
                generation,
                page,
                result,
            });
        });
        self.in_flight.insert(page, handle);
    }
}

async fn with_timeout<T>(
    limit: Duration,
    request: impl Future<Output = SearchResult<T>>,
) -> SearchResult<T> {
    match tokio::time::timeout(limit, request).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::TimeoutError(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Book;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Backend that fabricates `total_items` results per query
    #[derive(Default)]
    struct MockBackend {
        total_items: usize,
        fail_search: bool,
        fail_pages: HashSet<usize>,
        delay: Option<Duration>,
        searches: Mutex<Vec<String>>,
        page_requests: Mutex<Vec<(String, usize)>>,
    }

    impl MockBackend {
        fn with_total(total_items: usize) -> Self {
            Self {
                total_items,
                ..Self::default()
            }
        }

        fn books(&self, query: &str, start: usize) -> Vec<Book> {
            let end = (start + crate::search::PAGE_SIZE).min(self.total_items);
            (start..end)
                .map(|i| Book::new("Author", format!("{} #{}", query, i)))
                .collect()
        }

        fn page_requests(&self) -> Vec<(String, usize)> {
            self.page_requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchBackend for MockBackend {
        async fn search(&self, query: &str) -> SearchResult<SearchResponse> {
            self.searches.lock().unwrap().push(query.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_search {
                return Err(SearchError::StatusError { status: 502, body: "bad gateway".to_string() });
            }
            Ok(SearchResponse {
                books: self.books(query, 0),
                total_items: self.total_items,
                most_common_author: "Author".to_string(),
                earliest_pub_date: "1990".to_string(),
                latest_pub_date: "2020".to_string(),
            })
        }

        async fn fetch_page(&self, query: &str, start_index: usize) -> SearchResult<PageResponse> {
            self.page_requests
                .lock()
                .unwrap()
                .push((query.to_string(), start_index));
            if self.fail_pages.contains(&(start_index / crate::search::PAGE_SIZE + 1)) {
                return Err(SearchError::StatusError { status: 500, body: "down".to_string() });
            }
            Ok(PageResponse {
                books: self.books(query, start_index),
            })
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[derive(Debug, Default)]
    struct RecordingDisplay {
        results: Vec<Vec<Book>>,
        pagination: Vec<(Vec<usize>, usize, bool, bool)>,
        stats: Vec<SearchStats>,
        errors: Vec<String>,
        banner: Option<String>,
    }

    impl DisplaySurface for RecordingDisplay {
        fn render_results(&mut self, results: &[Book]) {
            self.results.push(results.to_vec());
        }

        fn render_pagination(&mut self, pages: &[usize], current_page: usize, has_prev: bool, has_next: bool) {
            self.pagination.push((pages.to_vec(), current_page, has_prev, has_next));
        }

        fn render_stats(&mut self, stats: &SearchStats) {
            self.stats.push(stats.clone());
        }

        fn render_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
            self.banner = Some(message.to_string());
        }

        fn clear_error(&mut self) {
            self.banner = None;
        }
    }

    type Harness = (
        SearchController<RecordingDisplay>,
        mpsc::UnboundedReceiver<FetchOutcome>,
        Arc<MockBackend>,
    );

    fn harness(backend: MockBackend) -> Harness {
        let backend = Arc::new(backend);
        let (controller, rx) = SearchController::new(
            backend.clone(),
            RecordingDisplay::default(),
            ControllerOptions::default(),
        );
        (controller, rx, backend)
    }

    async fn settle(
        controller: &mut SearchController<RecordingDisplay>,
        rx: &mut mpsc::UnboundedReceiver<FetchOutcome>,
    ) -> SearchResult<()> {
        let outcome = rx.recv().await.expect("fetch task dropped its sender");
        controller.apply(outcome)
    }

    async fn ready_session(total: usize) -> Harness {
        let (mut controller, mut rx, backend) = harness(MockBackend::with_total(total));
        controller.submit_query("dune").unwrap();
        settle(&mut controller, &mut rx).await.unwrap();
        (controller, rx, backend)
    }

    #[tokio::test]
    async fn test_initial_query_populates_session() {
        let (controller, _rx, _backend) = ready_session(95).await;
        let state = controller.state();

        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.total_results, 95);
        assert_eq!(state.total_pages, 10);
        assert_eq!(state.current_page, 1);
        assert!(state.cache.contains(1));

        let display = controller.display();
        assert_eq!(display.stats.len(), 1);
        assert_eq!(display.stats[0].total_results, 95);
        assert_eq!(display.stats[0].most_common_author, "Author");
        assert_eq!(display.results.last().unwrap().len(), 10);
        assert_eq!(
            display.pagination.last().unwrap(),
            &((1..=7).collect::<Vec<_>>(), 1, false, true)
        );
    }

    #[tokio::test]
    async fn test_window_follows_navigation() {
        let (mut controller, mut rx, _backend) = ready_session(95).await;

        controller.go_to_page(5).unwrap();
        settle(&mut controller, &mut rx).await.unwrap();
        assert_eq!(
            controller.display().pagination.last().unwrap(),
            &(vec![2, 3, 4, 5, 6, 7, 8], 5, true, true)
        );

        controller.go_to_page(10).unwrap();
        settle(&mut controller, &mut rx).await.unwrap();
        let last = controller.display().pagination.last().unwrap();
        assert_eq!(last, &((4..=10).collect::<Vec<_>>(), 10, true, false));
        assert_eq!(controller.display().results.last().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_repeated_navigation_fetches_once() {
        let (mut controller, mut rx, backend) = ready_session(95).await;

        assert_eq!(controller.go_to_page(2).unwrap(), PageLoad::Fetching);
        settle(&mut controller, &mut rx).await.unwrap();
        assert_eq!(controller.go_to_page(2).unwrap(), PageLoad::CacheHit);

        assert_eq!(backend.page_requests(), vec![("dune".to_string(), 10)]);
        assert_eq!(controller.state().cache.metrics().hits, 1);
    }

    #[tokio::test]
    async fn test_navigation_while_fetch_pending_does_not_refetch() {
        let (mut controller, mut rx, backend) = ready_session(95).await;

        assert_eq!(controller.go_to_page(3).unwrap(), PageLoad::Fetching);
        assert_eq!(controller.go_to_page(3).unwrap(), PageLoad::AlreadyFetching);
        assert_eq!(controller.state().phase, Phase::AwaitingPage);
        settle(&mut controller, &mut rx).await.unwrap();

        assert_eq!(backend.page_requests().len(), 1);
        assert_eq!(controller.state().phase, Phase::Ready);
        assert!(!controller.is_fetching());
    }

    #[tokio::test]
    async fn test_cached_first_page_needs_no_fetch() {
        let (mut controller, mut rx, backend) = ready_session(95).await;

        controller.go_to_page(2).unwrap();
        settle(&mut controller, &mut rx).await.unwrap();
        assert_eq!(controller.previous_page().unwrap(), PageLoad::CacheHit);

        assert_eq!(controller.state().current_page, 1);
        assert_eq!(backend.page_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_new_query_clears_cache() {
        let (mut controller, mut rx, backend) = ready_session(95).await;
        for page in [2, 3] {
            controller.go_to_page(page).unwrap();
            settle(&mut controller, &mut rx).await.unwrap();
        }

        controller.submit_query("neuromancer").unwrap();
        assert!(controller.state().cache.is_empty());
        assert_eq!(controller.state().phase, Phase::AwaitingInitial);
        settle(&mut controller, &mut rx).await.unwrap();

        assert_eq!(controller.go_to_page(2).unwrap(), PageLoad::Fetching);
        settle(&mut controller, &mut rx).await.unwrap();

        let shown = controller.display().results.last().unwrap();
        assert!(shown.iter().all(|book| book.title.starts_with("neuromancer")));
        assert_eq!(backend.page_requests().last().unwrap(), &("neuromancer".to_string(), 10));
    }

    #[tokio::test]
    async fn test_stale_page_response_is_dropped() {
        let (mut controller, mut rx, _backend) = ready_session(95).await;

        controller.go_to_page(2).unwrap();
        let late = rx.recv().await.unwrap();

        controller.submit_query("foundation").unwrap();
        let renders_before = controller.display().results.len();

        let err = controller.apply(late).unwrap_err();
        assert!(matches!(err, SearchError::StaleResponse { issued: 1, current: 2 }));
        assert!(!controller.state().cache.contains(2));
        assert_eq!(controller.display().results.len(), renders_before);
        assert_eq!(controller.metrics().stale_dropped, 1);
    }

    #[tokio::test]
    async fn test_stale_initial_response_is_dropped() {
        let (mut controller, mut rx, _backend) = harness(MockBackend::with_total(30));

        controller.submit_query("first").unwrap();
        let late = rx.recv().await.unwrap();
        controller.submit_query("second").unwrap();

        assert!(controller.apply(late).unwrap_err().is_silent());
        assert!(controller.display().stats.is_empty());

        settle(&mut controller, &mut rx).await.unwrap();
        assert_eq!(controller.state().query, "second");
        assert_eq!(controller.display().stats.len(), 1);
        assert!(controller.display().errors.is_empty());
    }

    #[tokio::test]
    async fn test_zero_results() {
        let (mut controller, _rx, _backend) = ready_session(0).await;

        assert_eq!(controller.state().total_pages, 0);
        assert!(controller.display().results.last().unwrap().is_empty());
        assert_eq!(controller.display().pagination.last().unwrap(), &(vec![], 1, false, false));

        assert!(matches!(
            controller.go_to_page(1),
            Err(SearchError::InvalidPage { page: 1, total_pages: 0 })
        ));
        assert_eq!(controller.next_page().unwrap(), PageLoad::Unchanged);
        assert_eq!(controller.previous_page().unwrap(), PageLoad::Unchanged);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_rejected() {
        let (mut controller, _rx, backend) = ready_session(95).await;

        assert!(controller.go_to_page(11).is_err());
        assert!(controller.go_to_page(0).is_err());
        assert_eq!(controller.state().current_page, 1);
        assert!(backend.page_requests().is_empty());
    }

    #[tokio::test]
    async fn test_page_failure_keeps_session() {
        let mut backend = MockBackend::with_total(95);
        backend.fail_pages.insert(3);
        let (mut controller, mut rx, _backend) = harness(backend);
        controller.submit_query("dune").unwrap();
        settle(&mut controller, &mut rx).await.unwrap();
        let renders_before = controller.display().results.len();

        controller.go_to_page(3).unwrap();
        let err = settle(&mut controller, &mut rx).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(controller.state().current_page, 3);
        assert_eq!(controller.state().phase, Phase::Ready);
        assert!(!controller.state().cache.contains(3));
        assert_eq!(controller.display().results.len(), renders_before);
        assert_eq!(controller.display().errors.len(), 1);
        assert_eq!(controller.metrics().failures, 1);
    }

    #[tokio::test]
    async fn test_initial_failure_returns_to_idle() {
        let backend = MockBackend {
            fail_search: true,
            ..MockBackend::with_total(10)
        };
        let (mut controller, mut rx, _backend) = harness(backend);

        controller.submit_query("dune").unwrap();
        let err = settle(&mut controller, &mut rx).await.unwrap_err();

        assert!(matches!(err, SearchError::StatusError { status: 502, .. }));
        let state = controller.state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.query, "dune");
        assert!(state.cache.is_empty());
        assert!(state.last_error.is_some());
        assert!(controller.display().results.is_empty());
        assert!(controller.display().stats.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_refused() {
        let (mut controller, _rx, backend) = harness(MockBackend::with_total(10));

        assert!(matches!(controller.submit_query("   "), Err(SearchError::EmptyQuery)));
        assert!(backend.searches.lock().unwrap().is_empty());
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.display().errors.len(), 1);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let backend = Arc::new(MockBackend {
            delay: Some(Duration::from_millis(500)),
            ..MockBackend::with_total(10)
        });
        let options = ControllerOptions {
            request_timeout: Duration::from_millis(20),
            ..ControllerOptions::default()
        };
        let (mut controller, mut rx) =
            SearchController::new(backend, RecordingDisplay::default(), options);

        controller.submit_query("slow").unwrap();
        let err = settle(&mut controller, &mut rx).await.unwrap_err();

        assert!(matches!(err, SearchError::TimeoutError(_)));
        assert_eq!(controller.state().phase, Phase::Idle);
    }

    #[tokio::test]
    async fn test_background_page_is_cached_but_not_shown() {
        let (mut controller, mut rx, _backend) = ready_session(95).await;

        controller.go_to_page(2).unwrap();
        controller.go_to_page(4).unwrap();
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let (page_two, page_four) = match &first {
            FetchOutcome::Page { page: 2, .. } => (first, second),
            _ => (second, first),
        };

        let renders_before = controller.display().results.len();
        controller.apply(page_two).unwrap();
        assert!(controller.state().cache.contains(2));
        assert_eq!(controller.display().results.len(), renders_before);
        assert_eq!(controller.state().phase, Phase::AwaitingPage);

        controller.apply(page_four).unwrap();
        assert_eq!(controller.display().results.len(), renders_before + 1);
        assert_eq!(controller.state().phase, Phase::Ready);
    }

    #[tokio::test]
    async fn test_cached_page_clears_error() {
        let mut backend = MockBackend::with_total(95);
        backend.fail_pages.insert(3);
        let (mut controller, mut rx, _backend) = harness(backend);
        controller.submit_query("dune").unwrap();
        settle(&mut controller, &mut rx).await.unwrap();

        controller.go_to_page(2).unwrap();
        settle(&mut controller, &mut rx).await.unwrap();
        controller.go_to_page(3).unwrap();
        settle(&mut controller, &mut rx).await.unwrap_err();
        assert!(controller.display().banner.is_some());
        assert!(controller.state().last_error.is_some());

        assert_eq!(controller.go_to_page(2).unwrap(), PageLoad::CacheHit);
        assert_eq!(controller.state().last_error, None);
        assert_eq!(controller.display().banner, None);
    }

    #[tokio::test]
    async fn test_background_page_failure_is_not_shown() {
        let mut backend = MockBackend::with_total(95);
        backend.fail_pages.insert(3);
        let (mut controller, mut rx, _backend) = harness(backend);
        controller.submit_query("dune").unwrap();
        settle(&mut controller, &mut rx).await.unwrap();

        assert_eq!(controller.go_to_page(3).unwrap(), PageLoad::Fetching);
        assert_eq!(controller.go_to_page(1).unwrap(), PageLoad::CacheHit);
        let err = settle(&mut controller, &mut rx).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(controller.state().current_page, 1);
        assert_eq!(controller.state().phase, Phase::Ready);
        assert_eq!(controller.state().last_error, None);
        assert!(controller.display().errors.is_empty());
        assert_eq!(controller.display().banner, None);
        assert_eq!(controller.metrics().failures, 1);
        assert!(!controller.state().cache.contains(3));
    }
}
