//! Search orchestrator implementation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::catalog::{CatalogError, Movie, MovieCatalog};
use crate::metrics;
use crate::trend::{TrendHandle, TrendStore};

use super::config::SearchOrchestratorConfig;
use super::types::{SearchState, TrendingState, TRENDING_FAILED_MESSAGE};

/// The search orchestrator - runs the search and trending flows.
pub struct SearchOrchestrator {
    config: SearchOrchestratorConfig,
    catalog: Arc<dyn MovieCatalog>,
    trend_store: Arc<dyn TrendStore>,
    recorder: TrendHandle,

    // Runtime state
    search_state: watch::Sender<SearchState>,
    trending_state: watch::Sender<TrendingState>,
    generation: AtomicU64,
    running: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
}

impl SearchOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        trend_store: Arc<dyn TrendStore>,
        recorder: TrendHandle,
        config: SearchOrchestratorConfig,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let (search_state, _) = watch::channel(SearchState::Idle);
        let (trending_state, _) = watch::channel(TrendingState::Idle);

        Self {
            config,
            catalog,
            trend_store,
            recorder,
            search_state,
            trending_state,
            generation: AtomicU64::new(0),
            running: AtomicBool::new(false),
            shutdown_tx,
        }
    }

    /// Start the orchestrator (spawns background tasks).
    ///
    /// Loads trending once, runs a search for the current settled value and
    /// then one for every later settle. Must be called inside a tokio runtime.
    pub fn start(self: &Arc<Self>, mut settled: watch::Receiver<String>) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Search orchestrator already running");
            return;
        }

        info!("Starting search orchestrator");

        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.load_trending().await;
        });

        let this = Arc::clone(self);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        tokio::spawn(async move {
            let initial = settled.borrow_and_update().clone();
            this.spawn_search(initial);

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Search loop shutting down");
                        break;
                    }
                    changed = settled.changed() => {
                        if changed.is_err() {
                            debug!("Settled input closed, search loop exiting");
                            break;
                        }
                        let query = settled.borrow_and_update().clone();
                        this.spawn_search(query);
                    }
                }
            }
        });

        info!("Search orchestrator started");
    }

    /// Stop the orchestrator. In-flight searches run to completion.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Search orchestrator not running");
            return;
        }

        info!("Stopping search orchestrator");
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Current search state.
    pub fn search_state(&self) -> SearchState {
        self.search_state.borrow().clone()
    }

    /// Current trending state.
    pub fn trending_state(&self) -> TrendingState {
        self.trending_state.borrow().clone()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.search_state.subscribe()
    }

    pub fn subscribe_trending(&self) -> watch::Receiver<TrendingState> {
        self.trending_state.subscribe()
    }

    fn spawn_search(self: &Arc<Self>, query: String) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.run_search(&query).await;
        });
    }

    /// Run one iteration of the search flow.
    ///
    /// Returns false if a newer search was issued while this one was in
    /// flight, in which case the result was discarded.
    pub async fn run_search(&self, query: &str) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.apply(
            generation,
            SearchState::Loading {
                query: query.to_string(),
            },
        );

        let result = self.catalog.fetch_movies(query).await;

        if let Ok(movies) = &result {
            self.record(query, movies);
        }

        let (outcome, next) = match result {
            Ok(movies) if movies.is_empty() => (
                "empty",
                SearchState::Empty {
                    query: query.to_string(),
                },
            ),
            Ok(movies) => (
                "loaded",
                SearchState::Loaded {
                    query: query.to_string(),
                    movies,
                },
            ),
            Err(e) => {
                error!("Error fetching movies for '{}': {}", query, e);
                (
                    "failed",
                    SearchState::Failed {
                        query: query.to_string(),
                        message: e.user_message(),
                    },
                )
            }
        };

        if self.apply(generation, next) {
            metrics::SEARCH_OUTCOMES.with_label_values(&[outcome]).inc();
            true
        } else {
            metrics::SEARCH_OUTCOMES.with_label_values(&["stale"]).inc();
            debug!("Discarding stale result for '{}'", query);
            false
        }
    }

    /// Fetch movies without touching the search state.
    ///
    /// Successful non-empty searches are recorded exactly as in the search flow.
    pub async fn lookup(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        let movies = self.catalog.fetch_movies(query).await?;
        self.record(query, &movies);
        Ok(movies)
    }

    /// Run one iteration of the trending flow.
    pub async fn load_trending(&self) {
        self.trending_state.send_replace(TrendingState::Loading);

        let store = Arc::clone(&self.trend_store);
        let limit = self.config.trending_limit;
        let result = tokio::task::spawn_blocking(move || store.top(limit)).await;

        let next = match result {
            Ok(Ok(records)) => {
                debug!("Loaded {} trending records", records.len());
                TrendingState::Loaded { records }
            }
            Ok(Err(e)) => {
                error!("Error fetching trending movies: {}", e);
                TrendingState::Failed {
                    message: TRENDING_FAILED_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                error!("Trending load task failed: {}", e);
                TrendingState::Failed {
                    message: TRENDING_FAILED_MESSAGE.to_string(),
                }
            }
        };

        self.trending_state.send_replace(next);
    }

    /// Queue the top result for trend recording. Never waits for the write.
    fn record(&self, query: &str, movies: &[Movie]) {
        if query.is_empty() {
            return;
        }
        if let Some(first) = movies.first() {
            self.recorder.record(query, first);
        }
    }

    /// Publish `state` if `generation` is still the newest search.
    fn apply(&self, generation: u64, state: SearchState) -> bool {
        self.search_state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = state;
            true
        })
    }
}
