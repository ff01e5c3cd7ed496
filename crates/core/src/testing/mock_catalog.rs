//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{CatalogError, Movie, MovieCatalog};

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable results per query (unknown queries return no movies)
/// - Delay individual queries to simulate slow responses
/// - Track queries for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::testing::{fixtures, MockCatalog};
///
/// let catalog = MockCatalog::new();
/// catalog.set_results("dune", vec![fixtures::movie(1, "Dune", Some("/x.jpg"))]).await;
///
/// let movies = catalog.fetch_movies("dune").await?;
/// assert_eq!(movies.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockCatalog {
    /// Results by query.
    results: Arc<RwLock<HashMap<String, Vec<Movie>>>>,
    /// Persistent failures by query.
    errors: Arc<RwLock<HashMap<String, CatalogError>>>,
    /// Response delay by query.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<String>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            delays: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Set the movies returned for a query. Use `""` for the discover listing.
    pub async fn set_results(&self, query: &str, movies: Vec<Movie>) {
        self.results.write().await.insert(query.to_string(), movies);
    }

    /// Make every request for `query` fail with `error`.
    pub async fn set_error(&self, query: &str, error: CatalogError) {
        self.errors.write().await.insert(query.to_string(), error);
    }

    /// Delay responses for `query`.
    pub async fn set_delay(&self, query: &str, delay: Duration) {
        self.delays.write().await.insert(query.to_string(), delay);
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries, in call order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Simulation
    // =========================================================================

    /// Set an error to be returned on the next operation.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl MovieCatalog for MockCatalog {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        self.queries.write().await.push(query.to_string());

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        let delay = self.delays.read().await.get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.errors.read().await.get(query) {
            return Err(error.clone());
        }

        Ok(self
            .results
            .read()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}
