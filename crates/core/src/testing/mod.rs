//! Testing utilities and mock implementations.
//!
//! Mock implementations of the catalog and trend store traits, so the search
//! flows and the HTTP surface can be exercised without network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use marquee_core::testing::{fixtures, MockCatalog, MockTrendStore};
//!
//! let catalog = MockCatalog::new();
//! let trend_store = MockTrendStore::new();
//!
//! // Configure mock responses
//! catalog.set_results("dune", vec![fixtures::movie(1, "Dune", Some("/x.jpg"))]).await;
//! trend_store.set_fail_reads(true);
//!
//! // Use in AppState...
//! ```

mod mock_catalog;
mod mock_trend_store;

pub use mock_catalog::MockCatalog;
pub use mock_trend_store::MockTrendStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::catalog::{poster_url, Movie, DEFAULT_IMAGE_BASE_URL};
    use crate::trend::TrendRecord;

    /// Create a test movie with reasonable defaults.
    pub fn movie(id: u32, title: &str, poster_path: Option<&str>) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: poster_path.map(String::from),
            release_date: Some("2021-09-15".to_string()),
            vote_average: Some(7.5),
            original_language: Some("en".to_string()),
            overview: Some(format!("Overview of {}", title)),
        }
    }

    /// Create `count` movies titled after `prefix`.
    pub fn movies(prefix: &str, count: u32) -> Vec<Movie> {
        (1..=count)
            .map(|i| movie(i, &format!("{} {}", prefix, i), Some(&format!("/{}-{}.jpg", prefix, i))))
            .collect()
    }

    /// Create a trend record with a poster named after the term.
    pub fn trend_record(search_term: &str, count: u64, movie_id: u32) -> TrendRecord {
        let now = Utc::now();
        TrendRecord {
            id: Uuid::new_v4().to_string(),
            search_term: search_term.to_string(),
            count,
            movie_id,
            poster_url: Some(poster_url(
                DEFAULT_IMAGE_BASE_URL,
                &format!("/{}.jpg", search_term),
            )),
            created_at: now,
            updated_at: now,
        }
    }
}
