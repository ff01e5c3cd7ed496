//! Search-term popularity tracking.
//!
//! Every successful, non-empty search is counted per search term together
//! with a reference to the top movie it returned. The most-searched terms
//! form the "trending" list.
//!
//! Writes are fire-and-forget: callers enqueue a job through [`TrendHandle`]
//! and a background [`TrendWriter`] persists it, logging and dropping
//! failures. Reads go straight to the [`TrendStore`].

mod handle;
mod sqlite;
mod types;
mod writer;

pub use handle::TrendHandle;
pub use sqlite::SqliteTrendStore;
pub use types::*;
pub use writer::{create_trend_system, TrendWriter};

use crate::catalog::Movie;

/// Default number of records shown in the trending list.
pub const DEFAULT_TRENDING_LIMIT: u32 = 5;

/// Trait for trend record storage.
pub trait TrendStore: Send + Sync {
    /// Count one search for `search_term`.
    ///
    /// Creates the record with `count = 1` the first time a term is seen,
    /// otherwise increments its count by exactly one and leaves every other
    /// field untouched. Must be atomic with respect to concurrent callers.
    fn record_search(&self, search_term: &str, movie: &Movie) -> Result<TrendRecord, TrendError>;

    /// The most-searched terms, highest count first, at most `limit` records.
    fn top(&self, limit: u32) -> Result<Vec<TrendRecord>, TrendError>;

    /// Look up the record for one search term.
    fn get(&self, search_term: &str) -> Result<Option<TrendRecord>, TrendError>;

    /// Number of distinct search terms recorded.
    fn count(&self) -> Result<u64, TrendError>;
}
