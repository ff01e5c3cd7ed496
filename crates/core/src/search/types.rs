//! Types for the search orchestrator.

use serde::{Deserialize, Serialize};

use crate::catalog::Movie;
use crate::trend::TrendRecord;

/// Message shown when the trending list cannot be loaded.
pub const TRENDING_FAILED_MESSAGE: &str = "Error fetching trending movies...";

/// State of the search flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchState {
    /// No search has run yet.
    Idle,
    /// A catalog request is in flight.
    Loading { query: String },
    /// The catalog returned at least one movie.
    Loaded { query: String, movies: Vec<Movie> },
    /// The catalog returned no movies.
    Empty { query: String },
    /// The catalog request failed.
    Failed { query: String, message: String },
}

/// State of the trending flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendingState {
    Idle,
    Loading,
    /// Records in rank order. May be empty.
    Loaded { records: Vec<TrendRecord> },
    Failed { message: String },
}
