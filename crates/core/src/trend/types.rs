use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Movie;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to read trending records: {0}")]
    Read(String),

    #[error("Failed to record search: {0}")]
    Write(String),
}

/// Persisted popularity counter for one search term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// The search term as typed (natural key).
    pub search_term: String,
    /// Number of successful searches for this term (always >= 1).
    pub count: u64,
    /// Catalog ID of the top result when the term was first recorded.
    pub movie_id: u32,
    /// Poster of that movie, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A queued request to count one search.
#[derive(Debug, Clone)]
pub struct TrendJob {
    pub search_term: String,
    pub movie: Movie,
}
