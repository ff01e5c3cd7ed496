//! Movie catalog integration.
//!
//! The catalog is the external source of movie metadata. It answers two kinds
//! of requests: a keyword search, and a "discover" listing of popular titles
//! used when the search box is empty.

mod tmdb;
mod types;

pub use tmdb::{parse_catalog_body, TmdbClient};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Default TMDB REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default poster CDN prefix (w500 rendition).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Message used when the provider flags a failure without explaining it.
pub const FALLBACK_API_MESSAGE: &str = "Failed to fetch movies";

/// User-facing message for every catalog failure the provider did not describe.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching movies, please try again later...";

/// Errors that can occur when querying the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// The catalog answered with a non-success HTTP status.
    #[error("Catalog responded with HTTP {0}")]
    Status(u16),

    /// The catalog answered but flagged the request as failed.
    #[error("Catalog error: {0}")]
    Api(String),

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client not configured (missing token, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl CatalogError {
    /// Message shown to end users for this failure.
    ///
    /// Provider-reported failures keep the provider's wording; everything
    /// else collapses to one static message.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Api(message) => message.clone(),
            _ => FETCH_FAILED_MESSAGE.to_string(),
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Network(_) => "network",
            CatalogError::Status(_) => "status",
            CatalogError::Api(_) => "api",
            CatalogError::Parse(_) => "parse",
            CatalogError::NotConfigured(_) => "not_configured",
        }
    }
}

/// Read-only access to a movie catalog.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search by keyword, or list popular movies when `query` is empty.
    ///
    /// An empty vector is a successful "no matches" outcome.
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError>;
}

/// Build the request URL for a query.
///
/// Empty queries go to the discover listing sorted by popularity; anything
/// else goes to the keyword search with the query percent-encoded.
pub fn endpoint_for(base_url: &str, query: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if query.is_empty() {
        format!("{}/discover/movie?sort_by=popularity.desc", base)
    } else {
        format!(
            "{}/search/movie?query={}",
            base,
            urlencoding::encode(query)
        )
    }
}

/// Build a poster URL by appending the catalog's poster path to the CDN prefix.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{}{}", image_base_url, poster_path)
}
