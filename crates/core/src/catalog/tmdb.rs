//! TMDB (The Movie Database) API client.
//!
//! Authenticates with a v4 "read access token" sent as a bearer credential.
//! Rate limits are generous (around 40 requests per second).

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{endpoint_for, CatalogError, Movie, MovieCatalog, FALLBACK_API_MESSAGE};
use crate::config::CatalogConfig;
use crate::metrics::{CATALOG_REQUESTS, CATALOG_REQUEST_DURATION};

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        if config.api_token.trim().is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    async fn request(&self, url: &str) -> Result<Vec<Movie>, CatalogError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        parse_catalog_body(&body)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        let url = endpoint_for(&self.base_url, query);
        let mode = if query.is_empty() { "discover" } else { "search" };

        debug!("TMDB {}: query='{}'", mode, query);

        let started = Instant::now();
        let result = self.request(&url).await;

        CATALOG_REQUEST_DURATION
            .with_label_values(&[mode])
            .observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(movies) => {
                CATALOG_REQUESTS.with_label_values(&[mode, "ok"]).inc();
                debug!("TMDB {} returned {} movies", mode, movies.len());
            }
            Err(e) => {
                CATALOG_REQUESTS.with_label_values(&[mode, e.kind()]).inc();
                warn!("TMDB {} failed for query '{}': {}", mode, query, e);
            }
        }

        result
    }
}

// ============================================================================
// Response body (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    /// Decoded one item at a time so a malformed entry only drops itself.
    #[serde(default)]
    results: Option<Vec<Value>>,
    /// OMDb-style failure flag; providers send either `"False"` or `false`.
    #[serde(rename = "Response", default)]
    response_flag: Option<Value>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    /// TMDB-style failure flag.
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    status_message: Option<String>,
}

impl CatalogResponse {
    fn signals_failure(&self) -> bool {
        let flagged = match &self.response_flag {
            Some(Value::Bool(ok)) => !ok,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("false"),
            _ => false,
        };
        flagged || self.success == Some(false)
    }

    fn failure_message(self) -> String {
        self.error
            .or(self.status_message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_API_MESSAGE.to_string())
    }
}

/// Decode a successful catalog response body.
///
/// Returns `CatalogError::Api` when the body flags an application-level
/// failure, and the (possibly empty) result list otherwise.
pub fn parse_catalog_body(body: &str) -> Result<Vec<Movie>, CatalogError> {
    let response: CatalogResponse = serde_json::from_str(body).map_err(|e| {
        CatalogError::Parse(format!("Failed to parse movie listing response: {}", e))
    })?;

    if response.signals_failure() {
        return Err(CatalogError::Api(response.failure_message()));
    }

    let movies = response
        .results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Movie>(item) {
            Ok(movie) => Some(movie),
            Err(e) => {
                warn!("Skipping malformed catalog result: {}", e);
                None
            }
        })
        .collect();

    Ok(movies)
}
