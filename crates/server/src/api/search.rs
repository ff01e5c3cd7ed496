//! Search API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use marquee_core::{view::SearchMode, Movie, PageView};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchInputRequest {
    /// Current contents of the search box.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SearchInputResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MoviesQueryParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub query: String,
    pub mode: SearchMode,
    pub movies: Vec<Movie>,
    pub total: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// PUT /api/v1/search/input
///
/// Forward typed text to the debouncer. The search runs once the input settles.
pub async fn set_input(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchInputRequest>,
) -> (StatusCode, Json<SearchInputResponse>) {
    state.input().set(request.text.as_str());
    (
        StatusCode::ACCEPTED,
        Json(SearchInputResponse { text: request.text }),
    )
}

/// GET /api/v1/view
///
/// Current rendered page.
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<PageView> {
    Json(state.current_view())
}

/// GET /api/v1/movies?query=
///
/// One-shot catalog lookup. Successful non-empty searches count towards trending.
pub async fn lookup_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesQueryParams>,
) -> Result<Json<MoviesResponse>, impl IntoResponse> {
    match state.orchestrator().lookup(&params.query).await {
        Ok(movies) => {
            let total = movies.len();
            Ok(Json(MoviesResponse {
                mode: SearchMode::for_query(&params.query),
                query: params.query,
                movies,
                total,
            }))
        }
        Err(e) => {
            warn!("Movie lookup for '{}' failed: {}", params.query, e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.user_message(),
                }),
            ))
        }
    }
}
