//! Trending API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use marquee_core::{search::TRENDING_FAILED_MESSAGE, TrendRecord};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendingQueryParams {
    /// Defaults to the configured trending limit.
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub records: Vec<TrendRecord>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub message: String,
}

/// GET /api/v1/trending
///
/// Most-searched terms, highest count first.
pub async fn list_trending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingQueryParams>,
) -> Result<Json<TrendingResponse>, impl IntoResponse> {
    let limit = params.limit.unwrap_or(state.config().trending.limit);

    match state.trend_store().top(limit) {
        Ok(records) => {
            let total = records.len();
            Ok(Json(TrendingResponse { records, total }))
        }
        Err(e) => {
            error!("Failed to list trending records: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: TRENDING_FAILED_MESSAGE.to_string(),
                }),
            ))
        }
    }
}

/// POST /api/v1/trending/reload
///
/// Re-run the trending flow. The refreshed list is pushed to WebSocket clients.
pub async fn reload_trending(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReloadResponse>) {
    let orchestrator = Arc::clone(state.orchestrator());
    tokio::spawn(async move {
        orchestrator.load_trending().await;
    });

    (
        StatusCode::ACCEPTED,
        Json(ReloadResponse {
            message: "Trending reload started".to_string(),
        }),
    )
}
