use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, middleware::metrics_middleware, search, trending, ws};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // UI static files path (configurable via env)
    let ui_dir = std::env::var("MARQUEE_UI_DIR").unwrap_or_else(|_| "ui/dist".to_string());

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Search
        .route("/search/input", put(search::set_input))
        .route("/view", get(search::get_view))
        .route("/movies", get(search::lookup_movies))
        // Trending
        .route("/trending", get(trending::list_trending))
        .route("/trending/reload", post(trending::reload_trending))
        // Live updates
        .route("/ws", get(ws::ws_handler));

    // Serve UI with SPA fallback
    let index_path = format!("{}/index.html", ui_dir);
    let serve_dir = ServeDir::new(&ui_dir).fallback(ServeFile::new(&index_path));

    Router::new()
        .route("/metrics", get(handlers::get_metrics))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
