use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::{
    create_debouncer, create_trend_system, load_config, validate_config, MovieCatalog,
    SearchOrchestrator, SearchOrchestratorConfig, SqliteTrendStore, TmdbClient, TrendStore,
};
use marquee_server::api::{create_router, spawn_view_updates, WsBroadcaster};
use marquee_server::state::AppState;

/// How long to wait for queued trend records to be written on shutdown.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MARQUEE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    info!("Catalog: {}", config.catalog.base_url);

    // Create SQLite trend store
    let trend_store: Arc<dyn TrendStore> = Arc::new(
        SqliteTrendStore::new(&config.database.path, config.catalog.image_base_url.clone())
            .context("Failed to create trend store")?,
    );
    info!("Trend store initialized");

    // Create trend recording system and spawn its writer
    let (trend_handle, trend_writer) =
        create_trend_system(Arc::clone(&trend_store), config.trending.queue_size);
    let writer_handle = tokio::spawn(trend_writer.run());

    // Create catalog client
    let catalog: Arc<dyn MovieCatalog> =
        Arc::new(TmdbClient::new(&config.catalog).context("Failed to create catalog client")?);
    info!("TMDB client initialized");

    // Create debouncer for typed search input
    let (input, debouncer) = create_debouncer(config.search.debounce());
    let settled = debouncer.subscribe();
    let debouncer_handle = tokio::spawn(debouncer.run());
    info!("Search input debounced by {} ms", config.search.debounce_ms);

    // Create orchestrator
    let orchestrator = Arc::new(SearchOrchestrator::new(
        catalog,
        Arc::clone(&trend_store),
        trend_handle,
        SearchOrchestratorConfig::from(&config),
    ));

    // Create WebSocket broadcaster and push view changes to it
    let ws_broadcaster = WsBroadcaster::default();
    let view_task = spawn_view_updates(
        &orchestrator,
        ws_broadcaster.clone(),
        config.catalog.image_base_url.clone(),
    );
    info!("WebSocket broadcaster initialized");

    orchestrator.start(settled);

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        trend_store,
        Arc::clone(&orchestrator),
        input,
        ws_broadcaster,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    info!("Stopping orchestrator...");
    orchestrator.stop();
    view_task.abort();
    // Upgraded WebSocket connections may still hold AppState (and the input)
    debouncer_handle.abort();

    // Drop the orchestrator so its TrendHandle is released and the writer's
    // channel closes once in-flight searches finish.
    drop(orchestrator);

    match tokio::time::timeout(WRITER_DRAIN_TIMEOUT, writer_handle).await {
        Ok(_) => info!("Trend writer stopped"),
        Err(_) => warn!("Trend writer did not drain in time"),
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
