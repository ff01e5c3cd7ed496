pub mod catalog;
pub mod config;
pub mod debounce;
pub mod metrics;
pub mod search;
pub mod testing;
pub mod trend;
pub mod view;

pub use catalog::{CatalogError, Movie, MovieCatalog, TmdbClient};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use debounce::{create_debouncer, DebounceInput, Debouncer};
pub use search::{SearchOrchestrator, SearchOrchestratorConfig, SearchState, TrendingState};
pub use trend::{
    create_trend_system, SqliteTrendStore, TrendError, TrendHandle, TrendRecord, TrendStore,
    TrendWriter,
};
pub use view::{render_page, render_search, render_trending, PageView, SearchView, TrendingView};
