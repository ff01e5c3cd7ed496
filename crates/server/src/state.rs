use std::sync::Arc;

use marquee_core::{
    render_page, Config, DebounceInput, PageView, SanitizedConfig, SearchOrchestrator, TrendStore,
};

use crate::api::WsBroadcaster;

/// Shared application state
pub struct AppState {
    config: Config,
    trend_store: Arc<dyn TrendStore>,
    orchestrator: Arc<SearchOrchestrator>,
    input: DebounceInput,
    ws_broadcaster: WsBroadcaster,
}

impl AppState {
    pub fn new(
        config: Config,
        trend_store: Arc<dyn TrendStore>,
        orchestrator: Arc<SearchOrchestrator>,
        input: DebounceInput,
        ws_broadcaster: WsBroadcaster,
    ) -> Self {
        Self {
            config,
            trend_store,
            orchestrator,
            input,
            ws_broadcaster,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn trend_store(&self) -> &Arc<dyn TrendStore> {
        &self.trend_store
    }

    pub fn orchestrator(&self) -> &Arc<SearchOrchestrator> {
        &self.orchestrator
    }

    /// Live (unsettled) search input.
    pub fn input(&self) -> &DebounceInput {
        &self.input
    }

    pub fn ws_broadcaster(&self) -> &WsBroadcaster {
        &self.ws_broadcaster
    }

    pub fn image_base_url(&self) -> &str {
        &self.config.catalog.image_base_url
    }

    /// Render the page from the orchestrator's current state.
    pub fn current_view(&self) -> PageView {
        render_page(
            &self.orchestrator.search_state(),
            &self.orchestrator.trending_state(),
            self.image_base_url(),
        )
    }
}
