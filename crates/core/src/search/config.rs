//! Search orchestrator configuration.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::trend::DEFAULT_TRENDING_LIMIT;

/// Configuration for the search orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOrchestratorConfig {
    /// Number of records loaded by the trending flow.
    #[serde(default = "default_trending_limit")]
    pub trending_limit: u32,
}

fn default_trending_limit() -> u32 {
    DEFAULT_TRENDING_LIMIT
}

impl Default for SearchOrchestratorConfig {
    fn default() -> Self {
        Self {
            trending_limit: default_trending_limit(),
        }
    }
}

impl From<&Config> for SearchOrchestratorConfig {
    fn from(config: &Config) -> Self {
        Self {
            trending_limit: config.trending.limit,
        }
    }
}
