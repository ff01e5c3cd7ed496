//! Search orchestration.
//!
//! Drives the two page flows:
//! - **Search**: every settled input value triggers one catalog fetch. The
//!   top result of a successful, non-empty search is queued for trend
//!   recording without waiting for the write.
//! - **Trending**: the most-searched terms are loaded once at startup and
//!   again on explicit reload.
//!
//! Both flows publish their state through `watch` channels so the
//! presentation layer can re-render on change.

mod config;
mod runner;
mod types;

pub use config::SearchOrchestratorConfig;
pub use runner::SearchOrchestrator;
pub use types::{SearchState, TrendingState, TRENDING_FAILED_MESSAGE};
