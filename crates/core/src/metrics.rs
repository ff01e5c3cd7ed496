//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog requests (search / discover)
//! - Search flow outcomes
//! - Trend recording (writes, failures, dropped jobs)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog requests by mode and result.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_catalog_requests_total", "Total catalog requests"),
        &["mode", "result"], // mode: "search" | "discover"
    )
    .unwrap()
});

/// Catalog request duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marquee_catalog_request_duration_seconds",
            "Duration of catalog requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["mode"],
    )
    .unwrap()
});

// =============================================================================
// Search Flow Metrics
// =============================================================================

/// Search flow iterations by outcome.
pub static SEARCH_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_search_outcomes_total", "Search flow outcomes"),
        &["outcome"], // "loaded", "empty", "failed", "stale"
    )
    .unwrap()
});

// =============================================================================
// Trend Metrics
// =============================================================================

/// Trend records written successfully.
pub static TREND_RECORDS_WRITTEN: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_trend_records_written_total",
        "Search terms recorded in the trend store",
    )
    .unwrap()
});

/// Trend records that failed to persist.
pub static TREND_RECORDS_FAILED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_trend_records_failed_total",
        "Trend store writes that failed and were dropped",
    )
    .unwrap()
});

/// Trend jobs dropped before reaching the writer (queue full or closed).
pub static TREND_JOBS_DROPPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_trend_jobs_dropped_total",
        "Trend record jobs dropped before being queued",
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Catalog
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        // Search
        Box::new(SEARCH_OUTCOMES.clone()),
        // Trend
        Box::new(TREND_RECORDS_WRITTEN.clone()),
        Box::new(TREND_RECORDS_FAILED.clone()),
        Box::new(TREND_JOBS_DROPPED.clone()),
    ]
}
