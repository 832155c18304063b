//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Upstream catalog provider calls
//! - Selection saves and the rows they upsert

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Provider Metrics
// =============================================================================

/// Provider requests by operation and outcome.
pub static PROVIDER_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "tradeshelf_provider_requests_total",
            "Total requests to the upstream catalog provider",
        ),
        &["operation", "result"], // result: "success" or a ProviderError kind
    )
    .unwrap()
});

/// Provider request duration in seconds.
pub static PROVIDER_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "tradeshelf_provider_request_duration_seconds",
            "Duration of upstream catalog provider calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

// =============================================================================
// Selection Metrics
// =============================================================================

/// Selection save calls by result.
pub static SELECTION_SAVES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "tradeshelf_selection_saves_total",
            "Total selection save calls",
        ),
        &["result"], // "committed", "precondition_failed", "persistence_error"
    )
    .unwrap()
});

/// Rows touched by selection saves.
pub static SELECTION_ROWS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "tradeshelf_selection_rows_total",
            "Rows written by selection saves",
        ),
        &["entity", "outcome"], // entity: category/product/trader_product, outcome: created/updated
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PROVIDER_REQUESTS.clone()),
        Box::new(PROVIDER_REQUEST_DURATION.clone()),
        Box::new(SELECTION_SAVES.clone()),
        Box::new(SELECTION_ROWS.clone()),
    ]
}
