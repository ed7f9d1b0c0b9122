//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Track matching (per-track outcome)
//! - Conversion and generation pipelines (result, duration)
//! - Generation selection quality (distance of selected tracks)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Matching
// =============================================================================

/// Track match attempts by outcome.
pub static TRACK_MATCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("moodtune_track_matches_total", "Track match attempts"),
        &["outcome"], // "matched", "no_result", "error"
    )
    .unwrap()
});

// =============================================================================
// Pipelines
// =============================================================================

/// Conversions by result.
pub static CONVERSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("moodtune_conversions_total", "Total playlist conversions"),
        &["source", "target", "result"], // result: "success" or an error kind
    )
    .unwrap()
});

/// Conversion duration in seconds.
pub static CONVERSION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "moodtune_conversion_duration_seconds",
            "Duration of playlist conversions",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["target"],
    )
    .unwrap()
});

/// Generations by result.
pub static GENERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("moodtune_generations_total", "Total playlist generations"),
        &["target", "result"],
    )
    .unwrap()
});

/// Distance of each selected track from the target profile.
pub static SELECTED_DISTANCE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "moodtune_selected_track_distance",
            "Distance from the target profile of selected tracks",
        )
        .buckets(vec![0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TRACK_MATCHES.clone()),
        Box::new(CONVERSIONS_TOTAL.clone()),
        Box::new(CONVERSION_DURATION.clone()),
        Box::new(GENERATIONS_TOTAL.clone()),
        Box::new(SELECTED_DISTANCE.clone()),
    ]
}
