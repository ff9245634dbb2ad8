//! Prometheus metrics for the emission report service
//!
//! # Exported metrics
//! The `/metrics` endpoint (when built with `--features metrics`) exports:
//! - `emission_reports_total` (counter): report requests labeled by outcome
//!   (`uploaded`, `upload_failed`, `render_failed`, `rejected`).
//! - `emission_weather_fallbacks_total` (counter): weather lookups that fell back to -1.
//! - `emission_upload_duration_seconds` (histogram): blob upload duration.

use std::sync::atomic::AtomicU64;

use once_cell::sync::Lazy;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

/// Labels for report outcomes
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct OutcomeLabels {
    pub outcome: String,
}

/// Counter tracking report requests by outcome
pub static REPORTS_TOTAL: Lazy<Family<OutcomeLabels, Counter<u64, AtomicU64>>> =
    Lazy::new(Family::default);

/// Counter tracking weather lookups that fell back to the sentinel temperature
pub static WEATHER_FALLBACKS_TOTAL: Lazy<Counter<u64, AtomicU64>> = Lazy::new(Counter::default);

/// Histogram tracking blob upload duration (seconds)
pub static UPLOAD_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    // 10ms .. ~80s across 14 buckets.
    Histogram::new(exponential_buckets(0.01, 2.0, 14))
});

pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::default();

    registry.register(
        "emission_reports",
        "Emission report requests by outcome",
        REPORTS_TOTAL.clone(),
    );
    registry.register(
        "emission_weather_fallbacks",
        "Weather lookups that failed and recorded -1 as the temperature",
        WEATHER_FALLBACKS_TOTAL.clone(),
    );
    registry.register(
        "emission_upload_duration_seconds",
        "Duration of report uploads to blob storage in seconds",
        UPLOAD_DURATION_SECONDS.clone(),
    );

    registry
});

pub fn inc_report(outcome: &str) {
    REPORTS_TOTAL
        .get_or_create(&OutcomeLabels {
            outcome: outcome.to_string(),
        })
        .inc();
}

pub fn inc_weather_fallback() {
    WEATHER_FALLBACKS_TOTAL.inc();
}

pub fn observe_upload_duration_seconds(seconds: f64) {
    UPLOAD_DURATION_SECONDS.observe(seconds);
}

/// Render the registry in the Prometheus text format
pub fn encode_metrics() -> Result<String, std::fmt::Error> {
    let mut buffer = String::new();
    prometheus_client::encoding::text::encode(&mut buffer, &REGISTRY)?;
    Ok(buffer)
}
