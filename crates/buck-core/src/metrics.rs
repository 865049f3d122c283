#![allow(clippy::expect_used)]

use lazy_static::lazy_static;
use prometheus::{HistogramVec, IntCounter, IntCounterVec, Opts};

lazy_static! {
    /// Histogram tracking `eth_getBlockByNumber` call duration in seconds
    pub static ref UPSTREAM_CALL_DURATION: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "buck_upstream_call_duration_seconds",
            "Duration of eth_getBlockByNumber calls to the node in seconds"
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0
        ]),
        &["method", "status"]
    )
    .expect("Failed to create UPSTREAM_CALL_DURATION histogram");

    /// Counter tracking total calls to the node
    pub static ref UPSTREAM_CALL_COUNT: IntCounterVec = IntCounterVec::new(
        Opts::new("buck_upstream_call_count", "Total number of calls to the node"),
        &["method", "status"]
    )
    .expect("Failed to create UPSTREAM_CALL_COUNT counter");

    /// Counter tracking cache lookups by outcome: hit, miss or corrupted
    pub static ref CACHE_LOOKUP_COUNT: IntCounterVec = IntCounterVec::new(
        Opts::new("buck_cache_lookup_count", "Total number of block cache lookups"),
        &["outcome"]
    )
    .expect("Failed to create CACHE_LOOKUP_COUNT counter");

    /// Counter tracking cache writes that failed and were skipped
    pub static ref CACHE_WRITE_FAILURE_COUNT: IntCounter = IntCounter::new(
        "buck_cache_write_failure_count",
        "Total number of failed block cache writes"
    )
    .expect("Failed to create CACHE_WRITE_FAILURE_COUNT counter");
}

pub(crate) const CACHE_HIT: &str = "hit";
pub(crate) const CACHE_MISS: &str = "miss";
pub(crate) const CACHE_CORRUPTED: &str = "corrupted";

/// Register all core metrics with the provided registry
pub fn register_metrics(registry: &prometheus::Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(UPSTREAM_CALL_DURATION.clone()))?;
    registry.register(Box::new(UPSTREAM_CALL_COUNT.clone()))?;
    registry.register(Box::new(CACHE_LOOKUP_COUNT.clone()))?;
    registry.register(Box::new(CACHE_WRITE_FAILURE_COUNT.clone()))?;
    Ok(())
}
