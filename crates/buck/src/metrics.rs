use std::sync::Arc;

use lazy_static::lazy_static;
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::warn;

lazy_static! {
    pub static ref METRICS_REGISTRY: Arc<Registry> = {
        let registry = Arc::new(Registry::new());

        if let Err(e) = buck_core::metrics::register_metrics(&registry) {
            warn!("Failed to register core metrics: {}", e);
        }

        registry
    };
}

/// Get metrics in Prometheus text format
pub fn get_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}
