// Prometheus metrics registry

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter_with_registry, Encoder, IntCounter, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Parse failures observed while scraping ccache
    pub static ref PARSING_ERRORS: IntCounter = register_int_counter_with_registry!(
        Opts::new("parsing_errors_total", "Collector parsing errors (total)")
            .namespace("ccache")
            .subsystem("collector"),
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
