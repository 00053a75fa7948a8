//! Prometheus collector scraping ccache on demand.
//!
//! Every scrape of the `/metrics` endpoint triggers one `configuration()`
//! and one `statistics()` round-trip through the [`Wrapper`]; the parsed
//! records are translated into constant metric samples. A scrape that fails
//! to parse publishes nothing for that cycle, so dashboards see a gap
//! instead of a zeroed record.

use std::collections::HashMap;

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts};
use tracing::error;

use crate::ccache::Wrapper;
use crate::metrics::registry::PARSING_ERRORS;

const NAMESPACE: &str = "ccache";

fn new_desc(name: &str, help: &str, labels: &[&str]) -> Desc {
    Desc::new(
        format!("{NAMESPACE}_{name}"),
        help.to_string(),
        labels.iter().map(|label| label.to_string()).collect(),
        HashMap::new(),
    )
    .unwrap()
}

fn int_counter(name: &str, help: &str, value: u64) -> Vec<MetricFamily> {
    let counter =
        IntCounter::with_opts(Opts::new(name, help).namespace(NAMESPACE)).unwrap();
    counter.inc_by(value);
    counter.collect()
}

fn int_gauge(name: &str, help: &str, value: u64) -> Vec<MetricFamily> {
    let gauge = IntGauge::with_opts(Opts::new(name, help).namespace(NAMESPACE)).unwrap();
    gauge.set(value as i64);
    gauge.collect()
}

fn gauge(name: &str, help: &str, value: f64) -> Vec<MetricFamily> {
    let gauge = Gauge::with_opts(Opts::new(name, help).namespace(NAMESPACE)).unwrap();
    gauge.set(value);
    gauge.collect()
}

/// Collects ccache metrics by invoking the ccache binary on every scrape.
pub struct CcacheCollector {
    wrapper: Wrapper,
    descs: Vec<Desc>,
}

impl CcacheCollector {
    /// Initializes and returns a Prometheus collector for ccache metrics.
    pub fn new(wrapper: Wrapper) -> Self {
        let descs = vec![
            new_desc("call_total", "Cache calls (total)", &[]),
            new_desc("call_hit_total", "Cache hits", &["mode"]),
            new_desc(
                "cache_hit_ratio",
                "Cache hit ratio (direct + preprocessed) / miss",
                &[],
            ),
            new_desc("called_for_link_total", "Called for link", &[]),
            new_desc(
                "called_for_preprocessing_total",
                "Called for preprocessing",
                &[],
            ),
            new_desc("compilation_failed_total", "Compilation failed", &[]),
            new_desc("preprocessing_failed_total", "Preprocessing failed", &[]),
            new_desc(
                "unsupported_code_directive_total",
                "Unsupported code directive",
                &[],
            ),
            new_desc("no_input_file_total", "No input file", &[]),
            new_desc("cleanups_performed_total", "Cleanups performed", &[]),
            new_desc("cached_files", "Cached files", &[]),
            new_desc("cache_size_bytes", "Cache size (bytes)", &[]),
            new_desc("cache_size_max_bytes", "Maximum cache size (bytes)", &[]),
            new_desc("remote_storage_errors_total", "Remote storage errors", &[]),
            new_desc("remote_storage_hit_total", "Remote storage hits", &[]),
            new_desc("remote_storage_miss_total", "Remote storage misses", &[]),
            new_desc(
                "remote_storage_read_hit_total",
                "Remote storage read hits",
                &[],
            ),
            new_desc(
                "remote_storage_read_miss_total",
                "Remote storage read misses",
                &[],
            ),
            new_desc(
                "remote_storage_timeout_total",
                "Remote storage timeouts",
                &[],
            ),
            new_desc("remote_storage_write_total", "Remote storage writes", &[]),
            new_desc("version", "ccache version", &["version"]),
        ];

        Self { wrapper, descs }
    }
}

impl Collector for CcacheCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let config = match self.wrapper.configuration() {
            Ok(config) => config,
            Err(err) => {
                error!(%err, "ccache: failed to collect configuration");
                PARSING_ERRORS.inc();
                return Vec::new();
            }
        };

        let stats = match self.wrapper.statistics() {
            Ok(stats) => stats,
            Err(err) => {
                error!(%err, "ccache: failed to collect statistics");
                PARSING_ERRORS.inc();
                return Vec::new();
            }
        };

        let mut families = Vec::new();

        // counters
        families.extend(int_counter(
            "call_total",
            "Cache calls (total)",
            stats.cache_hit_direct + stats.cache_hit_preprocessed + stats.cache_miss,
        ));

        let call_hit = IntCounterVec::new(
            Opts::new("call_hit_total", "Cache hits").namespace(NAMESPACE),
            &["mode"],
        )
        .unwrap();
        call_hit
            .with_label_values(&["direct"])
            .inc_by(stats.cache_hit_direct);
        call_hit
            .with_label_values(&["preprocessed"])
            .inc_by(stats.cache_hit_preprocessed);
        families.extend(call_hit.collect());

        families.extend(int_counter(
            "called_for_link_total",
            "Called for link",
            stats.called_for_link,
        ));
        families.extend(int_counter(
            "called_for_preprocessing_total",
            "Called for preprocessing",
            stats.called_for_preprocessing,
        ));
        families.extend(int_counter(
            "compilation_failed_total",
            "Compilation failed",
            stats.compilation_failed,
        ));
        families.extend(int_counter(
            "preprocessing_failed_total",
            "Preprocessing failed",
            stats.preprocessing_failed,
        ));
        families.extend(int_counter(
            "unsupported_code_directive_total",
            "Unsupported code directive",
            stats.unsupported_code_directive,
        ));
        families.extend(int_counter(
            "no_input_file_total",
            "No input file",
            stats.no_input_file,
        ));
        families.extend(int_counter(
            "cleanups_performed_total",
            "Cleanups performed",
            stats.cleanups_performed,
        ));
        families.extend(int_counter(
            "remote_storage_errors_total",
            "Remote storage errors",
            stats.remote_storage_error,
        ));
        families.extend(int_counter(
            "remote_storage_hit_total",
            "Remote storage hits",
            stats.remote_storage_hit,
        ));
        families.extend(int_counter(
            "remote_storage_miss_total",
            "Remote storage misses",
            stats.remote_storage_miss,
        ));
        families.extend(int_counter(
            "remote_storage_read_hit_total",
            "Remote storage read hits",
            stats.remote_storage_read_hit,
        ));
        families.extend(int_counter(
            "remote_storage_read_miss_total",
            "Remote storage read misses",
            stats.remote_storage_read_miss,
        ));
        families.extend(int_counter(
            "remote_storage_timeout_total",
            "Remote storage timeouts",
            stats.remote_storage_timeout,
        ));
        families.extend(int_counter(
            "remote_storage_write_total",
            "Remote storage writes",
            stats.remote_storage_write,
        ));

        // gauges
        families.extend(gauge(
            "cache_hit_ratio",
            "Cache hit ratio (direct + preprocessed) / miss",
            stats.cache_hit_ratio,
        ));
        families.extend(int_gauge(
            "cached_files",
            "Cached files",
            stats.files_in_cache,
        ));
        families.extend(int_gauge(
            "cache_size_bytes",
            "Cache size (bytes)",
            stats.cache_size_bytes,
        ));
        families.extend(int_gauge(
            "cache_size_max_bytes",
            "Maximum cache size (bytes)",
            config.max_cache_size_bytes,
        ));

        // version
        let version = IntGaugeVec::new(
            Opts::new("version", "ccache version").namespace(NAMESPACE),
            &["version"],
        )
        .unwrap();
        version
            .with_label_values(&[self.wrapper.version()])
            .set(1);
        families.extend(version.collect());

        families
    }
}
