//! Parser for the tab-separated statistics printed by ccache 3.7 and newer.

use chrono::{DateTime, Utc};

use crate::ccache::size::{format_metric_floor, parse_kibibyte_size};
use crate::ccache::statistics::Statistics;
use crate::error::{ExporterError, Result};

fn parse_counter(field: &str, value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|source| ExporterError::InvalidInteger {
            field: field.to_string(),
            source,
        })
}

// Epoch 0 is ccache's way of saying "never"; keep the parse-time default
// instead of reporting January 1970.
fn parse_epoch_timestamp(field: &str, value: &str) -> Result<Option<DateTime<Utc>>> {
    let seconds: i64 = value
        .parse()
        .map_err(|source| ExporterError::InvalidInteger {
            field: field.to_string(),
            source,
        })?;

    if seconds == 0 {
        return Ok(None);
    }

    DateTime::from_timestamp(seconds, 0)
        .map(Some)
        .ok_or(ExporterError::TimestampOutOfRange(seconds))
}

/// Parses ccache statistics as formatted by the `ccache --print-stats`
/// command.
///
/// Rows are `key<TAB>value` pairs; rows that do not carry exactly two fields
/// are skipped, and unknown keys are ignored so newer ccache releases keep
/// working. Recognized values that fail to convert abort the parse.
pub fn parse_print_stats(text: &str) -> Result<Statistics> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut stats = Statistics::new();

    for record in reader.records() {
        let record = record?;
        if record.len() != 2 {
            // for each row, we expect a key and a value
            continue;
        }

        let (key, value) = (&record[0], &record[1]);

        match key {
            "cache_miss" => stats.cache_miss = parse_counter(key, value)?,
            "cache_size_kibibyte" => stats.cache_size_bytes = parse_kibibyte_size(value)?,
            "called_for_link" => stats.called_for_link = parse_counter(key, value)?,
            "called_for_preprocessing" => {
                stats.called_for_preprocessing = parse_counter(key, value)?
            }
            "compile_failed" => stats.compilation_failed = parse_counter(key, value)?,
            "direct_cache_hit" => stats.cache_hit_direct = parse_counter(key, value)?,
            "direct_cache_miss" => stats.cache_miss_direct = parse_counter(key, value)?,
            "files_in_cache" => stats.files_in_cache = parse_counter(key, value)?,
            "no_input_file" => stats.no_input_file = parse_counter(key, value)?,
            "preprocessed_cache_hit" => stats.cache_hit_preprocessed = parse_counter(key, value)?,
            "preprocessed_cache_miss" => {
                stats.cache_miss_preprocessed = parse_counter(key, value)?
            }
            "preprocessor_error" => stats.preprocessing_failed = parse_counter(key, value)?,
            "remote_storage_error" => stats.remote_storage_error = parse_counter(key, value)?,
            "remote_storage_hit" => stats.remote_storage_hit = parse_counter(key, value)?,
            "remote_storage_miss" => stats.remote_storage_miss = parse_counter(key, value)?,
            "remote_storage_read_hit" => {
                stats.remote_storage_read_hit = parse_counter(key, value)?
            }
            "remote_storage_read_miss" => {
                stats.remote_storage_read_miss = parse_counter(key, value)?
            }
            "remote_storage_timeout" => stats.remote_storage_timeout = parse_counter(key, value)?,
            "remote_storage_write" => stats.remote_storage_write = parse_counter(key, value)?,
            "stats_updated_timestamp" => {
                if let Some(updated) = parse_epoch_timestamp(key, value)? {
                    stats.stats_time = updated;
                }
            }
            "stats_zeroed_timestamp" => {
                stats.stats_zero_time = parse_epoch_timestamp(key, value)?;
            }
            "unsupported_code_directive" => {
                stats.unsupported_code_directive = parse_counter(key, value)?
            }
            _ => {}
        }
    }

    // Derived fields, for parity with the legacy format. The denominator
    // counts every cache call: hits, plain misses and split misses.
    let cache_hit_total = stats.cache_hit_direct + stats.cache_hit_preprocessed;
    let cache_call_total = cache_hit_total
        + stats.cache_miss
        + stats.cache_miss_direct
        + stats.cache_miss_preprocessed;

    if cache_call_total > 0 {
        stats.cache_hit_ratio = cache_hit_total as f64 / cache_call_total as f64;
        stats.cache_hit_rate = 100.0 * stats.cache_hit_ratio;
    }

    stats.cache_size = format_metric_floor(stats.cache_size_bytes);

    Ok(stats)
}
