//! Parser for the fixed-format statistics text printed by ccache 3.3 to 3.6.
//!
//! `ccache --show-stats` used to be the machine-readable entry point: one
//! multi-word label per line, value after a run of whitespace. Starting with
//! ccache 3.7 the command was overhauled to print human-readable output and
//! `ccache --print-stats` became the machine-readable replacement.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ccache::configuration::Configuration;
use crate::ccache::size::parse_metric_size;
use crate::ccache::statistics::Statistics;
use crate::error::{ExporterError, Result};

/// Textual timestamp layout used by ccache for `stats zero time`,
/// e.g. `Fri Nov 16 23:06:27 2018`.
const STATS_ZERO_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

// One pattern per recognized label, applied independently. Extraction is
// additive and order-independent; unrecognized lines are ignored.
static RULES: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    let mut rules = HashMap::new();
    rules.insert("cache_directory", r"cache directory\s+(.+)");
    rules.insert("primary_config", r"primary config\s+(.+)");
    rules.insert("stats_zero_time", r"stats zero( time|ed)\s+(.*)");
    rules.insert("cache_hit_direct", r"cache hit \(direct\)\s+(\d+)");
    rules.insert("cache_hit_preprocessed", r"cache hit \(preprocessed\)\s+(\d+)");
    rules.insert("cache_miss", r"cache miss\s+(\d+)");
    rules.insert("cache_hit_rate", r"cache hit rate\s+(\d+(?:\.\d+)?) %");
    rules.insert("called_for_link", r"called for link\s+(\d+)");
    rules.insert("called_for_preprocessing", r"called for preprocessing\s+(\d+)");
    rules.insert("compilation_failed", r"compile failed\s+(\d+)");
    rules.insert("preprocessing_failed", r"preprocessor error\s+(\d+)");
    rules.insert("unsupported_code_directive", r"unsupported code directive\s+(\d+)");
    rules.insert("no_input_file", r"no input file\s+(\d+)");
    rules.insert("cleanups_performed", r"cleanups performed\s+(\d+)");
    rules.insert("files_in_cache", r"files in cache\s+(\d+)");
    rules.insert("cache_size", r"cache size\s+(.+)");
    rules.insert("max_cache_size", r"max cache size\s+(.+)");

    rules
        .into_iter()
        .map(|(field, pattern)| (field, Regex::new(pattern).expect("invalid rule pattern")))
        .collect()
});

fn capture<'t>(field: &str, text: &'t str) -> Option<&'t str> {
    RULES[field]
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

fn capture_counter(field: &str, text: &str) -> Result<Option<u64>> {
    match capture(field, text) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|source| ExporterError::InvalidInteger {
                field: field.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

fn parse_zero_time(value: &str) -> Result<chrono::DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, STATS_ZERO_TIME_FORMAT).map_err(|source| {
        ExporterError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })?;

    // The timestamp carries no offset; assume it originates from this host.
    let zeroed = Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc());

    Ok(zeroed)
}

/// Parses ccache configuration and statistics as formatted by the
/// `ccache --show-stats` command of ccache 3.3 to 3.6.
///
/// The same document carries both records; the caller picks the subset it
/// needs. Parsing fails fast on the first field that cannot be converted and
/// no partial record is returned.
pub fn parse_show_stats(text: &str) -> Result<(Configuration, Statistics)> {
    let mut config = Configuration::default();
    let mut stats = Statistics::new();

    if let Some(directory) = capture("cache_directory", text) {
        config.cache_directory = directory.to_string();
    }

    if let Some(path) = capture("primary_config", text) {
        config.primary_config = path.to_string();
    }

    if let Some(captures) = RULES["stats_zero_time"].captures(text) {
        let value = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        stats.stats_zero_time = Some(parse_zero_time(value)?);
    }

    if let Some(value) = capture_counter("cache_hit_direct", text)? {
        stats.cache_hit_direct = value;
    }

    if let Some(value) = capture_counter("cache_hit_preprocessed", text)? {
        stats.cache_hit_preprocessed = value;
    }

    if let Some(value) = capture_counter("cache_miss", text)? {
        stats.cache_miss = value;
    }

    if let Some(value) = capture("cache_hit_rate", text) {
        stats.cache_hit_rate = value
            .parse()
            .map_err(|source| ExporterError::InvalidFloat {
                field: "cache_hit_rate".to_string(),
                source,
            })?;
        stats.cache_hit_ratio = stats.cache_hit_rate / 100.0;
    }

    if let Some(value) = capture_counter("called_for_link", text)? {
        stats.called_for_link = value;
    }

    if let Some(value) = capture_counter("called_for_preprocessing", text)? {
        stats.called_for_preprocessing = value;
    }

    if let Some(value) = capture_counter("compilation_failed", text)? {
        stats.compilation_failed = value;
    }

    if let Some(value) = capture_counter("preprocessing_failed", text)? {
        stats.preprocessing_failed = value;
    }

    if let Some(value) = capture_counter("unsupported_code_directive", text)? {
        stats.unsupported_code_directive = value;
    }

    if let Some(value) = capture_counter("no_input_file", text)? {
        stats.no_input_file = value;
    }

    if let Some(value) = capture_counter("cleanups_performed", text)? {
        stats.cleanups_performed = value;
    }

    if let Some(value) = capture_counter("files_in_cache", text)? {
        stats.files_in_cache = value;
    }

    if let Some(value) = capture("cache_size", text) {
        stats.cache_size = value.to_string();
        stats.cache_size_bytes = parse_metric_size(value)?;
    }

    if let Some(value) = capture("max_cache_size", text) {
        config.max_cache_size = value.to_string();
        config.max_cache_size_bytes = parse_metric_size(value)?;
    }

    Ok((config, stats))
}
