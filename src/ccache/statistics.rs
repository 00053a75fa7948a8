//! Data model for ccache usage statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A snapshot of ccache usage counters and timestamps.
///
/// A fresh record is built on every parse; nothing is carried over between
/// observations.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    // Cache status
    pub cleanups_performed: u64,
    pub files_in_cache: u64,
    pub cache_size: String,
    pub cache_size_bytes: u64,

    // Timestamps
    pub stats_time: DateTime<Utc>,
    pub stats_zero_time: Option<DateTime<Utc>>,

    // Cache usage
    pub cache_hit_direct: u64,
    pub cache_hit_preprocessed: u64,
    pub cache_miss: u64,
    pub cache_miss_direct: u64,
    pub cache_miss_preprocessed: u64,
    pub cache_hit_rate: f64,
    pub cache_hit_ratio: f64,
    pub called_for_link: u64,
    pub called_for_preprocessing: u64,

    // Uncacheable
    pub compilation_failed: u64,
    pub preprocessing_failed: u64,
    pub unsupported_code_directive: u64,
    pub no_input_file: u64,

    // Remote storage
    pub remote_storage_error: u64,
    pub remote_storage_hit: u64,
    pub remote_storage_miss: u64,
    pub remote_storage_read_hit: u64,
    pub remote_storage_read_miss: u64,
    pub remote_storage_timeout: u64,
    pub remote_storage_write: u64,
}

impl Statistics {
    /// Returns an empty record with the collection timestamp set to now.
    pub fn new() -> Self {
        Self {
            cleanups_performed: 0,
            files_in_cache: 0,
            cache_size: String::new(),
            cache_size_bytes: 0,
            stats_time: Utc::now(),
            stats_zero_time: None,
            cache_hit_direct: 0,
            cache_hit_preprocessed: 0,
            cache_miss: 0,
            cache_miss_direct: 0,
            cache_miss_preprocessed: 0,
            cache_hit_rate: 0.0,
            cache_hit_ratio: 0.0,
            called_for_link: 0,
            called_for_preprocessing: 0,
            compilation_failed: 0,
            preprocessing_failed: 0,
            unsupported_code_directive: 0,
            no_input_file: 0,
            remote_storage_error: 0,
            remote_storage_hit: 0,
            remote_storage_miss: 0,
            remote_storage_read_hit: 0,
            remote_storage_read_miss: 0,
            remote_storage_timeout: 0,
            remote_storage_write: 0,
        }
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}
