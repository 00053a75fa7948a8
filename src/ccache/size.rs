//! Byte-size parsing and formatting helpers.
//!
//! ccache reports sizes in two dialects: human-readable magnitude+unit
//! strings ("6.4 MB", "15.0 GB") in the legacy text format, and raw kibibyte
//! counts in the TSV format. Both are normalized to exact byte counts here.

use bytesize::ByteSize;

use crate::error::{ExporterError, Result};

// Largest-first so the formatter picks the biggest clean unit.
const METRIC_UNITS: &[(u64, &str)] = &[
    (bytesize::PB, "PB"),
    (bytesize::TB, "TB"),
    (bytesize::GB, "GB"),
    (bytesize::MB, "MB"),
    (bytesize::KB, "KB"),
];

/// Parses a human-readable size string into an exact byte count.
///
/// The value is upper-cased and stripped of interior whitespace before being
/// handed to the unit parser, so "6.4 MB", "6.4MB" and "6.4 mB" are all
/// accepted. An unknown unit suffix is a fatal error naming the suffix.
pub fn parse_metric_size(value: &str) -> Result<u64> {
    let sanitized = value.to_uppercase().replace(' ', "");

    match sanitized.parse::<ByteSize>() {
        Ok(size) => Ok(size.as_u64()),
        Err(reason) => Err(ExporterError::InvalidSize {
            value: sanitized,
            reason,
        }),
    }
}

/// Converts a kibibyte magnitude into an exact byte count.
///
/// The TSV `cache_size_kibibyte` field is base-2: each kibibyte is 1024
/// bytes, not 1000.
pub fn parse_kibibyte_size(value: &str) -> Result<u64> {
    let sized = format!("{value}KiB");

    match sized.parse::<ByteSize>() {
        Ok(size) => Ok(size.as_u64()),
        Err(reason) => Err(ExporterError::InvalidSize {
            value: sized,
            reason,
        }),
    }
}

/// Formats a byte count as the largest clean metric unit, rounding down.
///
/// Formatting a clean magnitude (an exact unit multiple below the next unit)
/// and re-parsing it yields the original byte count.
pub fn format_metric_floor(bytes: u64) -> String {
    for &(factor, suffix) in METRIC_UNITS {
        if bytes >= factor {
            return format!("{}{}", bytes / factor, suffix);
        }
    }

    format!("{bytes}B")
}
