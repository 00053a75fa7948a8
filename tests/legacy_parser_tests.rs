// Legacy (ccache < 3.7) statistics parser tests

use chrono::{DateTime, Local, TimeZone, Utc};

use ccache_exporter::ccache::legacy::parse_show_stats;
use ccache_exporter::error::ExporterError;

const SHOW_STATS_EMPTY: &str = "\
cache directory                     /home/cached/.ccache
primary config                      /home/cached/.ccache/ccache.conf
secondary config      (readonly)    /etc/ccache.conf
cache hit (direct)                     0
cache hit (preprocessed)               0
cache miss                             0
called for link                        0
called for preprocessing               0
unsupported code directive             0
no input file                          0
cleanups performed                     0
files in cache                         0
cache size                           0.0 kB
max cache size                      15.0 GB
";

const SHOW_STATS_3_4: &str = "\
cache directory                     /home/cached/.ccache
primary config                      /home/cached/.ccache/ccache.conf
secondary config      (readonly)    /etc/ccache.conf
stats zero time                     Fri Nov 16 23:06:27 2018
cache hit (direct)                    73
cache hit (preprocessed)               4
cache miss                           207
cache hit rate                     27.11 %
called for link                       28
called for preprocessing             170
unsupported code directive             4
no input file                         58
cleanups performed                     0
files in cache                       639
cache size                           6.4 MB
max cache size                      15.0 GB
";

const SHOW_STATS_3_5: &str = "\
cache directory                     /home/cached/.ccache
primary config                      /home/cached/.ccache/ccache.conf
secondary config      (readonly)    /etc/ccache.conf
stats zeroed                        Mon Apr  8 13:25:38 2019
cache hit (direct)                   349
cache hit (preprocessed)              10
cache miss                            28
cache hit rate                     92.76 %
called for link                       14
called for preprocessing               1
compile failed                         5
preprocessor error                     2
cache file missing                     1
no input file                          4
cleanups performed                     0
files in cache                       943
cache size                          44.5 MB
max cache size                       5.0 GB
";

fn local_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

fn assert_approx(got: f64, want: f64) {
    assert!((got - want).abs() < 1e-9, "want {want}, got {got}");
}

#[test]
fn test_parse_empty_cache() {
    let (config, stats) = parse_show_stats(SHOW_STATS_EMPTY).unwrap();

    assert_eq!(config.cache_directory, "/home/cached/.ccache");
    assert_eq!(config.primary_config, "/home/cached/.ccache/ccache.conf");
    assert_eq!(config.max_cache_size, "15.0 GB");
    assert_eq!(config.max_cache_size_bytes, 15_000_000_000);

    assert_eq!(stats.cache_hit_direct, 0);
    assert_eq!(stats.cache_hit_preprocessed, 0);
    assert_eq!(stats.cache_miss, 0);
    assert_approx(stats.cache_hit_rate, 0.0);
    assert_approx(stats.cache_hit_ratio, 0.0);
    assert_eq!(stats.files_in_cache, 0);
    assert_eq!(stats.cache_size, "0.0 kB");
    assert_eq!(stats.cache_size_bytes, 0);
    assert_eq!(stats.stats_zero_time, None);
}

#[test]
fn test_parse_build_stats() {
    let (config, stats) = parse_show_stats(SHOW_STATS_3_4).unwrap();

    assert_eq!(config.cache_directory, "/home/cached/.ccache");
    assert_eq!(config.primary_config, "/home/cached/.ccache/ccache.conf");
    assert_eq!(config.max_cache_size, "15.0 GB");
    assert_eq!(config.max_cache_size_bytes, 15_000_000_000);

    assert_eq!(stats.cache_hit_direct, 73);
    assert_eq!(stats.cache_hit_preprocessed, 4);
    assert_eq!(stats.cache_miss, 207);
    assert_approx(stats.cache_hit_rate, 27.11);
    assert_approx(stats.cache_hit_ratio, 0.2711);
    assert_eq!(stats.called_for_link, 28);
    assert_eq!(stats.called_for_preprocessing, 170);
    assert_eq!(stats.unsupported_code_directive, 4);
    assert_eq!(stats.no_input_file, 58);
    assert_eq!(stats.cleanups_performed, 0);
    assert_eq!(stats.files_in_cache, 639);
    assert_eq!(stats.cache_size, "6.4 MB");
    assert_eq!(stats.cache_size_bytes, 6_400_000);
    assert_eq!(
        stats.stats_zero_time,
        Some(local_time(2018, 11, 16, 23, 6, 27))
    );
}

#[test]
fn test_parse_stats_zeroed_label() {
    let (_, stats) = parse_show_stats(SHOW_STATS_3_5).unwrap();

    assert_eq!(stats.cache_hit_direct, 349);
    assert_eq!(stats.cache_hit_preprocessed, 10);
    assert_eq!(stats.cache_miss, 28);
    assert_approx(stats.cache_hit_rate, 92.76);
    assert_approx(stats.cache_hit_ratio, 0.9276);
    assert_eq!(stats.compilation_failed, 5);
    assert_eq!(stats.preprocessing_failed, 2);
    assert_eq!(stats.cache_size, "44.5 MB");
    assert_eq!(stats.cache_size_bytes, 44_500_000);
    assert_eq!(
        stats.stats_zero_time,
        Some(local_time(2019, 4, 8, 13, 25, 38))
    );
}

#[test]
fn test_hit_ratio_derived_from_rate() {
    let (_, stats) = parse_show_stats(SHOW_STATS_3_4).unwrap();

    assert_approx(stats.cache_hit_ratio, stats.cache_hit_rate / 100.0);
}

#[test]
fn test_collection_time_is_set() {
    let before = chrono::Utc::now();
    let (_, stats) = parse_show_stats(SHOW_STATS_3_4).unwrap();

    assert!(stats.stats_time >= before);
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let (_, stats) = parse_show_stats("something ccache never prints    42\n").unwrap();

    assert_eq!(stats.cache_miss, 0);
    assert_eq!(stats.cache_size, "");
}

#[test]
fn test_unknown_size_unit_fails() {
    let input = "cache size                         655.4 zB\n";

    let err = parse_show_stats(input).unwrap_err();
    assert!(matches!(err, ExporterError::InvalidSize { .. }));
    assert!(err.to_string().contains("ZB"), "got: {err}");
}

#[test]
fn test_malformed_zero_time_fails() {
    let input = "stats zeroed                        not a date\n";

    let err = parse_show_stats(input).unwrap_err();
    assert!(matches!(err, ExporterError::InvalidTimestamp { .. }));
    assert!(err.to_string().contains("not a date"), "got: {err}");
}
