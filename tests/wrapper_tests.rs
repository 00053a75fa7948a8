// Version-dispatching wrapper tests

use ccache_exporter::ccache::{CcacheCommand, Wrapper};
use ccache_exporter::error::{ExporterError, Result};

const VERSION_BANNER_3_3: &str = "\
ccache version 3.3.4

Copyright (C) 2002-2007 Andrew Tridgell
Copyright (C) 2009-2017 Joel Rosdahl

This program is free software; you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation; either version 3 of the License, or (at your option) any later
version.
";

const VERSION_BANNER_4_6: &str = "\
ccache version 4.6.1
Features: file-storage http-storage redis-storage

Copyright (C) 2002-2007 Andrew Tridgell
Copyright (C) 2009-2022 Joel Rosdahl and other contributors

See <https://ccache.dev/credits.html> for a complete list of contributors.
";

const SHOW_STATS: &str = "\
cache directory                     /home/cached/.ccache
primary config                      /home/cached/.ccache/ccache.conf
cache hit (direct)                    73
cache hit (preprocessed)               4
cache miss                           207
cache hit rate                     27.11 %
files in cache                       639
cache size                           6.4 MB
max cache size                      15.0 GB
";

const PRINT_STATS: &str = "direct_cache_hit\t148\n\
preprocessed_cache_hit\t2\n\
cache_miss\t150\n\
direct_cache_miss\t164\n\
preprocessed_cache_miss\t152\n\
files_in_cache\t298\n\
cache_size_kibibyte\t4164\n";

const SHOW_CONFIG: &str = "(environment) cache_dir = /home/cached/.ccache\n\
(/home/cached/.ccache/ccache.conf) max_size = 5.0G\n";

#[derive(Default)]
struct FakeCommand {
    version_banner: String,
    show_stats: String,
    print_stats: String,
    show_config: String,
}

impl CcacheCommand for FakeCommand {
    fn version(&self) -> Result<String> {
        Ok(self.version_banner.clone())
    }

    fn show_stats(&self) -> Result<String> {
        Ok(self.show_stats.clone())
    }

    fn print_stats(&self) -> Result<String> {
        Ok(self.print_stats.clone())
    }

    fn show_config(&self) -> Result<String> {
        Ok(self.show_config.clone())
    }
}

struct FailingCommand;

impl CcacheCommand for FailingCommand {
    fn version(&self) -> Result<String> {
        Ok("ccache version 3.3.4\n".to_string())
    }

    fn show_stats(&self) -> Result<String> {
        Err(ExporterError::CommandFailed {
            status: 1,
            stderr: "ccache: error: something went wrong".to_string(),
        })
    }

    fn print_stats(&self) -> Result<String> {
        unreachable!("print-stats is not available before ccache 3.7")
    }

    fn show_config(&self) -> Result<String> {
        unreachable!("show-config is not available before ccache 3.7")
    }
}

#[test]
fn test_version_3_3_selects_legacy_parsers() {
    let command = FakeCommand {
        version_banner: VERSION_BANNER_3_3.to_string(),
        show_stats: SHOW_STATS.to_string(),
        ..Default::default()
    };

    let wrapper = Wrapper::new(Box::new(command)).unwrap();
    assert_eq!(wrapper.version(), "3.3.4");

    let stats = wrapper.statistics().unwrap();
    assert_eq!(stats.cache_hit_direct, 73);
    assert_eq!(stats.cache_miss, 207);
    assert_eq!(stats.cache_size, "6.4 MB");

    // same document, configuration subset
    let config = wrapper.configuration().unwrap();
    assert_eq!(config.cache_directory, "/home/cached/.ccache");
    assert_eq!(config.primary_config, "/home/cached/.ccache/ccache.conf");
    assert_eq!(config.max_cache_size_bytes, 15_000_000_000);
}

#[test]
fn test_version_4_6_selects_tsv_and_config_parsers() {
    let command = FakeCommand {
        version_banner: VERSION_BANNER_4_6.to_string(),
        print_stats: PRINT_STATS.to_string(),
        show_config: SHOW_CONFIG.to_string(),
        ..Default::default()
    };

    let wrapper = Wrapper::new(Box::new(command)).unwrap();
    assert_eq!(wrapper.version(), "4.6.1");

    let stats = wrapper.statistics().unwrap();
    assert_eq!(stats.cache_hit_direct, 148);
    assert_eq!(stats.cache_miss_direct, 164);
    assert_eq!(stats.cache_size, "4MB");

    let config = wrapper.configuration().unwrap();
    assert_eq!(config.cache_directory, "/home/cached/.ccache");
    assert_eq!(config.max_cache_size, "5.0GB");
    assert_eq!(config.max_cache_size_bytes, 5_000_000_000);
}

#[test]
fn test_two_component_version_selects_legacy_parsers() {
    let command = FakeCommand {
        version_banner: "ccache version 3.5\n".to_string(),
        show_stats: SHOW_STATS.to_string(),
        ..Default::default()
    };

    let wrapper = Wrapper::new(Box::new(command)).unwrap();
    assert_eq!(wrapper.version(), "3.5");

    let stats = wrapper.statistics().unwrap();
    assert_eq!(stats.cache_hit_direct, 73);
}

#[test]
fn test_version_3_7_selects_tsv_parser() {
    let command = FakeCommand {
        version_banner: "ccache version 3.7\n".to_string(),
        print_stats: PRINT_STATS.to_string(),
        show_config: SHOW_CONFIG.to_string(),
        ..Default::default()
    };

    let wrapper = Wrapper::new(Box::new(command)).unwrap();

    let stats = wrapper.statistics().unwrap();
    assert_eq!(stats.cache_hit_direct, 148);
}

#[test]
fn test_missing_version_is_fatal() {
    let command = FakeCommand {
        version_banner: "this is not the banner you are looking for\n".to_string(),
        ..Default::default()
    };

    let err = Wrapper::new(Box::new(command)).unwrap_err();
    assert!(matches!(err, ExporterError::MissingVersion));
}

#[test]
fn test_malformed_version_is_fatal() {
    let command = FakeCommand {
        version_banner: "ccache version bananas\n".to_string(),
        ..Default::default()
    };

    let err = Wrapper::new(Box::new(command)).unwrap_err();
    assert!(matches!(err, ExporterError::MalformedVersion { .. }));
}

#[test]
fn test_command_errors_propagate_unchanged() {
    let wrapper = Wrapper::new(Box::new(FailingCommand)).unwrap();

    let err = wrapper.statistics().unwrap_err();
    assert!(matches!(err, ExporterError::CommandFailed { .. }));
    assert!(err.to_string().contains("something went wrong"));
}
