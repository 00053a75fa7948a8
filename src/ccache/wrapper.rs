//! Version-dispatching entry point for ccache statistics and configuration.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;

use crate::ccache::command::CcacheCommand;
use crate::ccache::configuration::{self, Configuration};
use crate::ccache::legacy;
use crate::ccache::statistics::Statistics;
use crate::ccache::tsv;
use crate::error::{ExporterError, Result};

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ccache version (.+)").expect("invalid version pattern"));

// ccache 3.7 turned --show-stats into a human-readable report;
// --print-stats and --show-config are the machine-readable commands since.
static TSV_FORMAT_MIN_VERSION: Lazy<Version> = Lazy::new(|| Version::new(3, 7, 0));

/// Parses a ccache version token, tolerating the two-component versions
/// ("3.5") some 3.x releases report.
fn parse_version_token(token: &str) -> Result<Version> {
    let malformed = |source: semver::Error| ExporterError::MalformedVersion {
        value: token.to_string(),
        source,
    };

    match Version::parse(token) {
        Ok(version) => Ok(version),
        Err(source) => {
            let padded = match token.matches('.').count() {
                0 => format!("{token}.0.0"),
                1 => format!("{token}.0"),
                _ => return Err(malformed(source)),
            };

            Version::parse(&padded).map_err(|_| malformed(source))
        }
    }
}

/// Hides the format differences between ccache releases behind a single
/// entry point.
///
/// The installed version is detected once at construction and cached; it is
/// read-only afterwards, so a `Wrapper` can be shared across concurrent
/// scrapes.
pub struct Wrapper {
    command: Box<dyn CcacheCommand + Send + Sync>,
    version: Version,
    raw_version: String,
}

impl std::fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wrapper")
            .field("version", &self.version)
            .field("raw_version", &self.raw_version)
            .finish_non_exhaustive()
    }
}

impl Wrapper {
    /// Detects the installed ccache version and returns an initialized
    /// `Wrapper`.
    ///
    /// Fails when the version banner carries no recognizable version token,
    /// or when the token is not a semantic version.
    pub fn new(command: Box<dyn CcacheCommand + Send + Sync>) -> Result<Self> {
        let banner = command.version()?;

        let raw_version = VERSION_PATTERN
            .captures(&banner)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim().to_string())
            .ok_or(ExporterError::MissingVersion)?;

        let version = parse_version_token(&raw_version)?;

        Ok(Self {
            command,
            version,
            raw_version,
        })
    }

    /// Returns the detected ccache version, as reported by the binary.
    pub fn version(&self) -> &str {
        &self.raw_version
    }

    fn uses_legacy_format(&self) -> bool {
        self.version < *TSV_FORMAT_MIN_VERSION
    }

    /// Returns the current ccache statistics.
    pub fn statistics(&self) -> Result<Statistics> {
        if self.uses_legacy_format() {
            let out = self.command.show_stats()?;
            let (_, stats) = legacy::parse_show_stats(&out)?;
            Ok(stats)
        } else {
            let out = self.command.print_stats()?;
            tsv::parse_print_stats(&out)
        }
    }

    /// Returns the current ccache configuration.
    ///
    /// For ccache < 3.7 the configuration is extracted from the same
    /// `--show-stats` document the statistics come from.
    pub fn configuration(&self) -> Result<Configuration> {
        if self.uses_legacy_format() {
            let out = self.command.show_stats()?;
            let (config, _) = legacy::parse_show_stats(&out)?;
            Ok(config)
        } else {
            let out = self.command.show_config()?;
            configuration::parse_show_config(&out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_token() {
        assert_eq!(parse_version_token("3.3.4").unwrap(), Version::new(3, 3, 4));
        assert_eq!(parse_version_token("4.6.1").unwrap(), Version::new(4, 6, 1));
    }

    #[test]
    fn test_parse_version_token_pads_missing_components() {
        assert_eq!(parse_version_token("3.5").unwrap(), Version::new(3, 5, 0));
        assert_eq!(parse_version_token("4").unwrap(), Version::new(4, 0, 0));
    }

    #[test]
    fn test_parse_version_token_rejects_garbage() {
        let err = parse_version_token("not-a-version").unwrap_err();
        assert!(matches!(err, ExporterError::MalformedVersion { .. }));
    }
}
