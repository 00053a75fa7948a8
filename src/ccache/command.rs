//! Invocation of the ccache binary.

use std::process::Command;

use crate::error::{ExporterError, Result};

pub const DEFAULT_BINARY_PATH: &str = "/usr/bin/ccache";

/// The ccache subcommands the exporter relies on.
///
/// Implemented by [`LocalCommand`] for the real binary and by in-memory
/// fakes in tests.
pub trait CcacheCommand {
    /// Returns the output of `ccache --version`.
    fn version(&self) -> Result<String>;

    /// Returns the output of `ccache --show-stats`.
    ///
    /// Machine-readable for ccache < 3.7 only.
    fn show_stats(&self) -> Result<String>;

    /// Returns the output of `ccache --print-stats`.
    ///
    /// Available since ccache 3.7.
    fn print_stats(&self) -> Result<String>;

    /// Returns the output of `ccache --show-config`.
    ///
    /// Available since ccache 3.7.
    fn show_config(&self) -> Result<String>;
}

/// Runs ccache commands in a local shell.
pub struct LocalCommand {
    path: String,
}

impl LocalCommand {
    /// Ensures the ccache executable exists and can be invoked, and returns
    /// an initialized `LocalCommand`.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();

        let probe = Command::new(&path).arg("-s").output()?;
        if !probe.status.success() {
            return Err(ExporterError::CommandFailed {
                status: probe.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&probe.stderr).trim().to_string(),
            });
        }

        Ok(Self { path })
    }

    fn exec(&self, option: &str) -> Result<String> {
        let output = Command::new(&self.path).arg(option).output()?;

        if !output.status.success() {
            return Err(ExporterError::CommandFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl CcacheCommand for LocalCommand {
    fn version(&self) -> Result<String> {
        self.exec("--version")
    }

    fn show_stats(&self) -> Result<String> {
        self.exec("--show-stats")
    }

    fn print_stats(&self) -> Result<String> {
        self.exec("--print-stats")
    }

    fn show_config(&self) -> Result<String> {
        self.exec("--show-config")
    }
}
