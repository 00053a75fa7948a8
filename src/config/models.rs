//! Configuration data structures for the exporter.

use serde::{Deserialize, Serialize};

use crate::ccache::DEFAULT_BINARY_PATH;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// ccache binary settings.
    #[serde(default)]
    pub ccache: CcacheConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `9508` (the port registered for ccache exporters)
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for invoking the ccache binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CcacheConfig {
    /// Path to the ccache binary.
    /// Default: `/usr/bin/ccache`
    #[serde(default = "default_binary_path")]
    pub binary_path: String,
}

/// Settings for log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format (`pretty` or `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9508
}

fn default_binary_path() -> String {
    DEFAULT_BINARY_PATH.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CcacheConfig {
    fn default() -> Self {
        Self {
            binary_path: default_binary_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
