// CLI module

use clap::Parser;

/// Prometheus exporter for ccache metrics
#[derive(Parser, Debug)]
#[command(name = "ccache-exporter", version, about, long_about = None)]
pub struct Args {
    /// Listen to this address (host:port)
    #[arg(long, env = "CCACHE_EXPORTER_LISTEN_ADDR")]
    pub listen_addr: Option<String>,

    /// Path to the ccache binary
    #[arg(long, env = "CCACHE_EXPORTER_CCACHE_BINARY_PATH")]
    pub ccache_binary_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CCACHE_EXPORTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long, env = "CCACHE_EXPORTER_LOG_FORMAT")]
    pub log_format: Option<String>,
}
