// Configuration module

mod models;

pub use models::*;

use std::path::PathBuf;

use config::{Config, Environment, File};

use crate::cli::Args;
use crate::error::Result;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load(args: &Args) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&Self::default_config_path()).required(false))
            // Override with environment variables (prefix: CCACHE_EXPORTER_)
            .add_source(Environment::with_prefix("CCACHE_EXPORTER").separator("_"))
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.apply_overrides(args)?;

        Ok(config)
    }

    fn apply_overrides(&mut self, args: &Args) -> Result<()> {
        if let Some(listen_addr) = &args.listen_addr {
            let (host, port) = listen_addr.rsplit_once(':').ok_or_else(|| {
                config::ConfigError::Message(format!(
                    "invalid listen address {listen_addr:?}, expected host:port"
                ))
            })?;

            self.server.host = host.to_string();
            self.server.port = port.parse().map_err(|_| {
                config::ConfigError::Message(format!("invalid listen port {port:?}"))
            })?;
        }

        if let Some(binary_path) = &args.ccache_binary_path {
            self.ccache.binary_path = binary_path.clone();
        }

        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }

        if let Some(format) = &args.log_format {
            self.logging.format = format.clone();
        }

        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("ccache_exporter")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
