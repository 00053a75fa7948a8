//! ccache configuration model and `--show-config` parsing.

use std::path::Path;

use serde::Serialize;

use crate::ccache::size::parse_metric_size;
use crate::error::Result;

/// Name of the configuration file ccache keeps inside its cache directory.
const PRIMARY_CONFIG_FILE: &str = "ccache.conf";

/// Cache location and size-limit settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Configuration {
    pub cache_directory: String,
    pub primary_config: String,
    pub max_cache_size: String,
    pub max_cache_size_bytes: u64,
}

fn is_field_separator(c: char) -> bool {
    c.is_whitespace() || c == '=' || c == '(' || c == ')'
}

/// Parses ccache configuration as dumped by `ccache --show-config`.
///
/// Each line has the shape `(<source>) <key> = <value>`, with the value of
/// `max_size` possibly split from its unit suffix by a space. Lines that do
/// not carry a recognized key are ignored.
pub fn parse_show_config(text: &str) -> Result<Configuration> {
    let mut configuration = Configuration::default();

    for line in text.lines() {
        let fields: Vec<&str> = line
            .split(is_field_separator)
            .filter(|field| !field.is_empty())
            .collect();
        if fields.len() < 3 {
            continue;
        }

        match fields[1] {
            "cache_dir" => {
                configuration.cache_directory = fields[2].to_string();
                configuration.primary_config = Path::new(fields[2])
                    .join(PRIMARY_CONFIG_FILE)
                    .to_string_lossy()
                    .into_owned();
            }

            "max_size" => {
                let raw = if fields.len() == 4 {
                    format!("{}{}", fields[2], fields[3])
                } else {
                    fields[2].to_string()
                };

                let mut sanitized = raw.to_uppercase().replace(' ', "");
                if !sanitized.ends_with('B') {
                    sanitized.push('B');
                }

                configuration.max_cache_size_bytes = parse_metric_size(&sanitized)?;
                configuration.max_cache_size = sanitized;
            }

            _ => {}
        }
    }

    Ok(configuration)
}
