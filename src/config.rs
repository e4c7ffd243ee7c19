use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Default configuration constants
const DEFAULT_LIMIT: u64 = 5;
const DEFAULT_HEADER_SUFFIX: &str = "News";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub news: NewsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsConfig {
    /// Article count used when a request omits `limit`.
    pub default_limit: usize,
    /// Appended to the topic when building the carousel header ("<topic> <suffix>").
    pub header_suffix: String,
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Default values
        settings = settings
            .set_default("news.default_limit", DEFAULT_LIMIT)?
            .set_default("news.header_suffix", DEFAULT_HEADER_SUFFIX)?;

        // Load from config file if provided
        if let Some(path) = config_path
            && Path::new(path).exists()
        {
            settings = settings.add_source(config::File::with_name(path));
        }

        // Override with environment variables (NEWS_NEWS__DEFAULT_LIMIT, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("NEWS")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news: NewsConfig {
                default_limit: DEFAULT_LIMIT as usize,
                header_suffix: DEFAULT_HEADER_SUFFIX.to_string(),
            },
        }
    }
}
