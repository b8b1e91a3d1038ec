use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::errors::{AppError, AppResult};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

/// Top-level configuration for a combine run.
///
/// Loaded once at startup and passed by value into the combiner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Playlist URLs, combined in this order
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    #[serde(default)]
    pub epg: EpgConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpgConfig {
    /// Written verbatim into the `x-tvg-url` header attribute
    #[serde(default = "default_epg_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total time allowed for one playlist request
    #[serde(with = "duration_serde::duration", default = "default_request_timeout")]
    pub timeout: Duration,
    #[serde(with = "duration_serde::duration", default = "default_connect_timeout")]
    pub connect_timeout: Duration,
    /// Overrides the `m3u-combiner/<version>` user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Number of sources fetched at once; output order is unaffected
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

fn default_sources() -> Vec<String> {
    DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
}

fn default_epg_url() -> String {
    DEFAULT_EPG_URL.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn default_fetch_concurrency() -> usize {
    DEFAULT_FETCH_CONCURRENCY
}

impl Default for EpgConfig {
    fn default() -> Self {
        Self {
            url: default_epg_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: None,
            fetch_concurrency: default_fetch_concurrency(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            epg: EpgConfig::default(),
            output: OutputConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl HttpConfig {
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        })
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    /// Read `config_file`, or create it with defaults when it does not exist.
    pub fn load_from_file(config_file: impl AsRef<Path>) -> AppResult<Self> {
        let config_file = config_file.as_ref();
        if config_file.exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents).map_err(|e| {
                AppError::configuration(format!("Invalid config file {}: {e}", config_file.display()))
            })
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)
                .map_err(|e| AppError::configuration(format!("Failed to serialize defaults: {e}")))?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file.display());
            Ok(default_config)
        }
    }

    /// Check settings that would make a run pointless or impossible.
    ///
    /// Individual source URLs are not checked here; a malformed one is skipped
    /// at fetch time like any other unavailable source.
    pub fn validate(&self) -> AppResult<()> {
        if self.sources.is_empty() {
            return Err(AppError::configuration("At least one playlist source is required"));
        }

        if self.epg.url.trim().is_empty() {
            return Err(AppError::configuration("EPG url must not be empty"));
        }

        if self.http.fetch_concurrency == 0 {
            return Err(AppError::configuration("fetch_concurrency must be at least 1"));
        }

        if self.http.timeout.is_zero() {
            return Err(AppError::configuration("HTTP timeout must be greater than zero"));
        }

        Ok(())
    }
}
