//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::gateway::{HttpGatewayConfig, DEFAULT_API_BASE};
use crate::model::LabelZone;
use crate::projection::chart::{
    ChartProjector, DEFAULT_DATE_FORMAT, DEFAULT_SERIES_LABEL, DEFAULT_WINDOW,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Usage API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset leaves the HTTP client's default behavior
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Chart projection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_window")]
    pub window: usize,

    #[serde(default = "default_series_label")]
    pub series_label: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// `+HH:MM` / `-HH:MM`; unset means the system's local time zone
    #[serde(default)]
    pub utc_offset: Option<String>,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_series_label() -> String {
    DEFAULT_SERIES_LABEL.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            series_label: default_series_label(),
            date_format: default_date_format(),
            utc_offset: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// The first existing file that parses wins. Unreadable or malformed
    /// files are logged and skipped.
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("energy-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/energy-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        Self::load_first(config_paths.iter().flatten(), |key| std::env::var(key).ok())
    }

    fn load_first<'a>(
        paths: impl IntoIterator<Item = &'a PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        for path in paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(mut config) => {
                        config.apply_overrides(&var);
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        let mut config = Config::default();
        config.apply_overrides(var);
        config
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("ENERGY_DASHBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("ENERGY_DASHBOARD_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.api.request_timeout_secs = Some(secs);
            }
        }

        // Chart overrides
        if let Some(window) = var("ENERGY_DASHBOARD_CHART_WINDOW") {
            if let Ok(window) = window.parse() {
                self.chart.window = window;
            }
        }
        if let Some(offset) = var("ENERGY_DASHBOARD_UTC_OFFSET") {
            self.chart.utc_offset = Some(offset);
        }

        // Logging overrides
        if let Some(level) = var("ENERGY_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ENERGY_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// HTTP gateway settings
    pub fn gateway_config(&self) -> HttpGatewayConfig {
        HttpGatewayConfig {
            base_url: self.api.base_url.clone(),
            request_timeout: self.api.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Chart projector built from the `[chart]` section
    pub fn chart_projector(&self) -> ConfigResult<ChartProjector> {
        let zone = match self.chart.utc_offset.as_deref() {
            None => LabelZone::Local,
            Some(raw) => LabelZone::parse_offset(raw).ok_or_else(|| ConfigError::Invalid {
                field: "chart.utc_offset",
                error: format!("expected +HH:MM or -HH:MM, got {:?}", raw),
            })?,
        };

        ChartProjector::new()
            .window(self.chart.window)
            .series_label(self.chart.series_label.clone())
            .zone(zone)
            .date_format(self.chart.date_format.clone())
            .map_err(|e| ConfigError::Invalid {
                field: "chart.date_format",
                error: e.to_string(),
            })
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {field}: {error}")]
    Invalid { field: &'static str, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Energy Dashboard Configuration
#
# Environment variables override these settings:
# - ENERGY_DASHBOARD_API_URL
# - ENERGY_DASHBOARD_REQUEST_TIMEOUT_SECS
# - ENERGY_DASHBOARD_CHART_WINDOW
# - ENERGY_DASHBOARD_UTC_OFFSET
# - ENERGY_DASHBOARD_LOG_LEVEL
# - ENERGY_DASHBOARD_LOG_FORMAT

[api]
# Usage API base URL
base_url = "http://localhost:8000"

# Request timeout in seconds (unset: no timeout beyond the HTTP client's default)
# request_timeout_secs = 30

[chart]
# Number of most recent points in the bar chart
window = 20

# Series name shown in the legend
series_label = "Usage (MWh)"

# strftime pattern for the date labels
date_format = "%-m/%-d/%Y"

# Fixed UTC offset for date labels (unset: local time zone)
# utc_offset = "+00:00"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
