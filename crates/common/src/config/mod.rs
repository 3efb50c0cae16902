//! Configuration management for ScholarGraph services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values
//!
//! The SerpApi credential is only ever read from configuration or the
//! environment; it is never embedded in source.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Scholar search collaborator configuration
    pub scholar: ScholarConfig,

    /// Graph rendering configuration
    pub render: RenderConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScholarConfig {
    /// SerpApi key; required at startup for readiness
    pub api_key: Option<String>,

    /// API base URL (overridable for tests)
    #[serde(default = "default_scholar_base_url")]
    pub base_url: String,

    /// Search engine identifier
    #[serde(default = "default_scholar_engine")]
    pub engine: String,

    /// Number of results to request per query
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    /// Outbound request timeout in seconds
    #[serde(default = "default_scholar_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries for transient upstream failures
    #[serde(default = "default_scholar_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Rendered figure width in pixels
    #[serde(default = "default_figure_width")]
    pub width: u32,

    /// Rendered figure height in pixels
    #[serde(default = "default_figure_height")]
    pub height: u32,

    /// Optional layout seed; unset means a fresh layout per render
    pub layout_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_request_timeout() -> u64 { 30 }
fn default_shutdown_timeout() -> u64 { 30 }
fn default_scholar_base_url() -> String { "https://serpapi.com/search".to_string() }
fn default_scholar_engine() -> String { "google_scholar".to_string() }
fn default_num_results() -> usize { 20 }
fn default_scholar_timeout() -> u64 { 10 }
fn default_scholar_retries() -> u32 { 3 }
fn default_figure_width() -> u32 { 1000 }
fn default_figure_height() -> u32 { 1000 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "scholargraph".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__SCHOLAR__API_KEY=...
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Get the outbound scholar request timeout as Duration
    pub fn scholar_timeout(&self) -> Duration {
        Duration::from_secs(self.scholar.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
                shutdown_timeout_secs: default_shutdown_timeout(),
            },
            scholar: ScholarConfig {
                api_key: None,
                base_url: default_scholar_base_url(),
                engine: default_scholar_engine(),
                num_results: default_num_results(),
                timeout_secs: default_scholar_timeout(),
                max_retries: default_scholar_retries(),
            },
            render: RenderConfig {
                width: default_figure_width(),
                height: default_figure_height(),
                layout_seed: None,
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
                metrics_port: default_metrics_port(),
                service_name: default_service_name(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.scholar.engine, "google_scholar");
        assert_eq!(config.scholar.num_results, 20);
        assert!(config.scholar.api_key.is_none());
    }

    #[test]
    fn test_scholar_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.scholar_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_layout_seed_defaults_unset() {
        let config = AppConfig::default();
        assert!(config.render.layout_seed.is_none());
    }
}
