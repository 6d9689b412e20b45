//! Configuration management for citenet services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{AppError, Result};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Where the corpus is fetched from
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Graph layout configuration
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Observability configuration
    #[serde(default)]
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
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Primary database URL
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Read replica URL (optional, falls back to primary)
    pub read_url: Option<String>,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

/// Kind of corpus source
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    Database,
    File,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// database (papers table) or file (JSON array of records)
    #[serde(default = "default_corpus_kind")]
    pub source: CorpusKind,

    /// Path of the JSON corpus when `source = "file"`
    pub path: Option<String>,
}

/// Logical canvas and placement parameters for the layout engine
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width
    #[serde(default = "default_width")]
    pub width: f64,

    /// Canvas height
    #[serde(default = "default_height")]
    pub height: f64,

    /// Total margin per axis; half of it is left on each side
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Upper bound of the circle radius for small graphs
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,

    /// Graphs with at most this many nodes are laid out on a circle
    #[serde(default = "default_circular_threshold")]
    pub circular_threshold: usize,

    /// Grid jitter bound as a fraction of the cell dimension
    #[serde(default = "default_jitter_fraction")]
    pub jitter_fraction: f64,

    /// Seed for the jitter generator; entropy when unset
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 serves /metrics on the API port)
    #[serde(default)]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_database_url() -> String { "postgres://localhost/citenet".to_string() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 300 }
fn default_corpus_kind() -> CorpusKind { CorpusKind::Database }
fn default_width() -> f64 { 800.0 }
fn default_height() -> f64 { 600.0 }
fn default_margin() -> f64 { 100.0 }
fn default_max_radius() -> f64 { 250.0 }
fn default_circular_threshold() -> usize { 12 }
fn default_jitter_fraction() -> f64 { 0.15 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_service_name() -> String { "citenet".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            read_url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source: default_corpus_kind(),
            path: None,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            max_radius: default_max_radius(),
            circular_threshold: default_circular_threshold(),
            jitter_fraction: default_jitter_fraction(),
            seed: None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: 0,
            service_name: default_service_name(),
        }
    }
}

impl LayoutConfig {
    /// Reject canvases the layout engine cannot place nodes on
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(AppError::Configuration {
                message: format!(
                    "layout canvas must be positive, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        if self.margin < 0.0 || self.margin >= self.width.min(self.height) {
            return Err(AppError::Configuration {
                message: format!("layout margin {} does not fit the canvas", self.margin),
            });
        }
        if !(0.0..0.5).contains(&self.jitter_fraction) {
            return Err(AppError::Configuration {
                message: format!(
                    "layout jitter_fraction must be in [0, 0.5), got {}",
                    self.jitter_fraction
                ),
            });
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__LAYOUT__SEED=42
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> std::result::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            corpus: CorpusConfig::default(),
            layout: LayoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
