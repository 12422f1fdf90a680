//! # Configuration
//!
//! Application configuration loading and management.
//!
//! # Configuration Sources
//!
//! Configuration is loaded in the following order (later sources override earlier):
//! 1. Default values
//! 2. Configuration file (if exists)
//! 3. Environment variables (prefixed with `PFE_DASHBOARD_`)
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PFE_DASHBOARD_CONFIG_FILE` | TOML config file | `config.toml` |
//! | `PFE_DASHBOARD_REST_HOST` | REST server host | `0.0.0.0` |
//! | `PFE_DASHBOARD_REST_PORT` | REST server port | `8080` |
//! | `PFE_DASHBOARD_LOG_LEVEL` | Log level | `info` |
//! | `PFE_DASHBOARD_LOG_FORMAT` | Log format (json/pretty) | `json` |
//! | `PFE_DASHBOARD_DATABASE_URL` | Postgres URL | `postgres://localhost/pfe_dashboard` |
//! | `PFE_DASHBOARD_JWT_SECRET` | HS256 secret for session tokens | none |
//! | `PFE_DASHBOARD_SESSION_COOKIE` | Session cookie name | `session_token` |
//! | `PFE_DASHBOARD_STRICT_EMPTY_PAGES` | 404 on empty trade pages | `false` |
//! | `PFE_DASHBOARD_MAX_PAGE_SIZE` | Upper bound on `limit` | `5000` |
//!
//! # Examples
//!
//! ```ignore
//! use pfe_dashboard::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! println!("REST server: {}", config.rest.socket_addr()?);
//! ```

use crate::api::middleware::auth::AuthConfig;
use crate::application::dto::PagingPolicy;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "PFE_DASHBOARD_";

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse configuration.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Invalid configuration value.
    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// REST/HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Server host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_rest_port")]
    pub port: u16,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_rest_port(),
        }
    }
}

impl RestConfig {
    /// Returns the socket address for the REST server.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::invalid("rest.host:port", format!("{e}")))
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (structured logging).
    #[default]
    Json,
    /// Pretty format (human-readable).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include target (module path) in logs.
    #[serde(default = "default_true")]
    pub include_target: bool,

    /// Include the current span list in JSON logs.
    #[serde(default = "default_true")]
    pub include_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Json,
            include_target: true,
            include_spans: true,
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum connection pool size.
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,

    /// Minimum connection pool size.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds.
    #[serde(default = "default_connection_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_pool_size(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connection_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// REST server configuration.
    #[serde(default)]
    pub rest: RestConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session token validation.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Paging rules for the trade endpoints.
    #[serde(default)]
    pub data: PagingPolicy,
}

impl AppConfig {
    /// Loads configuration from environment variables and optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let config_path = std::env::var(format!("{ENV_PREFIX}CONFIG_FILE"))
            .unwrap_or_else(|_| "config.toml".to_string());

        if Path::new(&config_path).exists() {
            config = Self::from_file(&config_path)?;
        }

        config.apply_overrides(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())?;

        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies overrides looked up by unprefixed key (e.g. `REST_PORT`).
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean override does not parse.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // REST configuration
        if let Some(host) = lookup("REST_HOST") {
            self.rest.host = host;
        }
        if let Some(port) = lookup("REST_PORT") {
            self.rest.port = parse_override("REST_PORT", &port)?;
        }

        // Logging configuration
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.log.format = match format.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                _ => LogFormat::Json,
            };
        }

        // Database configuration
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }

        // Auth configuration
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.secret = secret;
        }
        if let Some(cookie) = lookup("SESSION_COOKIE") {
            self.auth.session_cookie = cookie;
        }

        // Data access configuration
        if let Some(strict) = lookup("STRICT_EMPTY_PAGES") {
            self.data.strict_empty_pages = parse_override("STRICT_EMPTY_PAGES", &strict)?;
        }
        if let Some(max) = lookup("MAX_PAGE_SIZE") {
            self.data.max_page_size = parse_override("MAX_PAGE_SIZE", &max)?;
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rest.socket_addr()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "log.level",
                format!(
                    "invalid log level '{}', must be one of: {:?}",
                    self.log.level, valid_levels
                ),
            ));
        }

        if self.data.max_page_size == 0 {
            return Err(ConfigError::invalid(
                "data.max_page_size",
                "must be greater than 0",
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::invalid(
                "database.min_connections",
                "must not exceed database.max_connections",
            ));
        }

        if self.auth.secret.trim().is_empty() {
            return Err(ConfigError::invalid("auth.secret", "must not be empty"));
        }

        if self.auth.session_cookie.is_empty() {
            return Err(ConfigError::invalid(
                "auth.session_cookie",
                "must not be empty",
            ));
        }

        Ok(())
    }
}

fn parse_override<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(&format!("{ENV_PREFIX}{key}"), format!("{e}")))
}

// ============================================================================
// Default Value Functions
// ============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_rest_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost/pfe_dashboard".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}
