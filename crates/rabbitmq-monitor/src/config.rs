// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Agent configuration.
//!
//! Loaded from a TOML file and/or built from command-line flags. Read-only
//! once a collection cycle starts.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What a collection cycle reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollectMode {
    /// Inventory and metrics.
    #[default]
    All,
    Inventory,
    Metrics,
}

impl CollectMode {
    pub fn inventory(&self) -> bool {
        matches!(self, Self::All | Self::Inventory)
    }

    pub fn metrics(&self) -> bool {
        matches!(self, Self::All | Self::Metrics)
    }
}

/// Agent configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Overrides the cluster name reported by `/api/overview`.
    #[serde(default)]
    pub cluster_name: Option<String>,

    #[serde(default)]
    pub mode: CollectMode,

    /// Pretty-print the payload.
    #[serde(default)]
    pub pretty: bool,

    /// Management API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Which queues, exchanges and vhosts to report.
    #[serde(default)]
    pub filters: FilterConfig,
}

/// Management API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_hostname")]
    pub hostname: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Use https.
    #[serde(default)]
    pub use_ssl: bool,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure_skip_verify: bool,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    15672
}

fn default_username() -> String {
    "guest".to_string()
}

fn default_password() -> String {
    "guest".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            use_ssl: false,
            insecure_skip_verify: false,
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Base URL of the management API, e.g. `http://localhost:15672`.
    pub fn base_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.hostname, self.port)
    }
}

/// Allow-lists for reported entities. Empty lists accept everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default)]
    pub queues_regexes: Vec<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
    #[serde(default)]
    pub exchanges_regexes: Vec<String>,
    #[serde(default)]
    pub vhosts: Vec<String>,
    #[serde(default)]
    pub vhosts_regexes: Vec<String>,
}

impl AgentConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.hostname.is_empty() {
            return Err(ConfigError::Invalid("hostname must not be empty".into()));
        }
        if self.api.port == 0 {
            return Err(ConfigError::Invalid("port must not be 0".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        // regexes are checked when the filter is compiled
        crate::factory::EntityFilter::from_config(&self.filters)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_TOML: &str = r#"
cluster_name = "rabbit@prod"
mode = "inventory"
pretty = true

[api]
hostname = "broker.example.com"
port = 15671
username = "monitor"
password = "secret"
use_ssl = true
timeout_secs = 5

[filters]
queues = ["orders", "billing"]
exchanges_regexes = ["^amq\\."]
vhosts = ["/"]
"#;

    #[test]
    fn test_config_defaults() {
        let config = AgentConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config.api.hostname, "localhost");
        assert_eq!(config.api.port, 15672);
        assert_eq!(config.api.username, "guest");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.api.use_ssl);
        assert_eq!(config.mode, CollectMode::All);
        assert_eq!(config.filters, FilterConfig::default());
        assert!(config.cluster_name.is_none());
        assert_eq!(config.api.base_url(), "http://localhost:15672");
    }

    #[test]
    fn test_config_parse_all_fields() {
        let config = AgentConfig::from_toml(FULL_TOML).expect("parse full config");
        assert_eq!(config.api.hostname, "broker.example.com");
        assert_eq!(config.api.port, 15671);
        assert_eq!(config.api.username, "monitor");
        assert_eq!(config.api.password, "secret");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.base_url(), "https://broker.example.com:15671");
        assert_eq!(config.cluster_name.as_deref(), Some("rabbit@prod"));
        assert_eq!(config.mode, CollectMode::Inventory);
        assert!(config.pretty);
        assert_eq!(config.filters.queues, vec!["orders", "billing"]);
        assert_eq!(config.filters.exchanges_regexes, vec!["^amq\\."]);
        assert_eq!(config.filters.vhosts, vec!["/"]);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            AgentConfig::from_toml("[api]\nport = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AgentConfig::from_toml("[api]\ntimeout_secs = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AgentConfig::from_toml("[filters]\nqueues_regexes = [\"[\"]\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AgentConfig::from_toml("mode = \"everything\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_TOML.as_bytes()).unwrap();
        let config = AgentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.hostname, "broker.example.com");

        assert!(matches!(
            AgentConfig::from_file("/nonexistent/rabbitmq-monitor.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_collect_mode_flags() {
        assert!(CollectMode::All.inventory() && CollectMode::All.metrics());
        assert!(CollectMode::Inventory.inventory() && !CollectMode::Inventory.metrics());
        assert!(!CollectMode::Metrics.inventory() && CollectMode::Metrics.metrics());
    }
}
