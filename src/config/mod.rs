//! Configuration module for the hub
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`HUB_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use hub::config::HubConfig;
//!
//! let config = HubConfig::default();
//! assert_eq!(config.fallback.attempt_connection_order, vec!["lobby"]);
//!
//! let toml = r#"
//! [fallback]
//! attempt_connection_order = ["lobby", "factions"]
//! "#;
//! let config: HubConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.fallback.attempt_connection_order.len(), 2);
//! ```

pub mod connection;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod permissions;
pub mod server;
pub mod simulation;

pub use connection::ConnectionConfig;
pub use error::ConfigError;
pub use fallback::FallbackConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use permissions::PermissionsConfig;
pub use server::ServerConfig;
pub use simulation::{ScriptedOutcome, SimulationConfig};

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Unified configuration for the hub.
///
/// Message overrides live under `[messages.<locale>]`, keyed by message key:
///
/// ```toml
/// [messages.en]
/// "proxy.command.hub.fallback-connecting" = "Sending you to {0}..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Registered backend servers
    pub servers: Vec<ServerConfig>,
    /// Home servers and try order
    pub fallback: FallbackConfig,
    /// Connection attempt settings
    pub connection: ConnectionConfig,
    /// Hub capability grants
    pub permissions: PermissionsConfig,
    /// Translation overrides (locale → key → template)
    pub messages: HashMap<String, HashMap<String, String>>,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Scripted backend behaviour for `hub simulate`
    pub simulation: SimulationConfig,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            servers: server::default_servers(),
            fallback: FallbackConfig::default(),
            connection: ConnectionConfig::default(),
            permissions: PermissionsConfig::default(),
            messages: HashMap::new(),
            logging: LoggingConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl HubConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports HUB_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("HUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HUB_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(timeout) = std::env::var("HUB_CONNECT_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.connection.timeout_ms = ms;
            }
        }

        // Comma separated, e.g. HUB_ATTEMPT_ORDER=lobby,factions
        if let Ok(order) = std::env::var("HUB_ATTEMPT_ORDER") {
            let servers: Vec<String> = order
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if !servers.is_empty() {
                self.fallback.attempt_connection_order = servers;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut declared = HashSet::new();

        for (i, server) in self.servers.iter().enumerate() {
            if server.name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("servers[{}].name", i),
                    message: "name cannot be empty".to_string(),
                });
            }
            if server.address.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("servers[{}].address", i),
                    message: "address cannot be empty".to_string(),
                });
            }
            if !declared.insert(server.name.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateServer(server.name.clone()));
            }
        }

        fallback::validate_references(&self.fallback, |name| {
            declared.contains(&name.to_ascii_lowercase())
        })?;

        Ok(())
    }
}

/// Serializes tests that read or write `HUB_*` environment variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn env_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
