//! Fallback ("home" server) configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::error::ConfigError;
use crate::fallback::FallbackList;

/// Which servers count as "home" and in what order they are tried
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Ordered fallback list. Order is priority; membership means "home".
    pub attempt_connection_order: Vec<String>,
    /// Per virtual host overrides of the try order (hosts match ignoring case)
    pub forced_hosts: HashMap<String, Vec<String>>,
}

impl FallbackConfig {
    /// The ordered fallback list used for "already home" checks
    pub fn fallback_list(&self) -> FallbackList {
        FallbackList::new(self.attempt_connection_order.clone())
    }

    /// Try order for a client that joined through `virtual_host`.
    ///
    /// A forced host with an empty list falls back to the global order.
    pub fn try_order_for(&self, virtual_host: Option<&str>) -> &[String] {
        virtual_host
            .and_then(|host| {
                self.forced_hosts
                    .iter()
                    .find(|(forced, _)| forced.eq_ignore_ascii_case(host))
                    .map(|(_, servers)| servers)
            })
            .filter(|servers| !servers.is_empty())
            .unwrap_or(&self.attempt_connection_order)
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            attempt_connection_order: vec!["lobby".to_string()],
            forced_hosts: HashMap::new(),
        }
    }
}

/// Validate that every name in the fallback and forced-host lists is a
/// declared server, and that no two forced hosts differ only by case.
pub fn validate_references(
    config: &FallbackConfig,
    is_declared: impl Fn(&str) -> bool,
) -> Result<(), ConfigError> {
    for (i, name) in config.attempt_connection_order.iter().enumerate() {
        if !is_declared(name) {
            return Err(ConfigError::UnknownServer {
                field: format!("fallback.attempt_connection_order[{}]", i),
                server: name.clone(),
            });
        }
    }

    let mut hosts = std::collections::HashSet::new();
    for (host, servers) in &config.forced_hosts {
        if !hosts.insert(host.to_ascii_lowercase()) {
            return Err(ConfigError::Validation {
                field: format!("fallback.forced_hosts.\"{}\"", host),
                message: "virtual host is declared more than once".to_string(),
            });
        }
        for name in servers {
            if !is_declared(name) {
                return Err(ConfigError::UnknownServer {
                    field: format!("fallback.forced_hosts.\"{}\"", host),
                    server: name.clone(),
                });
            }
        }
    }

    Ok(())
}
