//! Backend server declarations

use serde::{Deserialize, Serialize};

/// A backend server declared in the `[[servers]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Unique server name
    pub name: String,
    /// Address the proxy connects to (host:port)
    pub address: String,
}

impl ServerConfig {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Servers shipped in the default configuration.
pub(crate) fn default_servers() -> Vec<ServerConfig> {
    vec![
        ServerConfig::new("lobby", "127.0.0.1:30066"),
        ServerConfig::new("factions", "127.0.0.1:30067"),
        ServerConfig::new("minigames", "127.0.0.1:30068"),
    ]
}
