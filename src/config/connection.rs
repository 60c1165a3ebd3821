//! Connection attempt configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the connection attempt driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Upper bound on a single connection attempt in milliseconds (0 = no bound)
    pub timeout_ms: u64,
}

impl ConnectionConfig {
    /// Attempt timeout, or `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}
