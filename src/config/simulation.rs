//! Scripted backend behaviour for the `simulate` command

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a scripted server does when a client connects to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedOutcome {
    /// Accept the client
    #[default]
    Success,
    /// Client is already on the server
    AlreadyConnected,
    /// Another connection to the server is still in flight
    InProgress,
    /// The switch was cancelled by the proxy
    Cancelled,
    /// The server kicked the client during the handshake
    Disconnected,
    /// Transport-level failure
    Unreachable,
    /// Never answer (the driver timeout decides)
    Hang,
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Artificial connect latency in milliseconds
    pub latency_ms: u64,
    /// Outcome per server name (matched ignoring case); unlisted servers succeed
    pub outcomes: HashMap<String, ScriptedOutcome>,
    /// Reason text a server attaches to a refused connection
    pub reasons: HashMap<String, String>,
}

impl SimulationConfig {
    pub fn outcome_for(&self, server: &str) -> ScriptedOutcome {
        lookup(&self.outcomes, server).copied().unwrap_or_default()
    }

    pub fn reason_for(&self, server: &str) -> Option<String> {
        lookup(&self.reasons, server).cloned()
    }
}

fn lookup<'a, V>(entries: &'a HashMap<String, V>, server: &str) -> Option<&'a V> {
    entries
        .get(server)
        .or_else(|| {
            entries
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(server))
                .map(|(_, value)| value)
        })
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            outcomes: HashMap::new(),
            reasons: HashMap::new(),
        }
    }
}
