use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the target entered the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationSource {
    /// Declared in the `[[servers]]` section of the config file
    Static,
    /// Registered at runtime by the host proxy
    Runtime,
}

/// An addressable backend server a client can be routed to.
///
/// Names are unique within a [`Registry`](super::Registry) and compared
/// case-insensitively, so `Lobby` and `lobby` refer to the same target.
///
/// # Examples
///
/// ```
/// use hub::registry::Target;
///
/// let target = Target::new("lobby", "127.0.0.1:30066");
/// assert_eq!(target.name, "lobby");
/// assert!(target.has_same_name("LOBBY"));
/// assert_eq!(target, Target::new("Lobby", "127.0.0.1:30066"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Unique server name
    pub name: String,
    /// Address the proxy connects to (host:port)
    pub address: String,
    /// How this target was registered
    pub source: RegistrationSource,
    /// When the target was registered
    pub registered_at: DateTime<Utc>,
}

impl Target {
    /// Create a runtime-registered target.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            source: RegistrationSource::Runtime,
            registered_at: Utc::now(),
        }
    }

    /// Create a target declared in configuration.
    pub fn from_config(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            source: RegistrationSource::Static,
            ..Self::new(name, address)
        }
    }

    /// Whether `name` refers to this target (case-insensitive).
    pub fn has_same_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Targets are equal when they name the same server at the same address.
/// Registration metadata is ignored.
impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.has_same_name(&other.name) && self.address == other.address
    }
}

impl Eq for Target {}
