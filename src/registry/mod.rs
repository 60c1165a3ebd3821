//! Target Registry module.
//!
//! Provides thread-safe in-memory storage of the backend servers a client
//! can be routed to.

mod error;
mod target;

pub use error::*;
pub use target::*;

use dashmap::DashMap;

/// The Target Registry stores every known backend server.
///
/// Keys are lowercased names so lookups are case-insensitive. Uses DashMap
/// so the host runtime can register servers while invocations read them.
///
/// # Examples
///
/// ```
/// use hub::registry::{Registry, Target};
///
/// let registry = Registry::new();
/// registry.register(Target::new("lobby", "127.0.0.1:30066")).unwrap();
///
/// assert_eq!(registry.server_count(), 1);
/// assert!(registry.get("Lobby").is_some());
/// ```
#[derive(Debug)]
pub struct Registry {
    servers: DashMap<String, Target>,
}

impl Registry {
    /// Create a new empty Registry.
    pub fn new() -> Self {
        Self {
            servers: DashMap::new(),
        }
    }

    /// Register a new server.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateServer` if a server with the same
    /// name (ignoring case) is already registered, and
    /// `RegistryError::EmptyName` for a blank name.
    pub fn register(&self, target: Target) -> Result<(), RegistryError> {
        if target.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let key = target.name.to_ascii_lowercase();
        if self.servers.contains_key(&key) {
            return Err(RegistryError::DuplicateServer(target.name));
        }

        tracing::debug!(server = %target.name, address = %target.address, "Registered server");
        self.servers.insert(key, target);
        Ok(())
    }

    /// Remove a server from the registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ServerNotFound` if no server has this name.
    pub fn unregister(&self, name: &str) -> Result<Target, RegistryError> {
        self.servers
            .remove(&name.to_ascii_lowercase())
            .map(|(_, target)| target)
            .ok_or_else(|| RegistryError::ServerNotFound(name.to_string()))
    }

    /// Look up a server by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Target> {
        self.servers
            .get(&name.to_ascii_lowercase())
            .map(|entry| entry.value().clone())
    }

    /// All registered servers, sorted by name.
    pub fn all(&self) -> Vec<Target> {
        let mut servers: Vec<Target> = self
            .servers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        servers.sort_by(|a, b| a.name.cmp(&b.name));
        servers
    }

    /// Number of registered servers.
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
