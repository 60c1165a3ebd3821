//! The ordered list of "home" servers

use serde::Serialize;

/// Ordered fallback list.
///
/// Order is priority; membership means "home". Membership checks ignore
/// case, matching how server names are resolved in the registry.
///
/// # Examples
///
/// ```
/// use hub::fallback::FallbackList;
///
/// let list = FallbackList::new(vec!["lobby".to_string(), "hub".to_string()]);
/// assert!(list.contains("Lobby"));
/// assert_eq!(list.rank("hub"), Some(1));
/// assert!(!list.contains("survival"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FallbackList {
    servers: Vec<String>,
}

impl FallbackList {
    pub fn new(servers: Vec<String>) -> Self {
        Self { servers }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rank(name).is_some()
    }

    /// Zero-based priority of `name`, if it is a home server
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.servers
            .iter()
            .position(|server| server.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.servers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
