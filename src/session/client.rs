use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::{Locale, Session};
use crate::config::FallbackConfig;
use crate::registry::{Registry, Target};

/// Connection bookkeeping for one client
#[derive(Debug, Default)]
struct ConnectionState {
    /// Server the client is routed to
    connected: Option<Target>,
    /// Server a connection is currently being made to
    in_flight: Option<Target>,
    /// Try order, resolved on first use
    servers_to_try: Option<Vec<String>>,
    /// Cursor into `servers_to_try`
    try_index: usize,
}

/// A client connected to the proxy.
///
/// Owns the connection-manager state the next-server recommendation is
/// computed from. The fallback core only sees it through [`Session`].
///
/// # Examples
///
/// ```
/// use hub::config::FallbackConfig;
/// use hub::registry::{Registry, Target};
/// use hub::session::{ConnectedClient, Session};
/// use std::sync::Arc;
///
/// let registry = Arc::new(Registry::new());
/// registry.register(Target::new("lobby", "127.0.0.1:30066")).unwrap();
/// registry.register(Target::new("survival", "127.0.0.1:30067")).unwrap();
///
/// let fallback = Arc::new(FallbackConfig::default());
/// let client = ConnectedClient::new("alice", registry.clone(), fallback);
/// client.set_connected(registry.get("survival").unwrap());
///
/// assert_eq!(client.recommended_next_target().unwrap().name, "lobby");
/// ```
#[derive(Debug)]
pub struct ConnectedClient {
    id: Uuid,
    username: String,
    locale: Option<Locale>,
    virtual_host: Option<String>,
    registry: Arc<Registry>,
    fallback: Arc<FallbackConfig>,
    state: Mutex<ConnectionState>,
}

impl ConnectedClient {
    pub fn new(
        username: impl Into<String>,
        registry: Arc<Registry>,
        fallback: Arc<FallbackConfig>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            locale: None,
            virtual_host: None,
            registry,
            fallback,
            state: Mutex::new(ConnectionState::default()),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Hostname the client used to join; selects a forced-host try order
    pub fn with_virtual_host(mut self, host: impl Into<String>) -> Self {
        self.virtual_host = Some(host.into());
        self
    }

    pub fn virtual_host(&self) -> Option<&str> {
        self.virtual_host.as_deref()
    }

    /// Record a completed switch to `target`.
    ///
    /// Clears a matching in-flight connection and rewinds the try cursor.
    pub fn set_connected(&self, target: Target) {
        let mut state = self.state();
        if state
            .in_flight
            .as_ref()
            .is_some_and(|t| t.has_same_name(&target.name))
        {
            state.in_flight = None;
        }
        state.try_index = 0;
        state.connected = Some(target);
    }

    /// Mark a connection to `target` as in flight
    pub fn set_in_flight(&self, target: Target) {
        self.state().in_flight = Some(target);
    }

    pub fn clear_in_flight(&self) {
        self.state().in_flight = None;
    }

    /// Drop the backend connection entirely
    pub fn disconnect(&self) {
        let mut state = self.state();
        state.connected = None;
        state.in_flight = None;
    }

    pub fn in_flight(&self) -> Option<Target> {
        self.state().in_flight.clone()
    }

    /// Next server to try, skipping `exclude`, the connected server and the
    /// in-flight server.
    ///
    /// Walks the try order from the persistent cursor, so repeated calls keep
    /// returning the same server until the client lands somewhere. Returns
    /// `None` when the order is exhausted or names an unregistered server.
    pub fn next_server_to_try(&self, exclude: Option<&Target>) -> Option<Target> {
        let mut state = self.state();

        let servers = state
            .servers_to_try
            .get_or_insert_with(|| {
                self.fallback
                    .try_order_for(self.virtual_host.as_deref())
                    .to_vec()
            })
            .clone();

        let skip = |name: &str| {
            [exclude, state.connected.as_ref(), state.in_flight.as_ref()]
                .into_iter()
                .flatten()
                .any(|t| t.has_same_name(name))
        };

        let found = servers
            .iter()
            .enumerate()
            .skip(state.try_index)
            .find(|(_, name)| !skip(name))
            .map(|(i, name)| (i, name.clone()));

        let (index, name) = found?;
        state.try_index = index;
        drop(state);

        self.registry.get(&name)
    }

    fn state(&self) -> MutexGuard<'_, ConnectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Session for ConnectedClient {
    fn id(&self) -> Uuid {
        self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn current_target(&self) -> Option<Target> {
        self.state().connected.clone()
    }

    fn effective_locale(&self) -> Option<Locale> {
        self.locale.clone()
    }

    fn recommended_next_target(&self) -> Option<Target> {
        self.next_server_to_try(None)
    }
}
