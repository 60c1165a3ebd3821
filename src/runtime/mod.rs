//! In-memory proxy runtime.
//!
//! Stands in for the host proxy: keeps the connected clients, answers
//! connection requests from a script instead of a wire protocol, and wires
//! the hub command from a [`HubConfig`].

mod scripted;

pub use scripted::ScriptedRequester;

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::command::HubCommand;
use crate::config::HubConfig;
use crate::fallback::{AttemptDriver, FallbackOrchestrator, FallbackPolicy};
use crate::messages::{MessageSink, TranslationCatalog};
use crate::permission::ConfigPermissions;
use crate::registry::{Registry, RegistryError, Target};
use crate::session::{ConnectedClient, Session};

/// Connected clients, by id
#[derive(Debug, Default)]
pub struct ClientDirectory {
    clients: DashMap<Uuid, Arc<ConnectedClient>>,
}

impl ClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, client: Arc<ConnectedClient>) {
        self.clients.insert(client.id(), client);
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<ConnectedClient>> {
        self.clients.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, id: Uuid) -> Option<Arc<ConnectedClient>> {
        self.clients.remove(&id).map(|(_, client)| client)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// Load the `[[servers]]` section into a fresh registry
pub fn load_servers_from_config(config: &HubConfig) -> Result<Registry, RegistryError> {
    let registry = Registry::new();
    for server in &config.servers {
        registry.register(Target::from_config(&server.name, &server.address))?;
        tracing::debug!(
            name = %server.name,
            address = %server.address,
            "Loaded static server from config"
        );
    }
    Ok(registry)
}

/// Everything needed to run the hub command against in-memory clients
pub struct HubRuntime {
    pub config: Arc<HubConfig>,
    pub registry: Arc<Registry>,
    pub clients: Arc<ClientDirectory>,
    pub catalog: Arc<TranslationCatalog>,
    pub command: HubCommand,
}

impl HubRuntime {
    /// Wire registry, requester, orchestrator and command from `config`.
    ///
    /// Feedback goes to `sink`.
    pub fn from_config(
        config: HubConfig,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self, RegistryError> {
        let config = Arc::new(config);
        let registry = Arc::new(load_servers_from_config(&config)?);
        let clients = Arc::new(ClientDirectory::new());
        let catalog = Arc::new(TranslationCatalog::with_overrides(&config.messages));

        let requester = ScriptedRequester::new(Arc::clone(&clients), config.simulation.clone());
        let driver =
            AttemptDriver::new(Arc::new(requester)).with_timeout(config.connection.timeout());
        let orchestrator = FallbackOrchestrator::new(
            FallbackPolicy::new(config.fallback.fallback_list()),
            driver,
            catalog.clone(),
            sink,
        );
        let permissions = ConfigPermissions::new(config.permissions.clone());
        let command = HubCommand::new(Arc::new(orchestrator), Arc::new(permissions));

        Ok(Self {
            config,
            registry,
            clients,
            catalog,
            command,
        })
    }

    /// Create a client and register it in the directory
    pub fn connect_client(&self, username: &str) -> Arc<ConnectedClient> {
        self.admit(self.client_builder(username))
    }

    /// Register an already-built client
    pub fn admit(&self, client: ConnectedClient) -> Arc<ConnectedClient> {
        let client = Arc::new(client);
        self.clients.insert(Arc::clone(&client));
        client
    }

    /// Build a client bound to this runtime's registry and fallback config
    pub fn client_builder(&self, username: &str) -> ConnectedClient {
        ConnectedClient::new(
            username,
            Arc::clone(&self.registry),
            Arc::new(self.config.fallback.clone()),
        )
    }
}
