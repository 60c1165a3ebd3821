//! Shared helpers for hub integration tests.
//!
//! Builds runtimes, orchestrators and a controllable connection requester
//! so each test only states what differs.

#![allow(dead_code)]

use async_trait::async_trait;
use hub::config::{HubConfig, ServerConfig, SimulationConfig};
use hub::fallback::{
    AttemptDriver, ConnectError, ConnectionOutcome, ConnectionRequester, FallbackList,
    FallbackOrchestrator, FallbackPolicy,
};
use hub::messages::{RecordingSink, TranslationCatalog, CONNECTED, CONNECTING};
use hub::registry::{Registry, Target};
use hub::runtime::HubRuntime;
use hub::session::{ConnectedClient, Locale, Session};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Config and runtime
// =============================================================================

/// Config with the given servers, the first `homes` as the home list, and
/// no simulated latency.
pub fn config(servers: &[&str], homes: &[&str]) -> HubConfig {
    let mut config = HubConfig {
        servers: servers
            .iter()
            .enumerate()
            .map(|(i, name)| ServerConfig::new(*name, format!("127.0.0.1:{}", 30066 + i)))
            .collect(),
        simulation: SimulationConfig {
            latency_ms: 0,
            ..SimulationConfig::default()
        },
        ..HubConfig::default()
    };
    config.fallback.attempt_connection_order = homes.iter().map(|s| s.to_string()).collect();
    config
}

/// Runtime over `config` that records all feedback
pub fn runtime(config: HubConfig) -> (HubRuntime, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let runtime = HubRuntime::from_config(config, sink.clone()).unwrap();
    (runtime, sink)
}

/// A client on `server` in `runtime`
pub fn client_on(runtime: &HubRuntime, username: &str, server: &str) -> Arc<ConnectedClient> {
    let client = runtime.connect_client(username);
    client.set_connected(runtime.registry.get(server).unwrap());
    client
}

// =============================================================================
// Catalogs
// =============================================================================

/// Built-in catalog plus baseline "connecting" and "connected" entries
pub fn chatty_catalog() -> TranslationCatalog {
    let mut catalog = TranslationCatalog::builtin();
    catalog.insert(&Locale::baseline(), CONNECTING, "Connecting you to {0}...");
    catalog.insert(&Locale::baseline(), CONNECTED, "You are now on {0}.");
    catalog
}

// =============================================================================
// Sessions
// =============================================================================

/// Session with a fixed current server and recommendation
pub struct FixedSession {
    id: uuid::Uuid,
    current: Option<Target>,
    next: Option<Target>,
    locale: Option<Locale>,
}

impl FixedSession {
    pub fn new(current: Option<&str>, next: Option<&str>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            current: current.map(target),
            next: next.map(target),
            locale: None,
        }
    }

    pub fn speaking(mut self, tag: &str) -> Self {
        self.locale = Some(Locale::new(tag));
        self
    }
}

impl Session for FixedSession {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn username(&self) -> &str {
        "tester"
    }

    fn current_target(&self) -> Option<Target> {
        self.current.clone()
    }

    fn effective_locale(&self) -> Option<Locale> {
        self.locale.clone()
    }

    fn recommended_next_target(&self) -> Option<Target> {
        self.next.clone()
    }
}

pub fn target(name: &str) -> Target {
    Target::new(name, format!("{}.internal:25565", name))
}

// =============================================================================
// Requester
// =============================================================================

/// What a [`ControlledRequester`] does with each request
#[derive(Clone)]
pub enum Answer {
    Reply(ConnectionOutcome),
    Fail(ConnectError),
    /// Wait, then reply with success
    Delay(Duration),
    /// Panic inside the request task
    Crash,
}

/// Requester that answers every request the same way and records targets
pub struct ControlledRequester {
    answer: Answer,
    calls: AtomicUsize,
    targets: Mutex<Vec<String>>,
}

impl ControlledRequester {
    pub fn new(answer: Answer) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
            targets: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConnectionRequester for ControlledRequester {
    async fn connect(
        &self,
        _session: Arc<dyn Session>,
        target: Target,
    ) -> Result<ConnectionOutcome, ConnectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.targets.lock().unwrap().push(target.name.clone());

        match &self.answer {
            Answer::Reply(outcome) => Ok(outcome.clone()),
            Answer::Fail(err) => Err(err.clone()),
            Answer::Delay(wait) => {
                tokio::time::sleep(*wait).await;
                Ok(ConnectionOutcome::success())
            }
            Answer::Crash => panic!("requester crashed"),
        }
    }
}

/// Orchestrator over `homes` wired to `requester`
pub fn orchestrator(
    homes: &[&str],
    requester: Arc<ControlledRequester>,
    catalog: TranslationCatalog,
    timeout: Option<Duration>,
) -> (FallbackOrchestrator, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let orchestrator = FallbackOrchestrator::new(
        FallbackPolicy::new(FallbackList::new(
            homes.iter().map(|s| s.to_string()).collect(),
        )),
        AttemptDriver::new(requester).with_timeout(timeout),
        Arc::new(catalog),
        sink.clone(),
    );
    (orchestrator, sink)
}

/// Registry holding a target for each name
pub fn registry_with(names: &[&str]) -> Arc<Registry> {
    let registry = Registry::new();
    for name in names {
        registry.register(target(name)).unwrap();
    }
    Arc::new(registry)
}
