//! Test doubles for the fallback core

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use super::{ConnectError, ConnectionOutcome, ConnectionRequester};
use crate::registry::Target;
use crate::session::{Locale, Session};

/// Session with fixed answers
pub struct StubSession {
    id: Uuid,
    current: Option<Target>,
    next: Option<Target>,
    locale: Option<Locale>,
}

impl StubSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current: None,
            next: None,
            locale: None,
        }
    }

    pub fn on(mut self, server: &str) -> Self {
        self.current = Some(Target::new(server, "127.0.0.1:1"));
        self
    }

    pub fn recommending(mut self, server: &str) -> Self {
        self.next = Some(Target::new(server, "127.0.0.1:2"));
        self
    }

    pub fn speaking(mut self, tag: &str) -> Self {
        self.locale = Some(Locale::new(tag));
        self
    }
}

impl Session for StubSession {
    fn id(&self) -> Uuid {
        self.id
    }

    fn username(&self) -> &str {
        "stub"
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

/// What a [`StubRequester`] does on connect
#[derive(Clone)]
pub enum StubBehavior {
    Reply(ConnectionOutcome),
    Fail(ConnectError),
    Panic,
    Sleep(Duration),
}

/// Requester that records calls and replays a fixed behaviour
pub struct StubRequester {
    behavior: StubBehavior,
    calls: AtomicUsize,
    targets: Mutex<Vec<String>>,
}

impl StubRequester {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
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
impl ConnectionRequester for StubRequester {
    async fn connect(
        &self,
        _session: Arc<dyn Session>,
        target: Target,
    ) -> Result<ConnectionOutcome, ConnectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.targets.lock().unwrap().push(target.name.clone());
        match &self.behavior {
            StubBehavior::Reply(outcome) => Ok(outcome.clone()),
            StubBehavior::Fail(err) => Err(err.clone()),
            StubBehavior::Panic => panic!("requester blew up"),
            StubBehavior::Sleep(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(ConnectionOutcome::success())
            }
        }
    }
}
