use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::ClientDirectory;
use crate::config::{ScriptedOutcome, SimulationConfig};
use crate::fallback::{ConnectError, ConnectionOutcome, ConnectionRequester, ConnectionStatus};
use crate::registry::Target;
use crate::session::{ConnectedClient, Session};

/// Clears the client's in-flight marker when the request ends, including
/// when the request future is dropped by a timeout.
struct InFlightGuard(Arc<ConnectedClient>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.clear_in_flight();
    }
}

/// Connection requester that answers from [`SimulationConfig`].
///
/// Mirrors the host proxy's pre-checks: a client already on the target gets
/// `AlreadyConnected`, a client with a connection in flight gets
/// `ConnectionInProgress`. Successful switches update the client's current
/// server.
pub struct ScriptedRequester {
    clients: Arc<ClientDirectory>,
    script: SimulationConfig,
}

impl ScriptedRequester {
    pub fn new(clients: Arc<ClientDirectory>, script: SimulationConfig) -> Self {
        Self { clients, script }
    }
}

#[async_trait]
impl ConnectionRequester for ScriptedRequester {
    async fn connect(
        &self,
        session: Arc<dyn Session>,
        target: Target,
    ) -> Result<ConnectionOutcome, ConnectError> {
        let client = self
            .clients
            .get(session.id())
            .ok_or_else(|| ConnectError::Transport(format!("unknown session {}", session.id())))?;

        if client
            .current_target()
            .is_some_and(|current| current.has_same_name(&target.name))
        {
            return Ok(ConnectionOutcome::new(ConnectionStatus::AlreadyConnected));
        }
        if client.in_flight().is_some() {
            return Ok(ConnectionOutcome::new(ConnectionStatus::ConnectionInProgress));
        }

        client.set_in_flight(target.clone());
        let _guard = InFlightGuard(Arc::clone(&client));

        if self.script.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.script.latency_ms)).await;
        }

        let reason = self.script.reason_for(&target.name);
        let refused = |status| ConnectionOutcome {
            status,
            reason: reason.clone(),
        };

        match self.script.outcome_for(&target.name) {
            ScriptedOutcome::Success => {
                client.set_connected(target);
                Ok(ConnectionOutcome::success())
            }
            ScriptedOutcome::AlreadyConnected => Ok(refused(ConnectionStatus::AlreadyConnected)),
            ScriptedOutcome::InProgress => Ok(refused(ConnectionStatus::ConnectionInProgress)),
            ScriptedOutcome::Cancelled => Ok(refused(ConnectionStatus::ConnectionCancelled)),
            ScriptedOutcome::Disconnected => Ok(refused(ConnectionStatus::ServerDisconnected)),
            ScriptedOutcome::Unreachable => Err(ConnectError::Unavailable(target.name)),
            ScriptedOutcome::Hang => {
                std::future::pending::<()>().await;
                Err(ConnectError::Transport("connection abandoned".to_string()))
            }
        }
    }
}
