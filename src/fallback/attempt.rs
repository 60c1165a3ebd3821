//! Connection attempt driver
//!
//! Issues a single connection request on the Tokio runtime and hands back a
//! [`PendingAttempt`] future that resolves exactly once. The driver keeps no
//! state between attempts and never retries.

use async_trait::async_trait;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

use super::ConnectError;
use crate::registry::Target;
use crate::session::Session;

/// Status reported by the runtime's connection-request primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// The client now routes to the target
    Success,
    /// The client was already on the target
    AlreadyConnected,
    /// Another connection for this client is still being made
    ConnectionInProgress,
    /// The switch was cancelled before it completed
    ConnectionCancelled,
    /// The target dropped the client during the switch
    ServerDisconnected,
}

/// Answer from the connection-request primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOutcome {
    pub status: ConnectionStatus,
    /// Human-readable reason supplied by the target, if any
    pub reason: Option<String>,
}

impl ConnectionOutcome {
    pub fn new(status: ConnectionStatus) -> Self {
        Self {
            status,
            reason: None,
        }
    }

    pub fn success() -> Self {
        Self::new(ConnectionStatus::Success)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn is_successful(&self) -> bool {
        self.status == ConnectionStatus::Success
    }
}

/// The runtime primitive that actually moves a client between backends.
#[async_trait]
pub trait ConnectionRequester: Send + Sync {
    async fn connect(
        &self,
        session: Arc<dyn Session>,
        target: Target,
    ) -> Result<ConnectionOutcome, ConnectError>;
}

/// Final result of one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Successful,
    /// The target or runtime declined the switch
    Rejected { reason: Option<String> },
    /// The attempt could not complete
    Failed(ConnectError),
    /// The attempt ended without producing any result
    Unresolved,
}

impl AttemptResult {
    /// Label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            AttemptResult::Successful => "successful",
            AttemptResult::Rejected { .. } => "rejected",
            AttemptResult::Failed(_) => "failed",
            AttemptResult::Unresolved => "unresolved",
        }
    }
}

impl From<ConnectionOutcome> for AttemptResult {
    fn from(outcome: ConnectionOutcome) -> Self {
        if outcome.is_successful() {
            AttemptResult::Successful
        } else {
            AttemptResult::Rejected {
                reason: outcome.reason,
            }
        }
    }
}

/// An in-flight attempt. Resolves to the attempt's [`AttemptResult`];
/// resolves to `Unresolved` if the request task ends without answering.
#[derive(Debug)]
pub struct PendingAttempt {
    target: Target,
    rx: oneshot::Receiver<AttemptResult>,
}

impl PendingAttempt {
    pub fn target(&self) -> &Target {
        &self.target
    }
}

impl Future for PendingAttempt {
    type Output = AttemptResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(AttemptResult::Unresolved))
    }
}

/// Drives connection requests through a [`ConnectionRequester`]
#[derive(Clone)]
pub struct AttemptDriver {
    requester: Arc<dyn ConnectionRequester>,
    timeout: Option<Duration>,
}

impl AttemptDriver {
    pub fn new(requester: Arc<dyn ConnectionRequester>) -> Self {
        Self {
            requester,
            timeout: None,
        }
    }

    /// Bound each attempt; an attempt that runs longer fails with
    /// [`ConnectError::Timeout`]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Start connecting `session` to `candidate`.
    ///
    /// Returns immediately. Must be called from within a Tokio runtime.
    pub fn attempt(&self, session: Arc<dyn Session>, candidate: Target) -> PendingAttempt {
        let (tx, rx) = oneshot::channel();
        let requester = Arc::clone(&self.requester);
        let timeout = self.timeout;
        let target = candidate.clone();

        tokio::spawn(async move {
            let started = Instant::now();
            let session_id = session.id();
            let request = requester.connect(session, target.clone());

            let response = match timeout {
                Some(limit) => tokio::time::timeout(limit, request)
                    .await
                    .unwrap_or_else(|_| {
                        Err(ConnectError::Timeout {
                            server: target.name.clone(),
                            elapsed: limit,
                        })
                    }),
                None => request.await,
            };

            let result = match response {
                Ok(outcome) => AttemptResult::from(outcome),
                Err(err) => AttemptResult::Failed(err),
            };

            tracing::debug!(
                session = %session_id,
                server = %target.name,
                outcome = result.label(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Connection attempt finished"
            );

            // The receiver may already be gone; nobody is left to tell.
            let _ = tx.send(result);
        });

        PendingAttempt {
            target: candidate,
            rx,
        }
    }
}
