//! End-to-end fallback: evaluate, attempt, reconcile

use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::{AttemptDriver, FallbackDecision, FallbackPolicy, OutcomeReconciler};
use crate::messages::{self, FeedbackEvent, MessageSink, Translator, ALREADY_CONNECTED, CONNECTING};
use crate::session::Session;

/// Phases of a single invocation, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Evaluating,
    Attempting,
    Reconciling,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Evaluating => "evaluating",
            Phase::Attempting => "attempting",
            Phase::Reconciling => "reconciling",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Command result code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// A connection attempt was issued
    Handled,
    /// Nothing was attempted
    NotHandled,
}

impl CommandStatus {
    /// Numeric code: 1 when handled, 0 otherwise
    pub fn code(self) -> i32 {
        match self {
            CommandStatus::Handled => 1,
            CommandStatus::NotHandled => 0,
        }
    }
}

/// Handle to one invocation.
///
/// The status is known as soon as `invoke` returns; the attempt itself may
/// still be running. Await [`Invocation::finished`] to wait for the
/// feedback to be delivered.
#[derive(Debug)]
pub struct Invocation {
    status: CommandStatus,
    completion: Option<JoinHandle<()>>,
}

impl Invocation {
    pub fn not_handled() -> Self {
        Self {
            status: CommandStatus::NotHandled,
            completion: None,
        }
    }

    fn handled(completion: JoinHandle<()>) -> Self {
        Self {
            status: CommandStatus::Handled,
            completion: Some(completion),
        }
    }

    pub fn status(&self) -> CommandStatus {
        self.status
    }

    pub fn is_handled(&self) -> bool {
        self.status == CommandStatus::Handled
    }

    /// Wait until the attempt has been reconciled and feedback sent
    pub async fn finished(self) -> CommandStatus {
        if let Some(completion) = self.completion {
            if let Err(err) = completion.await {
                tracing::error!(error = %err, "Fallback reconciliation task failed");
            }
        }
        self.status
    }
}

/// Composes policy, driver and reconciler into the hub operation.
///
/// Holds no per-invocation state: every call to [`invoke`](Self::invoke)
/// runs its own `Evaluating -> Attempting -> Reconciling` sequence.
pub struct FallbackOrchestrator {
    policy: FallbackPolicy,
    driver: AttemptDriver,
    reconciler: OutcomeReconciler,
    translator: Arc<dyn Translator>,
    sink: Arc<dyn MessageSink>,
}

impl FallbackOrchestrator {
    pub fn new(
        policy: FallbackPolicy,
        driver: AttemptDriver,
        translator: Arc<dyn Translator>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            policy,
            driver,
            reconciler: OutcomeReconciler::new(Arc::clone(&translator)),
            translator,
            sink,
        }
    }

    pub fn policy(&self) -> &FallbackPolicy {
        &self.policy
    }

    /// Send `session` home if it is not there already.
    ///
    /// Returns once the attempt (if any) has been issued. Must be called
    /// from within a Tokio runtime.
    pub fn invoke(&self, session: Arc<dyn Session>) -> Invocation {
        let session_id = session.id();
        tracing::debug!(session = %session_id, phase = %Phase::Evaluating, "Evaluating fallback");

        let decision = self.policy.decide(session.as_ref());
        metrics::counter!("hub_invocations_total", "decision" => decision.label()).increment(1);

        let (current, candidate) = match decision {
            FallbackDecision::NoCurrentTarget => {
                tracing::debug!(
                    session = %session_id,
                    phase = %Phase::Done,
                    "Client has no current server"
                );
                return Invocation::not_handled();
            }
            FallbackDecision::AlreadyHome(current) => {
                tracing::debug!(
                    session = %session_id,
                    phase = %Phase::Done,
                    server = %current.name,
                    "Client already on a fallback server"
                );
                self.sink.send(
                    session.as_ref(),
                    FeedbackEvent::translatable(ALREADY_CONNECTED, [current.name.as_str()]),
                );
                return Invocation::not_handled();
            }
            FallbackDecision::NoCandidate { current } => {
                tracing::debug!(
                    session = %session_id,
                    phase = %Phase::Done,
                    server = %current.name,
                    "No fallback server left to try"
                );
                return Invocation::not_handled();
            }
            FallbackDecision::Candidate { current, candidate } => (current, candidate),
        };

        if messages::translation_exists(
            self.translator.as_ref(),
            CONNECTING,
            session.effective_locale(),
        ) {
            self.sink.send(
                session.as_ref(),
                FeedbackEvent::translatable(CONNECTING, [candidate.name.as_str()]),
            );
        }

        tracing::info!(
            session = %session_id,
            phase = %Phase::Attempting,
            from = %current.name,
            to = %candidate.name,
            "Sending client to fallback server"
        );
        let pending = self.driver.attempt(Arc::clone(&session), candidate.clone());

        let reconciler = self.reconciler.clone();
        let sink = Arc::clone(&self.sink);
        let completion = tokio::spawn(async move {
            let result = pending.await;
            tracing::debug!(
                session = %session_id,
                phase = %Phase::Reconciling,
                outcome = result.label(),
                "Reconciling fallback attempt"
            );

            if let Some(event) =
                reconciler.reconcile(&candidate, &result, session.effective_locale())
            {
                sink.send(session.as_ref(), event);
            }
            tracing::debug!(session = %session_id, phase = %Phase::Done, "Fallback finished");
        });

        Invocation::handled(completion)
    }
}
