//! Connection-fallback orchestration
//!
//! Sends a client back to a "home" server on request:
//!
//! 1. **[`FallbackPolicy`]**: is the client home already? If not, which server next?
//! 2. **[`AttemptDriver`]**: issue the connection request without blocking
//! 3. **[`OutcomeReconciler`]**: turn the attempt's result into feedback
//! 4. **[`FallbackOrchestrator`]**: run 1–3 in order for one invocation
//!
//! ```text
//! Idle -> Evaluating -> Done                       (no target / already home)
//!                    -> Attempting -> Reconciling -> Done
//! ```

pub mod attempt;
pub mod error;
pub mod list;
pub mod orchestrator;
pub mod outcome;
pub mod policy;

#[cfg(test)]
pub(crate) mod testing;

pub use attempt::{
    AttemptDriver, AttemptResult, ConnectionOutcome, ConnectionRequester, ConnectionStatus,
    PendingAttempt,
};
pub use error::ConnectError;
pub use list::FallbackList;
pub use orchestrator::{CommandStatus, FallbackOrchestrator, Invocation, Phase};
pub use outcome::OutcomeReconciler;
pub use policy::{FallbackDecision, FallbackPolicy};
