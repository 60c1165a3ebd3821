//! Decides whether a client needs to be sent home, and where

use super::FallbackList;
use crate::registry::Target;
use crate::session::Session;

/// Result of evaluating a session against the fallback list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackDecision {
    /// The client is not routed anywhere; nothing to do
    NoCurrentTarget,
    /// The client is already on a home server
    AlreadyHome(Target),
    /// The client is away from home but no server is left to try
    NoCandidate { current: Target },
    /// Send the client to `candidate`
    Candidate { current: Target, candidate: Target },
}

impl FallbackDecision {
    /// Label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            FallbackDecision::NoCurrentTarget => "no_current_target",
            FallbackDecision::AlreadyHome(_) => "already_home",
            FallbackDecision::NoCandidate { .. } => "no_candidate",
            FallbackDecision::Candidate { .. } => "candidate",
        }
    }
}

/// Fallback policy over a fixed fallback list. Pure: reads the session,
/// never changes it.
#[derive(Debug, Clone)]
pub struct FallbackPolicy {
    list: FallbackList,
}

impl FallbackPolicy {
    pub fn new(list: FallbackList) -> Self {
        Self { list }
    }

    pub fn list(&self) -> &FallbackList {
        &self.list
    }

    pub fn decide(&self, session: &dyn Session) -> FallbackDecision {
        let Some(current) = session.current_target() else {
            return FallbackDecision::NoCurrentTarget;
        };

        if self.list.contains(&current.name) {
            return FallbackDecision::AlreadyHome(current);
        }

        match session.recommended_next_target() {
            Some(candidate) => FallbackDecision::Candidate { current, candidate },
            None => FallbackDecision::NoCandidate { current },
        }
    }
}
