use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

use super::{FeedbackEvent, MessageSink};
use crate::session::Session;

/// A message handed to a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveredMessage {
    pub session: Uuid,
    pub event: FeedbackEvent,
}

/// Sink that keeps every delivered message in order.
///
/// Used by the CLI to print feedback after a run, and by tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<DeliveredMessage>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages delivered so far
    pub fn messages(&self) -> Vec<DeliveredMessage> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events delivered so far, in order
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.messages().into_iter().map(|m| m.event).collect()
    }
}

impl MessageSink for RecordingSink {
    fn send(&self, session: &dyn Session, event: FeedbackEvent) {
        tracing::trace!(session = %session.id(), ?event, "Delivering feedback");
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DeliveredMessage {
                session: session.id(),
                event,
            });
    }
}
