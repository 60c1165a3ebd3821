//! Read-only view of a connected client.
//!
//! The fallback core only ever talks to a client through the [`Session`]
//! trait. [`ConnectedClient`] is the in-process implementation used by the
//! in-memory runtime and the CLI.

mod client;
mod locale;

pub use client::ConnectedClient;
pub use locale::{Locale, BASELINE_LOCALE};

use crate::registry::Target;
use uuid::Uuid;

/// Session accessor for a live client connection.
///
/// Implementations must be cheap to query; the fallback policy calls these
/// on the invoking thread.
pub trait Session: Send + Sync {
    /// Unique id of the client
    fn id(&self) -> Uuid;

    /// Display name of the client
    fn username(&self) -> &str;

    /// Backend the client is currently routed to, if any
    fn current_target(&self) -> Option<Target>;

    /// Locale reported by the client, if any
    fn effective_locale(&self) -> Option<Locale>;

    /// Next server the connection manager would try for this client
    fn recommended_next_target(&self) -> Option<Target>;
}
