//! Error types for connection attempts

use std::time::Duration;
use thiserror::Error;

/// Why a connection attempt could not complete
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The attempt did not finish within the configured bound
    #[error("Connection to '{server}' timed out after {elapsed:?}")]
    Timeout { server: String, elapsed: Duration },

    /// The target is not accepting connections
    #[error("Server '{0}' is unavailable")]
    Unavailable(String),

    /// Transport-level failure (I/O, protocol, unknown session)
    #[error("Transport error: {0}")]
    Transport(String),
}
