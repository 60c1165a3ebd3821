//! Hub - send proxy clients back to a home server
//!
//! This library implements the fallback orchestration behind a proxy's
//! `hub` command: decide whether a client is already on a home server, pick
//! the next server to try, drive the connection attempt without blocking,
//! and turn its outcome into localized feedback.

pub mod cli;
pub mod command;
pub mod config;
pub mod fallback;
pub mod logging;
pub mod messages;
pub mod permission;
pub mod registry;
pub mod runtime;
pub mod session;

pub use command::HubCommand;
pub use config::HubConfig;
pub use fallback::{CommandStatus, FallbackOrchestrator};
