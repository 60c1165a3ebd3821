//! CLI module for the hub
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `simulate` - Run the hub command for one simulated client
//! - `servers` - List registered servers and their home rank
//! - `config` - Configuration utilities (init, validate)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Send a client on "factions" back to the lobby
//! hub simulate --client alice --current factions
//!
//! # Generate shell completions
//! hub completions bash > ~/.bash_completion.d/hub
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod servers;
pub mod simulate;

pub use completions::handle_completions;
pub use config::{handle_config_init, handle_config_validate};
pub use servers::handle_servers;
pub use simulate::handle_simulate;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::HubConfig;

/// Hub - send proxy clients back to a home server
#[derive(Parser, Debug)]
#[command(
    name = "hub",
    version,
    about = "Send proxy clients back to their home server"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the hub command for a simulated client
    Simulate(SimulateArgs),
    /// List registered servers
    Servers(ServersArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "hub.toml")]
    pub config: PathBuf,

    /// Username of the simulated client
    #[arg(long, default_value = "player")]
    pub client: String,

    /// Server the client is on before running the command
    #[arg(long)]
    pub current: Option<String>,

    /// Client locale (e.g. de_DE)
    #[arg(long)]
    pub locale: Option<String>,

    /// Virtual host the client joined through
    #[arg(long)]
    pub virtual_host: Option<String>,

    /// Run the command from the console instead of the client
    #[arg(long)]
    pub console: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "hub.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
    /// Check a configuration file for errors
    Validate(ConfigValidateArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "hub.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigValidateArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "hub.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration, falling back to defaults when `path` does not exist.
///
/// Environment overrides are applied, then `log_level` if given.
pub fn load_config(
    path: &Path,
    log_level: Option<&str>,
) -> Result<HubConfig, Box<dyn std::error::Error>> {
    let mut config = if path.exists() {
        HubConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        HubConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }

    config.validate()?;
    Ok(config)
}
