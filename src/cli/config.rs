//! Config command handlers

use crate::cli::{ConfigInitArgs, ConfigValidateArgs};
use crate::config::HubConfig;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../hub.example.toml");

/// Handle `hub config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Edit this file to set your servers and home list.");

    Ok(())
}

/// Handle `hub config validate` command.
///
/// Unlike the other commands, a missing file is an error here.
pub fn handle_config_validate(
    args: &ConfigValidateArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = HubConfig::load(Some(&args.config))?;
    config.validate()?;

    Ok(format!(
        "✓ {} is valid ({} servers, {} home)",
        args.config.display(),
        config.servers.len(),
        config.fallback.attempt_connection_order.len()
    ))
}
