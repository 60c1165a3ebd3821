//! Servers command implementation

use super::output::{self, ServerView};
use crate::cli::ServersArgs;
use crate::config::HubConfig;
use crate::runtime;

/// Handle `hub servers` command
pub fn handle_servers(
    args: &ServersArgs,
    config: &HubConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let registry = runtime::load_servers_from_config(config)?;
    let homes = config.fallback.fallback_list();

    let views: Vec<ServerView> = registry
        .all()
        .iter()
        .map(|target| ServerView::new(target, &homes))
        .collect();

    if args.json {
        Ok(output::format_servers_json(&views)?)
    } else {
        Ok(output::format_servers_table(&views))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(json: bool) -> ServersArgs {
        ServersArgs {
            json,
            config: PathBuf::from("hub.toml"),
        }
    }

    #[test]
    fn test_servers_table_lists_defaults() {
        let output = handle_servers(&args(false), &HubConfig::default()).unwrap();
        assert!(output.contains("lobby"));
        assert!(output.contains("factions"));
        assert!(output.contains("minigames"));
    }

    #[test]
    fn test_servers_json_marks_home() {
        let output = handle_servers(&args(true), &HubConfig::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let servers = parsed["servers"].as_array().unwrap();

        let lobby = servers.iter().find(|s| s["name"] == "lobby").unwrap();
        let factions = servers.iter().find(|s| s["name"] == "factions").unwrap();
        assert_eq!(lobby["home_rank"], 1);
        assert!(factions["home_rank"].is_null());
    }
}
