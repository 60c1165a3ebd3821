//! Simulate command implementation

use std::sync::Arc;

use super::output::{self, MessageView, SimulationReport};
use crate::cli::SimulateArgs;
use crate::config::HubConfig;
use crate::messages::{self, RecordingSink};
use crate::permission::Principal;
use crate::runtime::HubRuntime;
use crate::session::{Locale, Session};

/// Run the hub command once for a simulated client and collect what it saw
pub async fn run_simulation(
    args: &SimulateArgs,
    config: HubConfig,
) -> Result<SimulationReport, Box<dyn std::error::Error>> {
    let sink = Arc::new(RecordingSink::new());
    let runtime = HubRuntime::from_config(config, sink.clone())?;

    let mut client = runtime.client_builder(&args.client);
    if let Some(ref tag) = args.locale {
        client = client.with_locale(tag.parse::<Locale>()?);
    }
    if let Some(ref host) = args.virtual_host {
        client = client.with_virtual_host(host.as_str());
    }
    let client = runtime.admit(client);

    if let Some(ref current) = args.current {
        let target = runtime
            .registry
            .get(current)
            .ok_or_else(|| format!("Unknown server: {}", current))?;
        client.set_connected(target);
    }
    let from = client.current_target().map(|t| t.name);

    let principal = if args.console {
        Principal::Console
    } else {
        Principal::Client(client.clone() as Arc<dyn Session>)
    };
    let status = runtime.command.execute(&principal).finished().await;

    let locale = client.effective_locale();
    let messages = sink
        .events()
        .iter()
        .map(|event| MessageView {
            key: event.key().map(str::to_string),
            text: messages::render_event(runtime.catalog.as_ref(), event, locale.clone()),
        })
        .collect();

    Ok(SimulationReport {
        client: client.username().to_string(),
        locale: Locale::or_baseline(locale).to_string(),
        from,
        to: client.current_target().map(|t| t.name),
        status: SimulationReport::status_label(status).to_string(),
        code: status.code(),
        messages,
    })
}

/// Handle `hub simulate` command
pub async fn handle_simulate(
    args: &SimulateArgs,
    config: HubConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let report = run_simulation(args, config).await?;
    if args.json {
        Ok(output::format_report_json(&report)?)
    } else {
        Ok(output::format_report_text(&report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScriptedOutcome, SimulationConfig};
    use crate::messages::{CONNECTING_SERVER_ERROR, CONNECTING};
    use std::path::PathBuf;

    fn args(current: Option<&str>) -> SimulateArgs {
        SimulateArgs {
            config: PathBuf::from("hub.toml"),
            client: "alice".to_string(),
            current: current.map(str::to_string),
            locale: None,
            virtual_host: None,
            console: false,
            log_level: None,
            json: false,
        }
    }

    fn config() -> HubConfig {
        HubConfig {
            simulation: SimulationConfig {
                latency_ms: 0,
                ..SimulationConfig::default()
            },
            ..HubConfig::default()
        }
    }

    #[tokio::test]
    async fn test_simulate_sends_client_home() {
        let report = run_simulation(&args(Some("factions")), config()).await.unwrap();

        assert_eq!(report.code, 1);
        assert_eq!(report.from.as_deref(), Some("factions"));
        assert_eq!(report.to.as_deref(), Some("lobby"));
        // Baseline catalog has no connecting/connected entries
        assert!(report.messages.is_empty());
    }

    #[tokio::test]
    async fn test_simulate_already_home() {
        let report = run_simulation(&args(Some("lobby")), config()).await.unwrap();

        assert_eq!(report.code, 0);
        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.messages[0].text, "You are already connected to lobby.");
    }

    #[tokio::test]
    async fn test_simulate_without_current_server_is_silent() {
        let report = run_simulation(&args(None), config()).await.unwrap();

        assert_eq!(report.code, 0);
        assert!(report.from.is_none());
        assert!(report.messages.is_empty());
    }

    #[tokio::test]
    async fn test_simulate_renders_connecting_override() {
        let mut config = config();
        config.messages.insert(
            "en".to_string(),
            [(CONNECTING.to_string(), "Off to {0}!".to_string())]
                .into_iter()
                .collect(),
        );

        let report = run_simulation(&args(Some("factions")), config).await.unwrap();
        assert_eq!(report.messages[0].key.as_deref(), Some(CONNECTING));
        assert_eq!(report.messages[0].text, "Off to lobby!");
    }

    #[tokio::test]
    async fn test_simulate_unreachable_home() {
        let mut config = config();
        config
            .simulation
            .outcomes
            .insert("lobby".to_string(), ScriptedOutcome::Unreachable);

        let report = run_simulation(&args(Some("factions")), config).await.unwrap();
        assert_eq!(report.code, 1);
        assert_eq!(report.to.as_deref(), Some("factions"));
        assert_eq!(
            report.messages.last().and_then(|m| m.key.as_deref()),
            Some(CONNECTING_SERVER_ERROR)
        );
    }

    #[tokio::test]
    async fn test_simulate_console_is_not_handled() {
        let mut args = args(Some("factions"));
        args.console = true;

        let report = run_simulation(&args, config()).await.unwrap();
        assert_eq!(report.code, 0);
        assert_eq!(report.to.as_deref(), Some("factions"));
    }

    #[tokio::test]
    async fn test_simulate_unknown_current_server() {
        let result = run_simulation(&args(Some("nowhere")), config()).await;
        assert!(result.is_err());
    }
}
