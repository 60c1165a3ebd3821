//! Output formatting helpers for CLI commands

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

use crate::fallback::{CommandStatus, FallbackList};
use crate::registry::{RegistrationSource, Target};

/// View model for server display
#[derive(Debug, Clone, Serialize)]
pub struct ServerView {
    pub name: String,
    pub address: String,
    pub source: RegistrationSource,
    /// Position in the home list, starting at 1
    pub home_rank: Option<usize>,
}

impl ServerView {
    pub fn new(target: &Target, homes: &FallbackList) -> Self {
        Self {
            name: target.name.clone(),
            address: target.address.clone(),
            source: target.source,
            home_rank: homes.rank(&target.name).map(|rank| rank + 1),
        }
    }
}

/// One feedback message as the client would see it
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    /// Message key, absent for verbatim backend text
    pub key: Option<String>,
    pub text: String,
}

/// Result of `hub simulate`
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub client: String,
    pub locale: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: String,
    pub code: i32,
    pub messages: Vec<MessageView>,
}

impl SimulationReport {
    pub fn status_label(status: CommandStatus) -> &'static str {
        match status {
            CommandStatus::Handled => "handled",
            CommandStatus::NotHandled => "not_handled",
        }
    }
}

/// Format servers as a table
pub fn format_servers_table(servers: &[ServerView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Address", "Source", "Home"]);

    for s in servers {
        let home = match s.home_rank {
            Some(rank) => format!("#{}", rank).green().to_string(),
            None => "-".dimmed().to_string(),
        };
        let source = match s.source {
            RegistrationSource::Static => "static",
            RegistrationSource::Runtime => "runtime",
        };

        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(&s.address),
            Cell::new(source),
            Cell::new(home),
        ]);
    }

    table.to_string()
}

/// Format servers as JSON
pub fn format_servers_json(servers: &[ServerView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "servers": servers
    }))
}

/// Format a simulation report for the terminal
pub fn format_report_text(report: &SimulationReport) -> String {
    let mut lines = Vec::with_capacity(report.messages.len() + 2);

    for message in &report.messages {
        lines.push(format!("{} {}", "»".cyan(), message.text));
    }

    let route = format!(
        "{} → {}",
        report.from.as_deref().unwrap_or("(none)"),
        report.to.as_deref().unwrap_or("(none)")
    );
    lines.push(format!("{}: {}", report.client.bold(), route));

    let status = if report.code == 1 {
        report.status.green()
    } else {
        report.status.yellow()
    };
    lines.push(format!("Status: {} ({})", status, report.code));

    lines.join("\n")
}

/// Format a simulation report as JSON
pub fn format_report_json(report: &SimulationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
