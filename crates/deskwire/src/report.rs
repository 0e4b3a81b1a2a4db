// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only backend report commands: `agents`, `stats`, `summary`.

use std::io::IsTerminal;

use deskwire_api::{Agent, ApiClient};
use deskwire_config::DeskwireConfig;
use deskwire_core::{AgentStatus, DeskwireError};

/// Runs the `deskwire agents` command.
pub async fn run_agents(
    config: &DeskwireConfig,
    json: bool,
    plain: bool,
) -> Result<(), DeskwireError> {
    let api = ApiClient::new(&config.api)?;
    let agents = api.list_agents().await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&agents).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  agent roster ({})", agents.len());
    println!("  {}", "-".repeat(35));
    for agent in &agents {
        print_agent(agent, use_color);
    }
    println!();
    Ok(())
}

/// Runs the `deskwire stats` command.
pub async fn run_stats(config: &DeskwireConfig, json: bool) -> Result<(), DeskwireError> {
    let api = ApiClient::new(&config.api)?;
    let stats = api.dashboard_stats().await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  dashboard");
    println!("  {}", "-".repeat(35));
    println!("    Active conversations: {}", stats.active_conversations);
    println!("    Active agents:        {}", stats.active_agents);
    println!(
        "    Avg response time:    {:.0} ms",
        stats.avg_response_time_ms
    );
    println!(
        "    Satisfaction:         {:.1}",
        stats.customer_satisfaction
    );
    println!("    Conversations today:  {}", stats.conversations_today);
    println!("    Messages today:       {}", stats.messages_today);
    println!(
        "    Escalation rate:      {}",
        format_percent(stats.escalation_rate)
    );
    println!(
        "    Resolution rate:      {}",
        format_percent(stats.resolution_rate)
    );
    println!();
    Ok(())
}

/// Runs the `deskwire summary` command.
pub async fn run_summary(config: &DeskwireConfig, json: bool) -> Result<(), DeskwireError> {
    let api = ApiClient::new(&config.api)?;
    let summary = api.conversation_summary().await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  conversation summary");
    println!("  {}", "-".repeat(35));
    println!("    Total conversations: {}", summary.total_conversations);
    println!(
        "    Avg resolution time: {:.1} min",
        summary.avg_resolution_time_minutes
    );
    if !summary.top_intents.is_empty() {
        println!("    Top intents:");
        for intent in &summary.top_intents {
            println!("      {} ({})", intent.intent, intent.count);
        }
    }
    println!();
    Ok(())
}

fn print_agent(agent: &Agent, use_color: bool) {
    let load = format!(
        "{}/{}",
        agent.current_load, agent.max_concurrent_conversations
    );
    if use_color {
        use colored::Colorize;
        let status = match agent.status {
            AgentStatus::Active => agent.status.to_string().green(),
            AgentStatus::Busy => agent.status.to_string().yellow(),
            AgentStatus::Inactive | AgentStatus::Maintenance => agent.status.to_string().red(),
        };
        println!(
            "    {} [{}] load {}  {}",
            agent.name, status, load, agent.description
        );
    } else {
        println!(
            "    {} [{}] load {}  {}",
            agent.name, agent.status, load, agent.description
        );
    }
}

/// Renders a 0.0..=1.0 fraction as a percentage.
fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
