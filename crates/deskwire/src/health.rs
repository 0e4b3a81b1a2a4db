// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `deskwire health` command implementation.
//!
//! Probes the backend health endpoint and reports liveness. Falls back
//! gracefully when the backend is not reachable.

use std::io::IsTerminal;

use deskwire_api::ApiClient;
use deskwire_config::DeskwireConfig;
use deskwire_core::DeskwireError;
use serde::Serialize;
use tracing::debug;

/// Structured health output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub reachable: bool,
    pub status: String,
    pub service: Option<String>,
    pub endpoint: String,
}

/// Runs the `deskwire health` command.
///
/// An unreachable backend is reported, not treated as a command failure;
/// scripts should read the `reachable` field of the `--json` output.
pub async fn run_health(
    config: &DeskwireConfig,
    json: bool,
    plain: bool,
) -> Result<(), DeskwireError> {
    let api = ApiClient::new(&config.api)?;
    let endpoint = format!("{}/health", config.api.base_url.trim_end_matches('/'));

    match api.health().await {
        Ok(report) => {
            if json {
                let out = HealthStatus {
                    reachable: true,
                    status: report.status.clone(),
                    service: Some(report.service.clone()),
                    endpoint,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                let use_color = !plain && std::io::stdout().is_terminal();
                print_reachable(&report.status, &report.service, use_color);
            }
        }
        Err(e) => {
            debug!(error = %e, "health probe failed");
            if json {
                let out = HealthStatus {
                    reachable: false,
                    status: "unreachable".to_string(),
                    service: None,
                    endpoint,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                let use_color = !plain && std::io::stdout().is_terminal();
                print_unreachable(&endpoint, use_color);
            }
        }
    }

    Ok(())
}

fn print_reachable(status: &str, service: &str, use_color: bool) {
    println!();
    println!("  deskwire health");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        println!("    Backend:  {} {} ({service})", "✓".green(), status.green());
    } else {
        println!("    Backend:  [OK] {status} ({service})");
    }

    println!();
}

fn print_unreachable(endpoint: &str, use_color: bool) {
    println!();
    println!("  deskwire health");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        println!("    Backend:  {} {}", "✗".red(), "unreachable".red());
    } else {
        println!("    Backend:  [FAIL] unreachable");
    }

    println!("    Endpoint: {endpoint}");
    println!();
}
