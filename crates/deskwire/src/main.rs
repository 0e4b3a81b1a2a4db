// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deskwire -- a live customer-service console.
//!
//! This is the binary entry point: argument parsing, configuration loading,
//! and command dispatch. Command implementations live in sibling modules.

use clap::{Parser, Subcommand};
use deskwire_config::DeskwireConfig;
use deskwire_core::DeskwireError;

mod conversations;
mod health;
mod render;
mod report;
mod watch;

/// Deskwire -- a live customer-service console.
#[derive(Parser, Debug)]
#[command(name = "deskwire", version, about, long_about = None)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check backend liveness.
    Health {
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the AI agent roster.
    Agents {
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show dashboard statistics.
    Stats {
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },
    /// List conversations.
    Conversations {
        /// Only conversations in this status (active, pending, resolved,
        /// escalated, closed).
        #[arg(long)]
        status: Option<String>,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Conversations per page.
        #[arg(long, default_value_t = 20)]
        page_size: u32,
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show one conversation with its message log.
    Show {
        conversation_id: String,
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },
    /// Create a conversation with an opening message.
    New {
        /// Opening customer message.
        #[arg(long)]
        message: String,
        /// Business channel (web_chat, email, phone, sms, whatsapp, api).
        #[arg(long, default_value = "web_chat")]
        channel: String,
        /// Handling priority (low, medium, high, urgent).
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Customer email.
        #[arg(long)]
        email: Option<String>,
        /// Customer display name.
        #[arg(long)]
        name: Option<String>,
    },
    /// Send one message over REST, without opening the live channel.
    Send {
        conversation_id: String,
        text: String,
    },
    /// Show the conversation analytics summary.
    Summary {
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },
    /// Follow a conversation live; lines read from stdin are sent as
    /// messages.
    Watch {
        conversation_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match deskwire_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            deskwire_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.console.log_level);

    if let Err(e) = run(cli, &config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &DeskwireConfig) -> Result<(), DeskwireError> {
    match cli.command {
        Commands::Health { json } => health::run_health(config, json, cli.plain).await,
        Commands::Agents { json } => report::run_agents(config, json, cli.plain).await,
        Commands::Stats { json } => report::run_stats(config, json).await,
        Commands::Summary { json } => report::run_summary(config, json).await,
        Commands::Conversations {
            status,
            page,
            page_size,
            json,
        } => {
            conversations::run_list(config, status.as_deref(), page, page_size, json, cli.plain)
                .await
        }
        Commands::Show {
            conversation_id,
            json,
        } => conversations::run_show(config, &conversation_id, json, cli.plain).await,
        Commands::New {
            message,
            channel,
            priority,
            email,
            name,
        } => {
            conversations::run_new(config, &message, &channel, &priority, email, name, cli.plain)
                .await
        }
        Commands::Send {
            conversation_id,
            text,
        } => conversations::run_send(config, &conversation_id, &text, cli.plain).await,
        Commands::Watch { conversation_id } => {
            watch::run_watch(config, &conversation_id, cli.plain).await
        }
    }
}

/// Initializes the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("deskwire={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn watch_requires_a_conversation_id() {
        assert!(Cli::try_parse_from(["deskwire", "watch"]).is_err());
        let cli = Cli::try_parse_from(["deskwire", "watch", "conv-1"]).unwrap();
        match cli.command {
            Commands::Watch { conversation_id } => assert_eq!(conversation_id, "conv-1"),
            other => panic!("expected watch, got {other:?}"),
        }
    }

    #[test]
    fn conversations_flags_parse() {
        let cli = Cli::try_parse_from([
            "deskwire",
            "conversations",
            "--status",
            "active",
            "--page",
            "2",
            "--page-size",
            "5",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Conversations {
                status,
                page,
                page_size,
                json,
            } => {
                assert_eq!(status.as_deref(), Some("active"));
                assert_eq!(page, 2);
                assert_eq!(page_size, 5);
                assert!(json);
            }
            other => panic!("expected conversations, got {other:?}"),
        }
    }

    #[test]
    fn new_defaults_channel_and_priority() {
        let cli =
            Cli::try_parse_from(["deskwire", "new", "--message", "my invoice is wrong"]).unwrap();
        match cli.command {
            Commands::New {
                channel, priority, ..
            } => {
                assert_eq!(channel, "web_chat");
                assert_eq!(priority, "medium");
            }
            other => panic!("expected new, got {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = deskwire_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.api.base_url, "http://127.0.0.1:8001/api");
    }
}
