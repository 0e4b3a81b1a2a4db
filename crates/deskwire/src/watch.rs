// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `deskwire watch` command implementation.
//!
//! Opens the live channel for one conversation and renders frames and link
//! transitions as they arrive. Stdin lines go out through the optimistic
//! send path. Ctrl+C or end of input closes the channel and waits for the
//! link to wind down.

use std::collections::HashMap;
use std::io::IsTerminal;

use deskwire_api::ApiClient;
use deskwire_config::DeskwireConfig;
use deskwire_console::{ConversationPanel, PanelUpdate};
use deskwire_core::DeskwireError;
use deskwire_live::{ClientFrame, LinkState, LiveClient, LiveEvent};
use tokio::io::AsyncBufReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::render::{message_line, notice_line};

/// Runs the `deskwire watch` command.
pub async fn run_watch(
    config: &DeskwireConfig,
    conversation_id: &str,
    plain: bool,
) -> Result<(), DeskwireError> {
    let api = ApiClient::new(&config.api)?;
    let identity = config.identity();
    let mut panel = ConversationPanel::open(&api, conversation_id, identity.clone()).await?;

    let use_color = !plain && std::io::stdout().is_terminal();

    // Fetched history first; everything after arrives over the channel.
    for message in panel.messages() {
        println!("{}", message_line(message, use_color));
    }

    let mut live = LiveClient::new(&config.live);
    let mut handle = live.open(conversation_id, &identity);

    let cancel = install_signal_handler();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut closing = false;

    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(LiveEvent::Frame(frame)) => {
                    for update in panel.apply_frame(frame) {
                        render_update(&update, use_color);
                    }
                }
                Some(LiveEvent::State(state)) => {
                    render_state(state, use_color);
                    if state == LinkState::Connected {
                        // Ask for the participant and composing snapshot.
                        handle.send_command(ClientFrame::StatusRequest);
                    }
                }
                None => break,
            },
            line = lines.next_line(), if stdin_open && !closing => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match panel.send(&api, &line, Vec::new(), HashMap::new()).await {
                        // The placeholder is the tail entry until its echo
                        // promotes it; render it with the sending marker.
                        Ok(()) => {
                            if let Some(message) = panel.messages().last() {
                                println!("{}", message_line(message, use_color));
                            }
                        }
                        Err(e) => eprintln!("send failed: {e}"),
                    }
                }
                Ok(None) => {
                    debug!("stdin closed, closing live channel");
                    stdin_open = false;
                    closing = true;
                    handle.close();
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    stdin_open = false;
                    closing = true;
                    handle.close();
                }
            },
            _ = cancel.cancelled(), if !closing => {
                closing = true;
                handle.close();
            }
        }
    }

    Ok(())
}

fn render_update(update: &PanelUpdate, use_color: bool) {
    match update {
        PanelUpdate::Message(message) => println!("{}", message_line(message, use_color)),
        PanelUpdate::Confirmed(message) => {
            println!(
                "{}",
                notice_line(&format!("delivered as {}", message.id), use_color)
            );
        }
        PanelUpdate::Typing(true) => println!("{}", notice_line("agent is typing...", use_color)),
        PanelUpdate::Typing(false) => {
            println!("{}", notice_line("agent stopped typing", use_color));
        }
        PanelUpdate::Notice(text) => println!("{}", notice_line(text, use_color)),
    }
}

fn render_state(state: LinkState, use_color: bool) {
    let text = match state {
        LinkState::Connecting => "connecting...",
        LinkState::Connected => "connected",
        LinkState::ReconnectPending => "connection lost, retrying shortly",
        LinkState::Disconnected => "closed",
    };
    println!("{}", notice_line(text, use_color));
}

/// Installs handlers for SIGTERM and SIGINT (Ctrl+C).
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is
/// received.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    info!("received SIGINT (Ctrl+C), closing");
                }
                _ = sigterm.recv() => {
                    info!("received SIGTERM, closing");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, closing");
        }

        token_clone.cancel();
    });

    token
}
