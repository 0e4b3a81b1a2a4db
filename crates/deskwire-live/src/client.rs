// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconnecting WebSocket client for conversation live updates.
//!
//! [`LiveClient`] opens one connection per conversation; [`LiveHandle`] is
//! the consumer's end of it. A spawned connection task owns the socket and
//! communicates only through a bounded event channel and a cancellation
//! token. On abnormal closure the task schedules exactly one reconnection
//! attempt after a fixed delay and repeats indefinitely; an explicit close
//! cancels any pending attempt.

use std::time::Duration;

use deskwire_config::LiveConfig;
use deskwire_core::Identity;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::frame::{ClientFrame, Frame, decode_frame};
use crate::state::LinkState;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// One transport event, delivered in order.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    /// The link changed state.
    State(LinkState),
    /// A decoded inbound frame arrived.
    Frame(Frame),
}

/// Factory for live channels.
///
/// Holds the `[live]` configuration and the cancellation token of the
/// currently open channel, so opening a new conversation closes the previous
/// one instead of double-delivering frames.
pub struct LiveClient {
    config: LiveConfig,
    active: Option<CancellationToken>,
}

impl LiveClient {
    /// Creates a factory from the `[live]` configuration.
    pub fn new(config: &LiveConfig) -> Self {
        Self {
            config: config.clone(),
            active: None,
        }
    }

    /// Opens the live channel for one conversation under the given identity.
    ///
    /// The identity travels as the `user_type` and `user_id` connection
    /// parameters. A channel previously opened by this client is cancelled
    /// first; there is one live connection per console at a time.
    pub fn open(&mut self, conversation_id: &str, identity: &Identity) -> LiveHandle {
        if let Some(previous) = self.active.take() {
            previous.cancel();
        }
        let cancel = CancellationToken::new();
        self.active = Some(cancel.clone());

        let (events_tx, events_rx) = mpsc::channel(64);
        let (commands_tx, commands_rx) = mpsc::channel(16);

        let task = ConnectionTask {
            url: connection_url(&self.config.base_url, conversation_id, identity),
            reconnect_delay: Duration::from_secs(self.config.reconnect_delay_secs),
            events: events_tx,
            commands: commands_rx,
            cancel: cancel.clone(),
        };
        let join = tokio::spawn(task.run());

        LiveHandle {
            events: events_rx,
            commands: commands_tx,
            cancel,
            task: join,
        }
    }
}

/// Consumer end of one live channel.
pub struct LiveHandle {
    events: mpsc::Receiver<LiveEvent>,
    commands: mpsc::Sender<ClientFrame>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl LiveHandle {
    /// The next transport event, in arrival order. Returns `None` once the
    /// channel has fully closed.
    pub async fn next_event(&mut self) -> Option<LiveEvent> {
        self.events.recv().await
    }

    /// Queues an outbound command. The connection task writes it while
    /// connected and drops it with a log line otherwise.
    pub fn send_command(&self, command: ClientFrame) {
        if self.commands.try_send(command).is_err() {
            warn!(
                command = command.to_wire(),
                "live channel gone, command dropped"
            );
        }
    }

    /// Closes the channel. Cancels a pending reconnection; not an error.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LiveHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Builds the per-conversation connection URL with identity parameters.
fn connection_url(base_url: &str, conversation_id: &str, identity: &Identity) -> String {
    format!(
        "{}/ws/conversations/{}?user_type={}&user_id={}",
        base_url.trim_end_matches('/'),
        conversation_id,
        identity.role,
        identity.user_id
    )
}

/// The spawned side of a live channel. Owns the socket for its whole life.
struct ConnectionTask {
    url: String,
    reconnect_delay: Duration,
    events: mpsc::Sender<LiveEvent>,
    commands: mpsc::Receiver<ClientFrame>,
    cancel: CancellationToken,
}

impl ConnectionTask {
    async fn run(mut self) {
        'link: loop {
            self.transition(LinkState::Connecting).await;

            let connect = tokio_tungstenite::connect_async(self.url.clone());
            tokio::pin!(connect);

            let ws = loop {
                tokio::select! {
                    result = &mut connect => match result {
                        Ok((ws, _)) => break ws,
                        Err(e) => {
                            warn!(error = %e, "live channel connect failed");
                            if self.pause_before_reconnect().await {
                                continue 'link;
                            }
                            break 'link;
                        }
                    },
                    Some(command) = self.commands.recv() => self.drop_command(command),
                    _ = self.cancel.cancelled() => break 'link,
                }
            };

            debug!(url = %self.url, "live channel connected");
            self.transition(LinkState::Connected).await;

            let client_closed = self.pump(ws).await;
            if client_closed {
                break 'link;
            }

            if !self.pause_before_reconnect().await {
                break 'link;
            }
        }

        self.transition(LinkState::Disconnected).await;
    }

    /// Drives one established connection. Returns true when the close was
    /// client-initiated, false on any abnormal termination.
    async fn pump(&mut self, ws: WsStream) -> bool {
        let (mut write, mut read) = ws.split();

        loop {
            tokio::select! {
                msg = read.next() => match msg {
                    Some(Ok(Message::Text(text))) => match decode_frame(&text) {
                        Ok(frame) => {
                            if self.events.send(LiveEvent::Frame(frame)).await.is_err() {
                                // Consumer went away; nothing left to deliver to.
                                return true;
                            }
                        }
                        Err(e) => warn!(error = %e, "malformed frame ignored"),
                    },
                    Some(Ok(Message::Close(close))) => {
                        warn!(close = ?close, "live channel closed by server");
                        return false;
                    }
                    None => {
                        warn!("live channel ended");
                        return false;
                    }
                    // Pings are answered by the protocol layer; binary
                    // frames are not part of this protocol.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "live channel read failed");
                        return false;
                    }
                },
                Some(command) = self.commands.recv() => {
                    if write.send(Message::Text(command.to_wire().into())).await.is_err() {
                        warn!("live channel write failed");
                        return false;
                    }
                }
                _ = self.cancel.cancelled() => {
                    // Explicit close; tell the server, best effort.
                    let _ = write.send(Message::Close(None)).await;
                    return true;
                }
            }
        }
    }

    /// Waits out the fixed delay before the single scheduled reconnection
    /// attempt. Returns false when cancelled during the wait.
    async fn pause_before_reconnect(&mut self) -> bool {
        self.transition(LinkState::ReconnectPending).await;

        let sleep = tokio::time::sleep(self.reconnect_delay);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                Some(command) = self.commands.recv() => self.drop_command(command),
                _ = self.cancel.cancelled() => return false,
            }
        }
    }

    async fn transition(&self, state: LinkState) {
        debug!(state = %state, "live channel state");
        let _ = self.events.send(LiveEvent::State(state)).await;
    }

    fn drop_command(&self, command: ClientFrame) {
        warn!(
            command = command.to_wire(),
            "live channel not connected, command dropped"
        );
    }
}
