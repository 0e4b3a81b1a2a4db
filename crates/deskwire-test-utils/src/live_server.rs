// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable WebSocket server for live-channel tests.
//!
//! `MockLiveServer` accepts real WebSocket connections on a loopback port
//! and gives tests three levers:
//! - **push_frame()**: deliver a server frame to the connected client
//! - **drop_connection()**: terminate the current connection without a
//!   close handshake, so clients observe an abnormal termination
//! - **recorded state**: accepted connection count, the request URI of each
//!   handshake, and every text frame clients sent

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use deskwire_core::DeskwireError;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, Notify, broadcast};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

/// A loopback WebSocket server driven by the test.
pub struct MockLiveServer {
    addr: SocketAddr,
    state: Arc<LiveServerState>,
    accept_task: tokio::task::JoinHandle<()>,
}

struct LiveServerState {
    connections: AtomicUsize,
    connected: Notify,
    close_current: Notify,
    request_uris: Mutex<Vec<String>>,
    received: Mutex<Vec<String>>,
    received_notify: Notify,
    outbound: broadcast::Sender<String>,
}

impl MockLiveServer {
    /// Binds to an ephemeral loopback port and starts accepting connections.
    pub async fn start() -> Result<Self, DeskwireError> {
        let listener =
            TcpListener::bind("127.0.0.1:0")
                .await
                .map_err(|e| DeskwireError::Transport {
                    message: "failed to bind mock live server".to_string(),
                    source: Some(Box::new(e)),
                })?;
        let addr = listener.local_addr().map_err(|e| DeskwireError::Transport {
            message: "failed to read mock live server address".to_string(),
            source: Some(Box::new(e)),
        })?;

        let (outbound, _) = broadcast::channel(64);
        let state = Arc::new(LiveServerState {
            connections: AtomicUsize::new(0),
            connected: Notify::new(),
            close_current: Notify::new(),
            request_uris: Mutex::new(Vec::new()),
            received: Mutex::new(Vec::new()),
            received_notify: Notify::new(),
            outbound,
        });

        let accept_state = state.clone();
        let accept_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let conn_state = accept_state.clone();
                tokio::spawn(serve_connection(stream, conn_state));
            }
        });

        Ok(Self {
            addr,
            state,
            accept_task,
        })
    }

    /// Base `ws://` URL of the server, without a path.
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Total connections accepted since start, reconnects included.
    pub fn connection_count(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    /// Waits until at least `n` connections have been accepted.
    pub async fn wait_for_connections(&self, n: usize) {
        loop {
            let notified = self.state.connected.notified();
            if self.connection_count() >= n {
                return;
            }
            notified.await;
        }
    }

    /// Sends a text frame to every currently connected client. Dropped
    /// silently when nothing is connected.
    pub fn push_frame(&self, frame: &str) {
        let _ = self.state.outbound.send(frame.to_string());
    }

    /// Terminates current connections without a close handshake.
    pub fn drop_connection(&self) {
        self.state.close_current.notify_waiters();
    }

    /// The request URI (path and query) of each accepted handshake, in
    /// connection order.
    pub async fn request_uris(&self) -> Vec<String> {
        self.state.request_uris.lock().await.clone()
    }

    /// Every text frame clients have sent, in arrival order.
    pub async fn received_texts(&self) -> Vec<String> {
        self.state.received.lock().await.clone()
    }

    /// Waits until at least `n` client text frames have arrived.
    pub async fn wait_for_received(&self, n: usize) {
        loop {
            let notified = self.state.received_notify.notified();
            if self.state.received.lock().await.len() >= n {
                return;
            }
            notified.await;
        }
    }
}

impl Drop for MockLiveServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

/// Serves one accepted connection until the client leaves, the outbound
/// channel closes, or the test drops it.
async fn serve_connection(stream: TcpStream, state: Arc<LiveServerState>) {
    let mut request_uri = String::new();
    let ws = match tokio_tungstenite::accept_hdr_async(stream, |req: &Request, resp: Response| {
        request_uri = req.uri().to_string();
        Ok::<_, ErrorResponse>(resp)
    })
    .await
    {
        Ok(ws) => ws,
        Err(_) => return,
    };

    let (mut write, mut read) = ws.split();
    // Subscribe before announcing the connection, so frames pushed right
    // after wait_for_connections() cannot be missed.
    let mut outbound = state.outbound.subscribe();

    state.request_uris.lock().await.push(request_uri);
    state.connections.fetch_add(1, Ordering::SeqCst);
    state.connected.notify_waiters();

    loop {
        tokio::select! {
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    state.received.lock().await.push(text.to_string());
                    state.received_notify.notify_waiters();
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
            frame = outbound.recv() => match frame {
                Ok(text) => {
                    if write.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = state.close_current.notified() => {
                // Drop both halves with no close frame.
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::new_message_frame;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn client_receives_pushed_frames() {
        let server = MockLiveServer::start().await.unwrap();
        let url = format!("{}/ws/conversations/conv-1", server.url());

        let (ws, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
        let (_write, mut read) = ws.split();
        server.wait_for_connections(1).await;

        server.push_frame(&new_message_frame(
            "conv-1",
            "msg_1",
            "agent_sarah",
            "agent",
            "hello",
        ));

        let msg = timeout(Duration::from_secs(2), read.next())
            .await
            .expect("frame should arrive")
            .unwrap()
            .unwrap();
        match msg {
            Message::Text(text) => {
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                assert_eq!(value["type"], "new_message");
            }
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_records_client_texts_and_uri() {
        let server = MockLiveServer::start().await.unwrap();
        let url = format!(
            "{}/ws/conversations/conv-9?user_type=customer&user_id=console-1",
            server.url()
        );

        let (ws, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
        let (mut write, _read) = ws.split();
        server.wait_for_connections(1).await;

        write
            .send(Message::Text(r#"{"type":"typing_start"}"#.into()))
            .await
            .unwrap();

        timeout(Duration::from_secs(2), server.wait_for_received(1))
            .await
            .expect("client frame should be recorded");

        let texts = server.received_texts().await;
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("typing_start"));

        let uris = server.request_uris().await;
        assert!(uris[0].contains("/ws/conversations/conv-9"));
        assert!(uris[0].contains("user_type=customer"));
        assert!(uris[0].contains("user_id=console-1"));
    }

    #[tokio::test]
    async fn drop_connection_terminates_stream_abnormally() {
        let server = MockLiveServer::start().await.unwrap();
        let url = format!("{}/ws/conversations/conv-1", server.url());

        let (ws, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
        let (_write, mut read) = ws.split();
        server.wait_for_connections(1).await;

        server.drop_connection();

        // The stream ends without a server-initiated close frame.
        let next = timeout(Duration::from_secs(2), read.next())
            .await
            .expect("stream should terminate");
        match next {
            None | Some(Err(_)) => {}
            Some(Ok(msg)) => panic!("expected abnormal termination, got {msg:?}"),
        }
    }

    #[tokio::test]
    async fn counts_reconnections() {
        let server = MockLiveServer::start().await.unwrap();
        let url = format!("{}/ws/conversations/conv-1", server.url());

        let (first, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
        server.wait_for_connections(1).await;
        drop(first);

        let (_second, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
        timeout(Duration::from_secs(2), server.wait_for_connections(2))
            .await
            .expect("second connection should be counted");
        assert_eq!(server.connection_count(), 2);
    }
}
