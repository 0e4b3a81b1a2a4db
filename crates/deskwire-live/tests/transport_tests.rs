// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the live transport against an in-process
//! WebSocket server. Each test gets its own server on an ephemeral port.

use std::time::Duration;

use deskwire_config::LiveConfig;
use deskwire_core::{Identity, SenderRole};
use deskwire_live::{ClientFrame, Frame, LinkState, LiveClient, LiveEvent, LiveHandle};
use deskwire_test_utils::frames::{new_message_frame, typing_frame};
use deskwire_test_utils::MockLiveServer;
use tokio::time::timeout;

fn test_config(url: &str) -> LiveConfig {
    LiveConfig {
        base_url: url.to_string(),
        reconnect_delay_secs: 1,
    }
}

fn customer() -> Identity {
    Identity::new(SenderRole::Customer, "console-1")
}

/// The next state transition, skipping any frames that interleave.
async fn next_state(handle: &mut LiveHandle) -> LinkState {
    loop {
        let event = timeout(Duration::from_secs(5), handle.next_event())
            .await
            .expect("expected an event before timeout")
            .expect("event channel closed while waiting for a state");
        if let LiveEvent::State(state) = event {
            return state;
        }
    }
}

/// The next decoded frame, skipping state transitions.
async fn next_frame(handle: &mut LiveHandle) -> Frame {
    loop {
        let event = timeout(Duration::from_secs(5), handle.next_event())
            .await
            .expect("expected an event before timeout")
            .expect("event channel closed while waiting for a frame");
        if let LiveEvent::Frame(frame) = event {
            return frame;
        }
    }
}

/// Drives a fresh handle to the connected state.
async fn connect(server: &MockLiveServer, conversation_id: &str) -> (LiveClient, LiveHandle) {
    let mut client = LiveClient::new(&test_config(&server.url()));
    let mut handle = client.open(conversation_id, &customer());
    assert_eq!(next_state(&mut handle).await, LinkState::Connecting);
    assert_eq!(next_state(&mut handle).await, LinkState::Connected);
    timeout(Duration::from_secs(5), server.wait_for_connections(1))
        .await
        .expect("server never saw the connection");
    (client, handle)
}

#[tokio::test]
async fn url_carries_conversation_and_identity() {
    let server = MockLiveServer::start().await.unwrap();
    let (_client, _handle) = connect(&server, "conv-77").await;

    let uris = server.request_uris().await;
    assert_eq!(uris.len(), 1);
    assert!(uris[0].contains("/ws/conversations/conv-77"), "uri: {}", uris[0]);
    assert!(uris[0].contains("user_type=customer"), "uri: {}", uris[0]);
    assert!(uris[0].contains("user_id=console-1"), "uri: {}", uris[0]);
}

#[tokio::test]
async fn frames_arrive_in_push_order() {
    let server = MockLiveServer::start().await.unwrap();
    let (_client, mut handle) = connect(&server, "conv-1").await;

    for (id, content) in [("msg_1", "first"), ("msg_2", "second"), ("msg_3", "third")] {
        server.push_frame(&new_message_frame("conv-1", id, "agent_sarah", "agent", content));
    }

    for expected in ["first", "second", "third"] {
        match next_frame(&mut handle).await {
            Frame::NewMessage(message) => assert_eq!(message.content, expected),
            other => panic!("expected new message, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn malformed_frame_is_skipped_without_teardown() {
    let server = MockLiveServer::start().await.unwrap();
    let (_client, mut handle) = connect(&server, "conv-1").await;

    server.push_frame("{\"type\": \"new_message\", \"data\": 12}");
    server.push_frame(&typing_frame("conv-1", "agent_sarah", true, &["agent_sarah"]));

    // Only the well-formed frame comes through, on the same connection.
    match next_frame(&mut handle).await {
        Frame::TypingIndicator { agent_id, is_typing, .. } => {
            assert_eq!(agent_id, "agent_sarah");
            assert!(is_typing);
        }
        other => panic!("expected typing indicator, got {other:?}"),
    }
    assert_eq!(server.connection_count(), 1);
}

#[tokio::test]
async fn abnormal_close_reconnects_after_delay() {
    let server = MockLiveServer::start().await.unwrap();
    let (_client, mut handle) = connect(&server, "conv-1").await;

    server.drop_connection();

    assert_eq!(next_state(&mut handle).await, LinkState::ReconnectPending);
    assert_eq!(next_state(&mut handle).await, LinkState::Connecting);
    assert_eq!(next_state(&mut handle).await, LinkState::Connected);

    timeout(Duration::from_secs(5), server.wait_for_connections(2))
        .await
        .expect("no reconnection observed");
    assert_eq!(server.connection_count(), 2);

    // Frames flow again on the replacement connection.
    server.push_frame(&new_message_frame("conv-1", "msg_9", "agent_sarah", "agent", "back"));
    match next_frame(&mut handle).await {
        Frame::NewMessage(message) => assert_eq!(message.content, "back"),
        other => panic!("expected new message, got {other:?}"),
    }
}

#[tokio::test]
async fn close_cancels_pending_reconnect() {
    let server = MockLiveServer::start().await.unwrap();
    let (_client, mut handle) = connect(&server, "conv-1").await;

    server.drop_connection();
    assert_eq!(next_state(&mut handle).await, LinkState::ReconnectPending);

    handle.close();
    assert_eq!(next_state(&mut handle).await, LinkState::Disconnected);
    assert_eq!(handle.next_event().await, None);

    // Well past the reconnect delay: no second connection appears.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(server.connection_count(), 1);
}

#[tokio::test]
async fn close_while_connected_is_terminal() {
    let server = MockLiveServer::start().await.unwrap();
    let (_client, mut handle) = connect(&server, "conv-1").await;

    handle.close();
    assert_eq!(next_state(&mut handle).await, LinkState::Disconnected);
    assert_eq!(handle.next_event().await, None);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(server.connection_count(), 1);
}

#[tokio::test]
async fn opening_second_conversation_closes_first() {
    let server = MockLiveServer::start().await.unwrap();
    let (mut client, mut first) = connect(&server, "conv-1").await;

    let mut second = client.open("conv-2", &customer());

    // The first channel winds down without an explicit close call.
    loop {
        match timeout(Duration::from_secs(5), first.next_event())
            .await
            .expect("first channel should wind down")
        {
            Some(LiveEvent::State(LinkState::Disconnected)) => break,
            Some(_) => continue,
            None => panic!("first channel ended without reporting disconnected"),
        }
    }
    assert_eq!(first.next_event().await, None);

    assert_eq!(next_state(&mut second).await, LinkState::Connecting);
    assert_eq!(next_state(&mut second).await, LinkState::Connected);
    timeout(Duration::from_secs(5), server.wait_for_connections(2))
        .await
        .expect("second conversation never connected");

    let uris = server.request_uris().await;
    assert!(uris[1].contains("/ws/conversations/conv-2"), "uri: {}", uris[1]);
}

#[tokio::test]
async fn commands_reach_the_server_while_connected() {
    let server = MockLiveServer::start().await.unwrap();
    let (_client, handle) = connect(&server, "conv-1").await;

    handle.send_command(ClientFrame::TypingStart);
    handle.send_command(ClientFrame::StatusRequest);

    timeout(Duration::from_secs(5), server.wait_for_received(2))
        .await
        .expect("commands never reached the server");
    let texts = server.received_texts().await;
    assert_eq!(texts[0], "{\"type\":\"typing_start\"}");
    assert_eq!(texts[1], "{\"type\":\"status_request\"}");
}

#[tokio::test]
async fn commands_while_disconnected_are_dropped() {
    // Nothing listens on this address, so the channel never connects.
    let config = test_config("ws://127.0.0.1:1");
    let mut client = LiveClient::new(&config);
    let mut handle = client.open("conv-1", &customer());

    assert_eq!(next_state(&mut handle).await, LinkState::Connecting);
    handle.send_command(ClientFrame::TypingStart);
    assert_eq!(next_state(&mut handle).await, LinkState::ReconnectPending);

    handle.close();
    assert_eq!(next_state(&mut handle).await, LinkState::Disconnected);
    assert_eq!(handle.next_event().await, None);
}
