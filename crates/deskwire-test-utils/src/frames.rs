// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for the wire frames the backend emits, for use in tests.
//!
//! Each builder returns the full JSON envelope as a string, shaped exactly
//! the way the backend's connection manager broadcasts it.

use chrono::Utc;

/// Mints a backend-style message id (`msg_<epoch millis>`).
pub fn backend_message_id() -> String {
    format!("msg_{}", Utc::now().timestamp_millis())
}

/// A `new_message` frame carrying one chat message.
pub fn new_message_frame(
    conversation_id: &str,
    message_id: &str,
    sender_id: &str,
    sender_type: &str,
    content: &str,
) -> String {
    serde_json::json!({
        "type": "new_message",
        "conversation_id": conversation_id,
        "data": {
            "sender_id": sender_id,
            "sender_type": sender_type,
            "content": content,
            "metadata": {},
            "message_id": message_id
        },
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}

/// A `typing_indicator` frame. `typing_agents` is the full set of agents
/// currently typing, after applying this change.
pub fn typing_frame(
    conversation_id: &str,
    agent_id: &str,
    is_typing: bool,
    typing_agents: &[&str],
) -> String {
    serde_json::json!({
        "type": "typing_indicator",
        "conversation_id": conversation_id,
        "data": {
            "agent_id": agent_id,
            "is_typing": is_typing,
            "typing_agents": typing_agents
        },
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}

/// A `status_update` frame announcing a conversation state change.
pub fn status_update_frame(conversation_id: &str, status: &str, message: &str) -> String {
    serde_json::json!({
        "type": "status_update",
        "conversation_id": conversation_id,
        "data": {
            "status": status,
            "message": message
        },
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}

/// An `agent_assigned` frame, with the backend's join announcement.
pub fn agent_assigned_frame(conversation_id: &str, agent_id: &str, agent_name: &str) -> String {
    serde_json::json!({
        "type": "agent_assigned",
        "conversation_id": conversation_id,
        "data": {
            "agent_id": agent_id,
            "agent_name": agent_name,
            "message": format!("{agent_name} has joined the conversation")
        },
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}

/// An `escalation` frame with the backend's fixed notice text.
pub fn escalation_frame(conversation_id: &str, reason: &str) -> String {
    serde_json::json!({
        "type": "escalation",
        "conversation_id": conversation_id,
        "data": {
            "reason": reason,
            "message": "This conversation has been escalated to a human agent"
        },
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}

/// The flat `connection_confirmed` frame the backend sends on accept.
/// Unlike the broadcast frames it carries no `data` object.
pub fn connection_confirmed_frame(conversation_id: &str, user_type: &str, user_id: &str) -> String {
    serde_json::json!({
        "type": "connection_confirmed",
        "conversation_id": conversation_id,
        "user_type": user_type,
        "user_id": user_id,
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}

/// A `conversation_status` frame, the reply to a `status_request`.
pub fn conversation_status_frame(
    conversation_id: &str,
    participants: u32,
    typing_agents: &[&str],
) -> String {
    serde_json::json!({
        "type": "conversation_status",
        "conversation_id": conversation_id,
        "data": {
            "participants": participants,
            "typing_agents": typing_agents,
            "timestamp": Utc::now().to_rfc3339()
        },
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}

/// A frame with a tag this console build does not know.
pub fn unknown_frame(conversation_id: &str, kind: &str) -> String {
    serde_json::json!({
        "type": kind,
        "conversation_id": conversation_id,
        "data": {},
        "timestamp": Utc::now().to_rfc3339()
    })
    .to_string()
}
