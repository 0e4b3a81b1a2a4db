// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Deskwire workspace.
//!
//! These mirror the backend's wire representation: enums serialize as
//! lowercase snake_case strings, timestamps are RFC 3339 strings, and
//! metadata is an open-ended string-to-JSON mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Unique identifier for a message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Lifecycle state of a conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConversationStatus {
    #[default]
    Active,
    Pending,
    Resolved,
    Escalated,
    Closed,
}

/// Handling priority assigned to a conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Business medium a conversation arrived through. Distinct from the
/// transport channel (the WebSocket connection).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
    #[default]
    WebChat,
    Email,
    Phone,
    Sms,
    Whatsapp,
    Api,
}

/// Role of a message author. Older backend builds emit `user` for the
/// customer side; the alias keeps those payloads decodable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SenderRole {
    #[serde(alias = "user")]
    Customer,
    Agent,
    System,
}

/// Operational state of an agent on the roster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Inactive,
    Busy,
    Maintenance,
}

/// Caller identity announced when opening a live channel, carried as the
/// `user_type` and `user_id` connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: SenderRole,
    pub user_id: String,
}

impl Identity {
    pub fn new(role: SenderRole, user_id: impl Into<String>) -> Self {
        Self {
            role,
            user_id: user_id.into(),
        }
    }
}

/// A single message in a conversation. Immutable once created; identifiers
/// are unique within a conversation and stable across the REST-fetch and
/// WebSocket-push boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Present on REST payloads; push frames carry it on the envelope instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub sender_id: String,
    #[serde(rename = "sender_type")]
    pub sender_role: SenderRole,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// RFC 3339 creation timestamp.
    pub timestamp: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
}

/// A customer-service conversation with its embedded message log.
///
/// Created server-side; the console fetches it once on open and then extends
/// the message sequence incrementally from push frames. Local insertion order
/// equals arrival order -- the console never reorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub assigned_agent_id: Option<String>,
    #[serde(default)]
    pub status: ConversationStatus,
    #[serde(default)]
    pub priority: Priority,
    pub channel: Channel,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub escalated_to_human: bool,
    #[serde(default)]
    pub escalation_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
