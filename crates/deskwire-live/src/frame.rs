// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire frame decoding for the live channel.
//!
//! Server -> Client (JSON envelope):
//! ```json
//! {"type": "new_message", "conversation_id": "...", "data": {...}, "timestamp": "..."}
//! ```
//!
//! Client -> Server (JSON):
//! ```json
//! {"type": "typing_start"}
//! {"type": "typing_stop"}
//! {"type": "status_request"}
//! ```
//!
//! Decoding happens exactly once, here at the transport boundary. Everything
//! past this module works with the closed [`Frame`] sum; an unrecognized tag
//! becomes [`Frame::Unknown`] instead of leaking raw JSON downstream.

use std::collections::HashMap;

use deskwire_core::{ConversationStatus, DeskwireError, Message, SenderRole};
use serde::Deserialize;

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// One chat message to append, subject to the store's dedup policy.
    NewMessage(Message),
    /// The composing set changed.
    TypingIndicator {
        conversation_id: String,
        /// The agent whose typing state toggled.
        agent_id: String,
        /// The toggled state.
        is_typing: bool,
        /// Full set of agents composing after the toggle.
        typing_agents: Vec<String>,
    },
    /// The conversation moved to a new status.
    StatusUpdate {
        conversation_id: String,
        status: ConversationStatus,
        note: String,
    },
    /// An agent was assigned to the conversation.
    AgentAssigned {
        conversation_id: String,
        agent_id: String,
        agent_name: String,
        note: String,
    },
    /// The conversation was escalated to a human.
    Escalation {
        conversation_id: String,
        reason: String,
        note: String,
    },
    /// The backend acknowledged the subscription. Flat on the wire, no
    /// `data` object.
    ConnectionConfirmed {
        conversation_id: String,
        user_type: String,
        user_id: String,
    },
    /// Reply to a `status_request` command.
    ConversationStatus {
        conversation_id: String,
        participants: u32,
        typing_agents: Vec<String>,
    },
    /// A tag this build does not recognize. Logged and otherwise ignored.
    Unknown {
        conversation_id: String,
        kind: String,
    },
}

impl Frame {
    /// The conversation the frame belongs to.
    pub fn conversation_id(&self) -> &str {
        match self {
            Frame::NewMessage(message) => message.conversation_id.as_deref().unwrap_or_default(),
            Frame::TypingIndicator {
                conversation_id, ..
            }
            | Frame::StatusUpdate {
                conversation_id, ..
            }
            | Frame::AgentAssigned {
                conversation_id, ..
            }
            | Frame::Escalation {
                conversation_id, ..
            }
            | Frame::ConnectionConfirmed {
                conversation_id, ..
            }
            | Frame::ConversationStatus {
                conversation_id, ..
            }
            | Frame::Unknown {
                conversation_id, ..
            } => conversation_id,
        }
    }
}

/// An outbound command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientFrame {
    /// The console user started composing.
    TypingStart,
    /// The console user stopped composing.
    TypingStop,
    /// Ask for a `conversation_status` reply.
    StatusRequest,
}

impl ClientFrame {
    /// Wire form of the command.
    pub fn to_wire(self) -> &'static str {
        match self {
            ClientFrame::TypingStart => r#"{"type":"typing_start"}"#,
            ClientFrame::TypingStop => r#"{"type":"typing_stop"}"#,
            ClientFrame::StatusRequest => r#"{"type":"status_request"}"#,
        }
    }
}

/// Raw envelope, before the tag is examined. `connection_confirmed` carries
/// its fields flat instead of under `data`, so those are optional here.
#[derive(Debug, Deserialize)]
struct FrameEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    conversation_id: String,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    user_type: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewMessageData {
    message_id: String,
    sender_id: String,
    sender_type: SenderRole,
    content: String,
    #[serde(default)]
    metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    attachments: Vec<String>,
    #[serde(default)]
    is_ai_generated: bool,
}

#[derive(Debug, Deserialize)]
struct TypingIndicatorData {
    agent_id: String,
    is_typing: bool,
    #[serde(default)]
    typing_agents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StatusUpdateData {
    status: ConversationStatus,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct AgentAssignedData {
    agent_id: String,
    agent_name: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct EscalationData {
    reason: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ConversationStatusData {
    #[serde(default)]
    participants: u32,
    #[serde(default)]
    typing_agents: Vec<String>,
}

/// Decodes one wire frame into the closed [`Frame`] sum.
///
/// A recognized tag with a payload that does not match its schema is an
/// error (the caller logs it and keeps the connection); an unrecognized tag
/// decodes successfully to [`Frame::Unknown`].
pub fn decode_frame(text: &str) -> Result<Frame, DeskwireError> {
    let envelope: FrameEnvelope = serde_json::from_str(text)
        .map_err(|e| DeskwireError::Frame(format!("invalid frame envelope: {e}")))?;

    match envelope.kind.as_str() {
        "new_message" => {
            let data: NewMessageData = decode_data("new_message", envelope.data)?;
            Ok(Frame::NewMessage(Message {
                id: data.message_id,
                conversation_id: Some(envelope.conversation_id),
                sender_id: data.sender_id,
                sender_role: data.sender_type,
                content: data.content,
                metadata: data.metadata,
                timestamp: envelope.timestamp,
                attachments: data.attachments,
                is_ai_generated: data.is_ai_generated,
            }))
        }
        "typing_indicator" => {
            let data: TypingIndicatorData = decode_data("typing_indicator", envelope.data)?;
            Ok(Frame::TypingIndicator {
                conversation_id: envelope.conversation_id,
                agent_id: data.agent_id,
                is_typing: data.is_typing,
                typing_agents: data.typing_agents,
            })
        }
        "status_update" => {
            let data: StatusUpdateData = decode_data("status_update", envelope.data)?;
            Ok(Frame::StatusUpdate {
                conversation_id: envelope.conversation_id,
                status: data.status,
                note: data.message,
            })
        }
        "agent_assigned" => {
            let data: AgentAssignedData = decode_data("agent_assigned", envelope.data)?;
            Ok(Frame::AgentAssigned {
                conversation_id: envelope.conversation_id,
                agent_id: data.agent_id,
                agent_name: data.agent_name,
                note: data.message,
            })
        }
        "escalation" => {
            let data: EscalationData = decode_data("escalation", envelope.data)?;
            Ok(Frame::Escalation {
                conversation_id: envelope.conversation_id,
                reason: data.reason,
                note: data.message,
            })
        }
        "connection_confirmed" => Ok(Frame::ConnectionConfirmed {
            conversation_id: envelope.conversation_id,
            user_type: envelope.user_type.unwrap_or_default(),
            user_id: envelope.user_id.unwrap_or_default(),
        }),
        "conversation_status" => {
            let data: ConversationStatusData = decode_data("conversation_status", envelope.data)?;
            Ok(Frame::ConversationStatus {
                conversation_id: envelope.conversation_id,
                participants: data.participants,
                typing_agents: data.typing_agents,
            })
        }
        other => Ok(Frame::Unknown {
            conversation_id: envelope.conversation_id,
            kind: other.to_string(),
        }),
    }
}

fn decode_data<T: serde::de::DeserializeOwned>(
    tag: &str,
    data: serde_json::Value,
) -> Result<T, DeskwireError> {
    serde_json::from_value(data)
        .map_err(|e| DeskwireError::Frame(format!("invalid {tag} payload: {e}")))
}
