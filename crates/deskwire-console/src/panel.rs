// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One open conversation: frame dispatch plus the optimistic send path.
//!
//! The panel owns a [`ConversationStore`] and turns decoded frames into
//! renderable updates. Sends append a local placeholder before the REST
//! call resolves; on failure the placeholder is removed by the exact
//! identifier captured at append time, on success the server echo promotes
//! it whenever it arrives.

use std::collections::HashMap;

use chrono::Utc;
use deskwire_api::{ApiClient, SendMessageRequest};
use deskwire_core::{
    Conversation, ConversationStatus, DeskwireError, Identity, Message,
};
use deskwire_live::Frame;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::store::{Applied, ConversationStore};

/// One renderable effect of an inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelUpdate {
    /// A new message to render.
    Message(Message),
    /// A pending send was confirmed by its server echo. The entry is already
    /// rendered; it now carries the authoritative identifier.
    Confirmed(Message),
    /// The agent composing flag changed.
    Typing(bool),
    /// A transient informational line.
    Notice(String),
}

/// View-side state of one conversation.
pub struct ConversationPanel {
    identity: Identity,
    store: ConversationStore,
}

impl ConversationPanel {
    /// Fetches the conversation over REST and hydrates the panel.
    pub async fn open(
        api: &ApiClient,
        conversation_id: &str,
        identity: Identity,
    ) -> Result<Self, DeskwireError> {
        let conversation = api.get_conversation(conversation_id).await?;
        Ok(Self::hydrate(conversation, identity))
    }

    /// Builds the panel from an already fetched conversation.
    pub fn hydrate(conversation: Conversation, identity: Identity) -> Self {
        Self {
            identity,
            store: ConversationStore::hydrate(conversation),
        }
    }

    /// Dispatches one decoded frame. Frames are handled strictly in call
    /// order; each produces zero or more updates to render.
    pub fn apply_frame(&mut self, frame: Frame) -> Vec<PanelUpdate> {
        match frame {
            Frame::NewMessage(message) => match self.store.apply_inbound(message.clone()) {
                Applied::Appended => vec![PanelUpdate::Message(message)],
                Applied::Promoted => vec![PanelUpdate::Confirmed(message)],
                Applied::Duplicate => vec![],
            },
            Frame::TypingIndicator { typing_agents, .. } => self.refresh_typing(&typing_agents),
            Frame::StatusUpdate { status, note, .. } => {
                self.store.set_status(status);
                vec![PanelUpdate::Notice(note)]
            }
            Frame::AgentAssigned { note, .. } => vec![PanelUpdate::Notice(note)],
            Frame::Escalation { reason, note, .. } => {
                let notice = if reason.is_empty() {
                    note
                } else {
                    format!("{note} ({reason})")
                };
                vec![PanelUpdate::Notice(notice)]
            }
            Frame::ConnectionConfirmed {
                user_type, user_id, ..
            } => vec![PanelUpdate::Notice(format!(
                "connected as {user_type} {user_id}"
            ))],
            Frame::ConversationStatus {
                participants,
                typing_agents,
                ..
            } => {
                let mut updates = self.refresh_typing(&typing_agents);
                updates.push(PanelUpdate::Notice(format!(
                    "{participants} participant(s) in conversation"
                )));
                updates
            }
            Frame::Unknown { kind, .. } => {
                debug!(kind = %kind, "unrecognized frame ignored");
                vec![]
            }
        }
    }

    /// Sends a message through the optimistic path.
    ///
    /// Content must be non-empty after trimming; otherwise this fails
    /// without touching the store or the network. The placeholder appended
    /// here is rolled back on REST failure and promoted by its server echo
    /// on success.
    pub async fn send(
        &mut self,
        api: &ApiClient,
        content: &str,
        attachments: Vec<String>,
        metadata: HashMap<String, Value>,
    ) -> Result<(), DeskwireError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DeskwireError::EmptyMessage);
        }

        let conversation_id = self.store.conversation_id().to_string();
        let request = SendMessageRequest {
            content: content.to_string(),
            attachments: attachments.clone(),
            metadata: metadata.clone(),
        };
        let placeholder = Message {
            id: format!("local-{}", Uuid::new_v4()),
            conversation_id: Some(conversation_id.clone()),
            sender_id: self.identity.user_id.clone(),
            sender_role: self.identity.role,
            content: content.to_string(),
            metadata,
            timestamp: Utc::now().to_rfc3339(),
            attachments,
            is_ai_generated: false,
        };
        let captured = self.store.append_pending(placeholder);

        match api.send_message(&conversation_id, &request).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let removed = self.store.rollback(&captured);
                warn!(
                    id = %captured.0,
                    removed,
                    error = %e,
                    "send failed, optimistic entry rolled back"
                );
                Err(e)
            }
        }
    }

    pub fn conversation_id(&self) -> &str {
        self.store.conversation_id()
    }

    /// Messages in arrival order, placeholders included.
    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn status(&self) -> ConversationStatus {
        self.store.status()
    }

    pub fn agent_typing(&self) -> bool {
        self.store.agent_typing()
    }

    /// Optimistic entries still awaiting their echo.
    pub fn pending_count(&self) -> usize {
        self.store.pending_count()
    }

    fn refresh_typing(&mut self, typing_agents: &[String]) -> Vec<PanelUpdate> {
        let typing = !typing_agents.is_empty();
        if self.store.set_typing(typing) {
            vec![PanelUpdate::Typing(typing)]
        } else {
            vec![]
        }
    }
}
