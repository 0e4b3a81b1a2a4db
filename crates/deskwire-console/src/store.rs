// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory state for one open conversation.
//!
//! The message sequence is append-only and keeps arrival order; rollback of
//! a failed optimistic send is the single exception. Status, priority, and
//! the composing flag are mutable scalars beside it. Every mutation runs on
//! the caller's task through `&mut self`, so the two writers (dispatcher
//! appends, optimistic sends) can never interleave.

use std::collections::HashMap;

use deskwire_core::{Conversation, ConversationStatus, Message, MessageId, Priority};
use tracing::debug;

/// Outcome of applying one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Appended at the tail as a new entry.
    Appended,
    /// The identifier was already present; the message was dropped.
    Duplicate,
    /// A pending optimistic entry adopted the authoritative identifier and
    /// kept its position.
    Promoted,
}

/// Message log and scalar state of one conversation.
pub struct ConversationStore {
    conversation_id: String,
    messages: Vec<Message>,
    /// Message id -> position in `messages`.
    positions: HashMap<String, usize>,
    /// Identifiers of optimistic entries awaiting their server echo, oldest
    /// first.
    pending: Vec<String>,
    status: ConversationStatus,
    priority: Priority,
    agent_typing: bool,
}

impl ConversationStore {
    /// Builds the store from a freshly fetched conversation.
    pub fn hydrate(conversation: Conversation) -> Self {
        let mut store = Self {
            conversation_id: conversation.id,
            messages: Vec::with_capacity(conversation.messages.len()),
            positions: HashMap::new(),
            pending: Vec::new(),
            status: conversation.status,
            priority: conversation.priority,
            agent_typing: false,
        };
        for message in conversation.messages {
            store.push(message);
        }
        store
    }

    /// Applies one inbound `new_message` under the dedup policy: known ids
    /// are dropped, echoes of pending sends promote the placeholder in
    /// place, everything else appends.
    pub fn apply_inbound(&mut self, message: Message) -> Applied {
        if self.positions.contains_key(&message.id) {
            debug!(id = %message.id, "duplicate message dropped");
            return Applied::Duplicate;
        }

        if let Some((slot, position)) = self.matching_pending(&message) {
            let local_id = self.pending.remove(slot);
            self.positions.remove(&local_id);
            self.positions.insert(message.id.clone(), position);
            debug!(local = %local_id, authoritative = %message.id, "pending send confirmed");
            self.messages[position] = message;
            return Applied::Promoted;
        }

        self.push(message);
        Applied::Appended
    }

    /// Appends an optimistic entry ahead of its REST request and returns the
    /// identifier to roll back with. Rollback accepts exactly this value.
    pub fn append_pending(&mut self, message: Message) -> MessageId {
        let id = MessageId(message.id.clone());
        self.pending.push(message.id.clone());
        self.push(message);
        id
    }

    /// Removes the optimistic entry appended under `id`. Returns false when
    /// the entry is gone: already promoted by its server echo, or already
    /// rolled back. Entries that were never pending are left alone.
    pub fn rollback(&mut self, id: &MessageId) -> bool {
        let Some(slot) = self.pending.iter().position(|pending| *pending == id.0) else {
            return false;
        };
        self.pending.remove(slot);

        let Some(position) = self.positions.remove(&id.0) else {
            return false;
        };
        self.messages.remove(position);
        // Entries behind the removed one shifted down by one.
        for (index, message) in self.messages.iter().enumerate().skip(position) {
            self.positions.insert(message.id.clone(), index);
        }
        true
    }

    /// Sets the agent composing flag. Returns true when the value changed.
    pub fn set_typing(&mut self, typing: bool) -> bool {
        let changed = self.agent_typing != typing;
        self.agent_typing = typing;
        changed
    }

    pub fn set_status(&mut self, status: ConversationStatus) {
        self.status = status;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Messages in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn agent_typing(&self) -> bool {
        self.agent_typing
    }

    /// Number of optimistic entries still awaiting their echo.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// First pending entry matching the echo by author and content.
    /// Returns (slot in `pending`, position in `messages`).
    fn matching_pending(&self, message: &Message) -> Option<(usize, usize)> {
        self.pending.iter().enumerate().find_map(|(slot, local_id)| {
            let position = *self.positions.get(local_id)?;
            let entry = &self.messages[position];
            (entry.sender_id == message.sender_id && entry.content == message.content)
                .then_some((slot, position))
        })
    }

    fn push(&mut self, message: Message) {
        self.positions.insert(message.id.clone(), self.messages.len());
        self.messages.push(message);
    }
}
