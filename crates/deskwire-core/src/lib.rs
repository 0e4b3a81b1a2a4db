// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Deskwire console.
//!
//! This crate provides the workspace-wide error type and the domain data
//! model the other crates share: conversations and messages, the caller
//! identity, and the enumerated wire values they carry.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DeskwireError;
pub use types::{
    AgentStatus, Channel, Conversation, ConversationStatus, Identity, Message, MessageId,
    Priority, SenderRole,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deskwire_error_has_all_variants() {
        // Verify all 7 error variants exist and can be constructed.
        let _config = DeskwireError::Config("test".into());
        let _api = DeskwireError::Api {
            message: "test".into(),
            source: None,
        };
        let _transport = DeskwireError::Transport {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _frame = DeskwireError::Frame("test".into());
        let _empty = DeskwireError::EmptyMessage;
        let _timeout = DeskwireError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = DeskwireError::Internal("test".into());
    }

    #[test]
    fn error_messages_are_lowercase_and_prefixed() {
        let err = DeskwireError::Api {
            message: "backend returned 503".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "api error: backend returned 503");

        let err = DeskwireError::Config("missing base_url".into());
        assert_eq!(err.to_string(), "configuration error: missing base_url");

        let err = DeskwireError::EmptyMessage;
        assert_eq!(err.to_string(), "message content is empty");
    }

    #[test]
    fn message_id_round_trips() {
        let id = MessageId("local-42".into());
        let id2 = id.clone();
        assert_eq!(id, id2);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"local-42\"");
        let parsed: MessageId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn identity_construction() {
        let identity = Identity::new(SenderRole::Customer, "console-1");
        assert_eq!(identity.role, SenderRole::Customer);
        assert_eq!(identity.user_id, "console-1");
    }
}
