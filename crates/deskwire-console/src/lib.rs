// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation-side logic of the Deskwire console.
//!
//! # Components
//!
//! - [`ConversationStore`] -- append-only message log plus mutable scalars
//! - [`ConversationPanel`] -- frame dispatch and the optimistic send path
//! - [`PanelUpdate`] -- what the caller renders after each frame

pub mod panel;
pub mod store;

pub use panel::{ConversationPanel, PanelUpdate};
pub use store::{Applied, ConversationStore};
