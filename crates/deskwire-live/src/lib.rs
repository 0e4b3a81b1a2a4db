// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live conversation updates over WebSocket.
//!
//! The backend pushes tagged frames per conversation; this crate keeps the
//! connection alive across failures and hands decoded frames plus state
//! transitions to the console in arrival order.
//!
//! # Components
//!
//! - [`LiveClient`] -- factory opening one channel per conversation
//! - [`LiveHandle`] -- event stream, outbound commands, explicit close
//! - [`Frame`] / [`ClientFrame`] -- decoded inbound and outbound frames
//! - [`LinkState`] -- the connection lifecycle state machine

pub mod client;
pub mod frame;
pub mod state;

pub use client::{LiveClient, LiveEvent, LiveHandle};
pub use frame::{ClientFrame, Frame, decode_frame};
pub use state::LinkState;
