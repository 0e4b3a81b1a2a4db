// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Deskwire integration tests.
//!
//! Provides a scriptable WebSocket server and wire-frame builders for fast,
//! deterministic, CI-runnable tests without a real backend.
//!
//! # Components
//!
//! - [`MockLiveServer`] - loopback WebSocket server with frame injection
//!   and abnormal-close control, recording everything clients send
//! - [`frames`] - builders producing the backend's exact frame JSON

pub mod frames;
pub mod live_server;

pub use live_server::MockLiveServer;
