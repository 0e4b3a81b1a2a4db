// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Deskwire console.

use thiserror::Error;

/// The primary error type used across all Deskwire crates.
#[derive(Debug, Error)]
pub enum DeskwireError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// REST API errors (request failure, non-success status, malformed body).
    #[error("api error: {message}")]
    Api {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Live transport errors (connect failure, socket write failure).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An inbound frame could not be decoded into a known shape.
    #[error("frame decode error: {0}")]
    Frame(String),

    /// Message content was empty after trimming whitespace.
    #[error("message content is empty")]
    EmptyMessage,

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
