// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Deskwire console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use deskwire_core::{Identity, SenderRole};
use serde::{Deserialize, Serialize};

/// Top-level Deskwire configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeskwireConfig {
    /// Console behavior settings.
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Identity announced on live connections and used for authored messages.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Backend REST API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Live transport (WebSocket) settings.
    #[serde(default)]
    pub live: LiveConfig,
}

impl DeskwireConfig {
    /// Builds the caller [`Identity`] from the `[identity]` section.
    ///
    /// `identity.role` is checked by validation at load time; an unparseable
    /// value here falls back to the customer role rather than panicking.
    pub fn identity(&self) -> Identity {
        let role = self
            .identity
            .role
            .parse::<SenderRole>()
            .unwrap_or(SenderRole::Customer);
        Identity::new(role, self.identity.user_id.clone())
    }
}

/// Console behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Caller identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Role announced to the backend (customer, agent, system).
    #[serde(default = "default_role")]
    pub role: String,

    /// Stable identifier for this console instance. Generated per process
    /// when left unset.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            role: default_role(),
            user_id: default_user_id(),
        }
    }
}

fn default_role() -> String {
    "customer".to_string()
}

fn default_user_id() -> String {
    format!("console-{}", uuid::Uuid::new_v4())
}

/// Backend REST API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are joined to.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. A hung send rolls back the optimistic
    /// entry the same way an error response does.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8001/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Live transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LiveConfig {
    /// Base URL the per-conversation WebSocket path is joined to.
    #[serde(default = "default_live_base_url")]
    pub base_url: String,

    /// Fixed delay before the single scheduled reconnection attempt, in
    /// seconds. There is no backoff growth and no retry cap.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_live_base_url(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

fn default_live_base_url() -> String {
    "ws://127.0.0.1:8001/api".to_string()
}

fn default_reconnect_delay_secs() -> u64 {
    3
}
