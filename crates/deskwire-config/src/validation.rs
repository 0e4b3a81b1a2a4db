// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL schemes and non-zero timers.

use std::str::FromStr;

use deskwire_core::SenderRole;

use crate::diagnostic::ConfigError;
use crate::model::DeskwireConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DeskwireConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate identity.role names a known sender role
    if SenderRole::from_str(config.identity.role.trim()).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "identity.role `{}` is not a known role (expected customer, agent, or system)",
                config.identity.role
            ),
        });
    }

    // Validate identity.user_id is not empty
    if config.identity.user_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "identity.user_id must not be empty".to_string(),
        });
    }

    // Validate api.base_url is an http(s) URL
    let api_url = config.api.base_url.trim();
    if api_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{api_url}` must start with http:// or https://"),
        });
    }

    // Validate api.timeout_secs is non-zero
    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    // Validate live.base_url is a ws(s) URL
    let live_url = config.live.base_url.trim();
    if live_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "live.base_url must not be empty".to_string(),
        });
    } else if !live_url.starts_with("ws://") && !live_url.starts_with("wss://") {
        errors.push(ConfigError::Validation {
            message: format!("live.base_url `{live_url}` must start with ws:// or wss://"),
        });
    }

    // Validate live.reconnect_delay_secs is non-zero
    if config.live.reconnect_delay_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "live.reconnect_delay_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
