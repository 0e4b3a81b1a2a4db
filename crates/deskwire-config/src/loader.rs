// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./deskwire.toml` > `~/.config/deskwire/deskwire.toml` > `/etc/deskwire/deskwire.toml`
//! with environment variable overrides via `DESKWIRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DeskwireConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/deskwire/deskwire.toml` (system-wide)
/// 3. `~/.config/deskwire/deskwire.toml` (user XDG config)
/// 4. `./deskwire.toml` (local directory)
/// 5. `DESKWIRE_*` environment variables
pub fn load_config() -> Result<DeskwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskwireConfig::default()))
        .merge(Toml::file("/etc/deskwire/deskwire.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("deskwire/deskwire.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("deskwire.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for callers that already hold the file contents.
pub fn load_config_from_str(toml_content: &str) -> Result<DeskwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskwireConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DeskwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskwireConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `DESKWIRE_API_BASE_URL` must
/// map to `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("DESKWIRE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DESKWIRE_LIVE_RECONNECT_DELAY_SECS -> "live_reconnect_delay_secs"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("console_", "console.", 1)
            .replacen("identity_", "identity.", 1)
            .replacen("api_", "api.", 1)
            .replacen("live_", "live.", 1);
        mapped.into()
    })
}
