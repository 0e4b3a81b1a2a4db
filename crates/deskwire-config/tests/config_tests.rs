// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Deskwire configuration system.

use deskwire_config::diagnostic::{ConfigError, suggest_key};
use deskwire_config::model::DeskwireConfig;
use deskwire_config::{load_and_validate_str, load_config_from_path, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_deskwire_config() {
    let toml = r#"
[console]
log_level = "debug"

[identity]
role = "agent"
user_id = "desk-7"

[api]
base_url = "https://support.example.com/api"
timeout_secs = 10

[live]
base_url = "wss://support.example.com/api"
reconnect_delay_secs = 5
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.console.log_level, "debug");
    assert_eq!(config.identity.role, "agent");
    assert_eq!(config.identity.user_id, "desk-7");
    assert_eq!(config.api.base_url, "https://support.example.com/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.live.base_url, "wss://support.example.com/api");
    assert_eq!(config.live.reconnect_delay_secs, 5);
}

/// Unknown field in [api] section produces an UnknownField error.
#[test]
fn unknown_field_in_api_produces_error() {
    let toml = r#"
[api]
base_ur = "http://localhost:8001/api"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ur"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown field in [live] section produces an UnknownField error.
#[test]
fn unknown_field_in_live_produces_error() {
    let toml = r#"
[live]
reconect_delay_secs = 5
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("reconect_delay_secs"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.console.log_level, "info");
    assert_eq!(config.identity.role, "customer");
    assert!(config.identity.user_id.starts_with("console-"));
    assert_eq!(config.api.base_url, "http://127.0.0.1:8001/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.live.base_url, "ws://127.0.0.1:8001/api");
    assert_eq!(config.live.reconnect_delay_secs, 3);
}

/// A later layer overrides an earlier one key by key.
#[test]
fn later_layer_overrides_api_base_url() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[api]
base_url = "http://from-toml:8001/api"
"#;

    // Simulate DESKWIRE_API_BASE_URL by merging a dotted-key provider on top.
    let config: DeskwireConfig = Figment::new()
        .merge(Serialized::defaults(DeskwireConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("api.base_url", "http://from-env:8001/api"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.api.base_url, "http://from-env:8001/api");
}

/// Dotted-key overrides reach nested keys containing underscores
/// (live.reconnect_delay_secs, not live.reconnect.delay.secs).
#[test]
fn dotted_key_override_keeps_underscored_names() {
    use figment::{Figment, providers::Serialized};

    let config: DeskwireConfig = Figment::new()
        .merge(Serialized::defaults(DeskwireConfig::default()))
        .merge(("live.reconnect_delay_secs", 7u64))
        .extract()
        .expect("should set reconnect delay via dot notation");

    assert_eq!(config.live.reconnect_delay_secs, 7);
}

/// load_and_validate_str surfaces validation errors as diagnostics.
#[test]
fn load_and_validate_rejects_bad_scheme() {
    let toml = r#"
[live]
base_url = "http://support.example.com/api"
"#;

    let errors = load_and_validate_str(toml).expect_err("http scheme on live url should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("live.base_url"))
    ));
}

/// Typo in a known section yields a "did you mean" suggestion candidate.
#[test]
fn suggestion_found_for_near_miss_key() {
    let valid = &["base_url", "reconnect_delay_secs"];
    assert_eq!(
        suggest_key("reconnect_delay_sec", valid),
        Some("reconnect_delay_secs".to_string())
    );
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: DeskwireConfig = Figment::new()
        .merge(Serialized::defaults(DeskwireConfig::default()))
        .merge(Toml::file("/nonexistent/path/deskwire.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.api.base_url, "http://127.0.0.1:8001/api");
}

/// An explicit config file path loads on top of the compiled defaults.
#[test]
#[serial_test::serial]
fn explicit_path_loads_file_over_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deskwire.toml");
    std::fs::write(
        &path,
        r#"
[api]
timeout_secs = 12
"#,
    )
    .expect("write config file");

    let config = load_config_from_path(&path).expect("file should load");
    assert_eq!(config.api.timeout_secs, 12);
    // Keys the file does not set keep their defaults.
    assert_eq!(config.live.reconnect_delay_secs, 3);
}

/// A DESKWIRE_* environment variable overrides the same key from a file.
#[test]
#[serial_test::serial]
fn env_var_overrides_file_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deskwire.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "http://from-file:8001/api"
"#,
    )
    .expect("write config file");

    // set_var is unsafe in edition 2024; #[serial] keeps other env-touching
    // tests from racing this one.
    unsafe { std::env::set_var("DESKWIRE_API_BASE_URL", "http://from-env:8001/api") };
    let result = load_config_from_path(&path);
    unsafe { std::env::remove_var("DESKWIRE_API_BASE_URL") };

    let config = result.expect("file plus env should load");
    assert_eq!(config.api.base_url, "http://from-env:8001/api");
}
