//! Unit tests for config module
//!
//! Tests configuration types, defaults, parsing, and validation.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]

use std::time::Duration;

use crate::{
    MirrorError,
    config::{Config, LogLevel},
    services::media::SessionLossPolicy,
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert!(config.media.ignored_players.is_empty());
    assert_eq!(config.media.session_loss, SessionLossPolicy::Retain);
    assert_eq!(config.display.dim_after_playing_secs, 7);
    assert_eq!(config.display.dim_after_paused_secs, 10);
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[media]"));
    assert!(toml_str.contains("[display]"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [media]
        ignored_players = ["firefox"]
        session_loss = "reset"

        [display]
        dim_after_playing_secs = 3
    "#;

    let config = Config::from_toml(toml_str, None).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.media.ignored_players, vec!["firefox".to_string()]);
    assert_eq!(config.media.session_loss, SessionLossPolicy::Reset);
    assert_eq!(config.display.dim_after_playing_secs, 3);
    assert_eq!(config.display.dim_after_paused_secs, 10);
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml("", None).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn config_invalid_toml() {
    let invalid_toml = r#"
        [general
        invalid syntax here
    "#;

    let result = Config::from_toml(invalid_toml, None);

    match result {
        Err(MirrorError::TomlParseError { location, .. }) => assert_eq!(location, "string"),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn config_unknown_fields() {
    let toml_with_unknown = r#"
        [general]
        log_level = "info"
        unknown_field = "should be ignored"

        [unknown_section]
        some_field = "ignored"
    "#;

    let config = Config::from_toml(toml_with_unknown, None).unwrap();
    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn config_rejects_zero_dim_delay() {
    let toml_str = r#"
        [display]
        dim_after_paused_secs = 0
    "#;

    let result = Config::from_toml(toml_str, None);

    assert!(matches!(
        result,
        Err(MirrorError::ConfigValidation { ref component, .. }) if component == "display"
    ));
}

#[test]
fn display_timing_uses_seconds() {
    let config = Config::default();
    let timing = config.display.timing();

    assert_eq!(timing.playing, Duration::from_secs(7));
    assert_eq!(timing.paused, Duration::from_secs(10));
}

#[test]
fn log_level_directive_matches_display() {
    for level in [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        assert_eq!(level.to_string(), level.as_directive());
    }
}

#[test]
fn schema_lists_sections() {
    let schema = serde_json::to_string(&Config::schema()).unwrap();

    assert!(schema.contains("general"));
    assert!(schema.contains("media"));
    assert!(schema.contains("display"));
}
