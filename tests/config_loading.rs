//! Integration tests for loading configuration files from disk.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;

use mediamirror::{
    MirrorError,
    config::{Config, LogLevel},
    services::media::SessionLossPolicy,
};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/mediamirror/config.toml");

    let config = Config::load(&path).unwrap();

    assert_eq!(config, Config::default());
    assert!(path.exists());

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# mediamirror configuration file"));
    assert_eq!(Config::from_toml(&written, None).unwrap(), Config::default());
}

#[test]
fn loads_all_sections() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[general]
log_level = "trace"

[media]
ignored_players = ["chromium", "kdeconnect"]
session_loss = "reset"

[display]
dim_after_playing_secs = 15
dim_after_paused_secs = 30
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Trace);
    assert_eq!(config.media.ignored_players, vec!["chromium", "kdeconnect"]);
    assert_eq!(config.media.session_loss, SessionLossPolicy::Reset);
    assert_eq!(config.display.dim_after_playing_secs, 15);
    assert_eq!(config.display.dim_after_paused_secs, 30);
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[media]\nsession_loss = \"reset\"\n");

    let config = Config::load(&path).unwrap();

    assert_eq!(config.media.session_loss, SessionLossPolicy::Reset);
    assert_eq!(config.general, Config::default().general);
    assert_eq!(config.display, Config::default().display);
}

#[test]
fn parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[general\nlog_level = ");

    let error = Config::load(&path).unwrap_err();

    match error {
        MirrorError::TomlParseError { location, .. } => {
            assert!(location.ends_with("config.toml"), "location was {location}");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn invalid_policy_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[media]\nsession_loss = \"forget\"\n");

    assert!(matches!(
        Config::load(&path),
        Err(MirrorError::TomlParseError { .. })
    ));
}
