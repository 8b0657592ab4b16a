//! Unit tests for CLI module
//!
//! Tests command registry, help text and formatting.
//! Only commands that need no session bus are executed.

use std::{sync::Arc, time::Duration};

use crate::{
    cli::{
        CliError, CliService, Command, CommandRegistry,
        commands::config::{PathCommand, SchemaCommand},
        formatting::{format_duration, format_progress},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
};

fn metadata_with_args(required: usize, optional: usize) -> CommandMetadata {
    let arg = |required| CommandArg {
        name: "arg".to_string(),
        description: String::new(),
        required,
        value_type: ArgType::String,
    };

    CommandMetadata {
        name: "test".to_string(),
        description: String::new(),
        args: (0..required)
            .map(|_| arg(true))
            .chain((0..optional).map(|_| arg(false)))
            .collect(),
        examples: vec![],
        category: "test".to_string(),
    }
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn format_duration_minutes_and_hours() {
    assert_eq!(format_duration(Duration::ZERO), "00:00");
    assert_eq!(format_duration(Duration::from_secs(59)), "00:59");
    assert_eq!(format_duration(Duration::from_millis(61_999)), "01:01");
    assert_eq!(format_duration(Duration::from_secs(3600)), "1:00:00");
}

#[test]
fn format_progress_fills_proportionally() {
    let length = Duration::from_secs(100);

    assert_eq!(format_progress(Duration::ZERO, length, 10), "[          ]");
    assert_eq!(
        format_progress(Duration::from_secs(50), length, 10),
        "[=====     ]"
    );
    assert_eq!(format_progress(length * 2, length, 10), "[==========]");
    assert_eq!(format_progress(length, Duration::ZERO, 4), "[    ]");
}

#[test]
fn command_registry_starts_empty() {
    let registry = CommandRegistry::new(Arc::new(Config::default()));

    assert!(registry.list_commands().is_empty());
}

#[test]
fn command_registry_lists_all_commands_sorted() {
    let service = CliService::new(Config::default());

    let listing = service.list_all();
    assert_eq!(
        listing,
        vec![
            (
                "config".to_string(),
                args(&["path", "schema", "show"])
            ),
            (
                "media".to_string(),
                args(&[
                    "info",
                    "next",
                    "pause",
                    "play",
                    "play-pause",
                    "previous",
                    "seek",
                    "watch"
                ])
            ),
        ]
    );
}

#[test]
fn validate_args_counts() {
    let metadata = metadata_with_args(1, 1);

    assert!(CommandRegistry::validate_args(&metadata, &args(&["a"])).is_ok());
    assert!(CommandRegistry::validate_args(&metadata, &args(&["a", "b"])).is_ok());
    assert!(matches!(
        CommandRegistry::validate_args(&metadata, &[]),
        Err(CliError::InvalidArguments(_))
    ));
    assert!(matches!(
        CommandRegistry::validate_args(&metadata, &args(&["a", "b", "c"])),
        Err(CliError::InvalidArguments(_))
    ));
}

#[tokio::test]
async fn unknown_category_and_command_are_reported() {
    let service = CliService::new(Config::default());

    assert!(matches!(
        service.execute_command("audio", "mute", &[]).await,
        Err(CliError::CommandNotFound(_))
    ));
    assert!(matches!(
        service.execute_command("media", "shuffle", &[]).await,
        Err(CliError::CommandNotFound(_))
    ));
}

#[tokio::test]
async fn too_many_arguments_rejected_before_execution() {
    let service = CliService::new(Config::default());

    let result = service
        .execute_command("media", "play", &args(&["now"]))
        .await;

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn config_show_prints_effective_toml() {
    let mut config = Config::default();
    config.media.ignored_players = vec!["firefox".to_string()];
    let service = CliService::new(config.clone());

    let output = service.execute_command("config", "show", &[]).await.unwrap();

    let parsed: Config = toml::from_str(&output).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn default_config_commands_match_registered_names() {
    assert_eq!(PathCommand::default().metadata().name, "path");
    assert_eq!(SchemaCommand::default().metadata().name, "schema");
}

#[tokio::test]
async fn config_schema_is_json() {
    let service = CliService::new(Config::default());

    let output = service
        .execute_command("config", "schema", &[])
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(value.get("properties").is_some());
}

#[test]
fn help_mentions_every_category() {
    let help = CliService::new(Config::default()).help();

    assert!(help.contains("config"));
    assert!(help.contains("media"));
    assert!(help.contains("play-pause"));
}

#[test]
fn command_help_lists_arguments_and_examples() {
    let service = CliService::new(Config::default());

    let help = service.command_help("media", "seek").unwrap();
    assert!(help.contains("<position>"));
    assert!(help.contains("mediamirror media seek 1:30"));

    assert!(matches!(
        service.command_help("media", "shuffle"),
        Err(CliError::CommandNotFound(_))
    ));
}
