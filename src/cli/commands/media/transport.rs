use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
    services::media::TransportCommand,
};

use super::utils::{attach_observer, bound_player_name};

/// Sends one argument-less transport command to the active player
///
/// Backs `play`, `pause`, `play-pause`, `next` and `previous`.
pub struct TransportCliCommand {
    config: Arc<Config>,
    name: &'static str,
    description: &'static str,
    verb: &'static str,
    command: TransportCommand,
}

impl TransportCliCommand {
    /// Start playback
    pub fn play(config: Arc<Config>) -> Self {
        Self {
            config,
            name: "play",
            description: "Start playback on the active media player",
            verb: "Playing",
            command: TransportCommand::Play,
        }
    }

    /// Pause playback
    pub fn pause(config: Arc<Config>) -> Self {
        Self {
            config,
            name: "pause",
            description: "Pause the active media player",
            verb: "Paused",
            command: TransportCommand::Pause,
        }
    }

    /// Toggle between playing and paused
    pub fn play_pause(config: Arc<Config>) -> Self {
        Self {
            config,
            name: "play-pause",
            description: "Toggle play/pause state of the active media player",
            verb: "Toggled playback for",
            command: TransportCommand::TogglePlayPause,
        }
    }

    /// Skip to the next track
    pub fn next(config: Arc<Config>) -> Self {
        Self {
            config,
            name: "next",
            description: "Skip to the next track",
            verb: "Skipped to next track on",
            command: TransportCommand::SkipNext,
        }
    }

    /// Go back to the previous track
    pub fn previous(config: Arc<Config>) -> Self {
        Self {
            config,
            name: "previous",
            description: "Go back to the previous track",
            verb: "Went to previous track on",
            command: TransportCommand::SkipPrevious,
        }
    }
}

#[async_trait]
impl Command for TransportCliCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let attached = attach_observer(&self.config).await?;
        let player_name = bound_player_name(&attached.observer).await?;

        attached
            .observer
            .issue_transport_command(self.command)
            .await?;

        Ok(format!("{}: {player_name}", self.verb))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: "media".to_string(),
            args: vec![],
            examples: vec![format!("mediamirror media {}", self.name)],
        }
    }
}
