use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::{format_duration, format_progress},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
    services::media::{MediaSnapshot, ObserverState},
};

use super::utils::{attach_observer, player_display_name};

const PROGRESS_WIDTH: usize = 30;

/// Command to show the mirrored snapshot of the active media player
///
/// Prints the title, artist, playback state and position, or the snapshot
/// as JSON.
pub struct InfoCommand {
    config: Arc<Config>,
}

impl InfoCommand {
    /// Creates a new InfoCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn render(state: &ObserverState, snapshot: &MediaSnapshot) -> String {
        let mut output = String::new();

        match state {
            ObserverState::Bound(id) => {
                output.push_str(&format!("Player: {}\n", player_display_name(id.as_str())));
            }
            ObserverState::Idle => output.push_str("Player: none\n"),
        }

        let state_str = if snapshot.is_playing {
            "▶ Playing"
        } else {
            "⏸ Paused"
        };
        output.push_str(&format!("Playback State: {state_str}\n\n"));

        output.push_str("Current Track:\n");
        output.push_str(&format!("  Title: {}\n", snapshot.title));
        output.push_str(&format!("  Artist: {}\n", snapshot.artist));

        let position = snapshot.elapsed();
        match snapshot.track_length() {
            Some(length) => {
                output.push_str(&format!(
                    "  Position: {} / {}\n",
                    format_duration(position),
                    format_duration(length),
                ));
                output.push_str(&format!(
                    "  Progress: {}\n",
                    format_progress(position, length, PROGRESS_WIDTH)
                ));
            }
            None => output.push_str(&format!("  Position: {}\n", format_duration(position))),
        }

        if let Some(artwork) = &snapshot.artwork {
            output.push_str(&format!("  Artwork: {} bytes\n", artwork.len()));
        }

        output
    }
}

#[async_trait]
impl Command for InfoCommand {
    /// Show the snapshot of the active media player
    ///
    /// # Errors
    ///
    /// Returns CliError if the session bus is unreachable or the format
    /// argument is unknown
    async fn execute(&self, args: &[String]) -> CommandResult {
        let as_json = match args.first().map(String::as_str) {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => {
                return Err(CliError::InvalidArgument {
                    arg: "format".to_string(),
                    reason: format!("Unknown format '{other}', expected 'text' or 'json'"),
                });
            }
        };

        let attached = attach_observer(&self.config).await?;
        let snapshot = attached.observer.snapshot();

        if as_json {
            return serde_json::to_string_pretty(&snapshot).map_err(|e| CliError::ServiceError {
                service: "Media".to_string(),
                details: format!("Failed to serialize snapshot: {e}"),
            });
        }

        let state = attached.observer.state().await;
        Ok(Self::render(&state, &snapshot))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "info".to_string(),
            description: "Show what the active media player is playing".to_string(),
            category: "media".to_string(),
            args: vec![CommandArg {
                name: "format".to_string(),
                description: "Output format - 'text' (default) or 'json'".to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec![
                "mediamirror media info".to_string(),
                "mediamirror media info json".to_string(),
            ],
        }
    }
}
