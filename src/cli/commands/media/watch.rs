use std::{pin::pin, sync::Arc};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::{
    cli::{
        Command, CommandResult,
        formatting::format_duration,
        types::CommandMetadata,
    },
    config::Config,
    services::{DisplayActivity, DisplayMode, MediaObserver, media::MediaSnapshot},
};

use super::utils::attach_observer;

/// Command to follow the snapshot until interrupted
///
/// Prints one line per snapshot change and keeps following whichever player
/// becomes active. Display dimming follows the `[display]` delays; pressing
/// Enter counts as an interaction.
pub struct WatchCommand {
    config: Arc<Config>,
}

impl WatchCommand {
    /// Creates a new WatchCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn start_display(&self, observer: &MediaObserver) -> DisplayActivity {
        DisplayActivity::start(observer, self.config.display.timing())
    }

    fn line(snapshot: &MediaSnapshot) -> String {
        let marker = if snapshot.is_playing { "▶" } else { "⏸" };
        format!(
            "{marker} {} - {} [{}]",
            snapshot.artist,
            snapshot.title,
            format_duration(snapshot.elapsed())
        )
    }

    fn mode_line(mode: DisplayMode) -> &'static str {
        match mode {
            DisplayMode::Awake => "Display awake",
            DisplayMode::Dimmed => "Display dimmed",
        }
    }
}

#[async_trait]
impl Command for WatchCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let attached = attach_observer(&self.config).await?;
        let display = self.start_display(&attached.observer);

        let mut snapshots = pin!(attached.observer.watch());
        let mut modes = pin!(display.mode.watch().skip(1));
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        let mut input_open = true;

        println!("Watching media changes...");
        println!("Press Enter to wake the display, Ctrl+C to stop");

        loop {
            tokio::select! {
                Some(snapshot) = snapshots.next() => println!("{}", Self::line(&snapshot)),
                Some(mode) = modes.next() => println!("{}", Self::mode_line(mode)),
                line = input.next_line(), if input_open => match line {
                    Ok(Some(_)) => display.notify_interaction(),
                    _ => input_open = false,
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping watch");
                    break;
                }
            }
        }

        Ok("Watch ended".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "watch".to_string(),
            description: "Print every change of the active player until Ctrl+C".to_string(),
            category: "media".to_string(),
            args: vec![],
            examples: vec!["mediamirror media watch".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;

    #[test]
    fn line_shows_state_and_track() {
        let mut snapshot = MediaSnapshot::default();
        snapshot.title = "Song".to_string();
        snapshot.artist = "Band".to_string();
        snapshot.position = 61_000;

        assert_eq!(WatchCommand::line(&snapshot), "⏸ Band - Song [01:01]");

        snapshot.is_playing = true;
        assert!(WatchCommand::line(&snapshot).starts_with("▶"));
    }

    #[test]
    fn mode_lines() {
        assert_eq!(WatchCommand::mode_line(DisplayMode::Awake), "Display awake");
        assert_eq!(WatchCommand::mode_line(DisplayMode::Dimmed), "Display dimmed");
    }

    #[tokio::test(start_paused = true)]
    async fn display_uses_configured_delays() {
        let mut config = Config::default();
        config.display.dim_after_paused_secs = 2;
        let command = WatchCommand::new(Arc::new(config));
        let observer = MediaObserver::default();

        let display = command.start_display(&observer);
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(display.mode.get(), DisplayMode::Awake);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(display.mode.get(), DisplayMode::Dimmed);
    }
}
