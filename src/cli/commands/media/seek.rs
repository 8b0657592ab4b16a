use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_duration,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
    services::media::TransportCommand,
};

use super::utils::{attach_observer, bound_player_name};

/// Command to seek to a specific position in the current track
///
/// Supports various time formats like seconds, mm:ss, or percentage
pub struct SeekCommand {
    config: Arc<Config>,
}

impl SeekCommand {
    /// Creates a new SeekCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn invalid(reason: &str) -> CliError {
        CliError::InvalidArgument {
            arg: "position".to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse_position(
        position_str: &str,
        current_position: Duration,
        track_length: Option<Duration>,
    ) -> Result<Duration, CliError> {
        if let Some(percentage_str) = position_str.strip_suffix('%') {
            let percentage = percentage_str
                .parse::<f64>()
                .map_err(|_| Self::invalid("Invalid percentage format"))?;

            if !(0.0..=100.0).contains(&percentage) {
                return Err(Self::invalid("Percentage must be between 0 and 100"));
            }

            let track_length = track_length
                .ok_or_else(|| Self::invalid("Cannot use percentage - track length unknown"))?;

            return Ok(track_length.mul_f64(percentage / 100.0));
        }

        if let Some(delta_str) = position_str.strip_prefix('+') {
            let delta = delta_str
                .parse::<u64>()
                .map_err(|_| Self::invalid("Invalid relative seek format"))?;
            return Ok(current_position.saturating_add(Duration::from_secs(delta)));
        }

        if let Some(delta_str) = position_str.strip_prefix('-') {
            let delta = delta_str
                .parse::<u64>()
                .map_err(|_| Self::invalid("Invalid relative seek format"))?;
            return Ok(current_position.saturating_sub(Duration::from_secs(delta)));
        }

        if let Some((minutes, seconds)) = position_str.split_once(':') {
            let minutes = minutes
                .parse::<u64>()
                .map_err(|_| Self::invalid("Invalid minutes value"))?;
            let seconds = seconds
                .parse::<u64>()
                .map_err(|_| Self::invalid("Invalid time format. Use mm:ss"))?;

            if seconds >= 60 {
                return Err(Self::invalid("Seconds must be less than 60"));
            }

            let total = minutes
                .checked_mul(60)
                .and_then(|secs| secs.checked_add(seconds))
                .ok_or_else(|| Self::invalid("Position is too large"))?;
            return Ok(Duration::from_secs(total));
        }

        let seconds = position_str.parse::<u64>().map_err(|_| {
            Self::invalid(
                "Invalid position format. Use seconds, mm:ss, percentage (50%), or relative (+10, -10)",
            )
        })?;

        Ok(Duration::from_secs(seconds))
    }
}

#[async_trait]
impl Command for SeekCommand {
    /// Seek to a specific position in the current track
    ///
    /// # Errors
    ///
    /// Returns CliError if the session bus is unreachable, no player is
    /// active, or the position is invalid
    async fn execute(&self, args: &[String]) -> CommandResult {
        let position_str = args
            .first()
            .ok_or_else(|| Self::invalid("Missing position"))?;

        let attached = attach_observer(&self.config).await?;
        let player_name = bound_player_name(&attached.observer).await?;

        let snapshot = attached.observer.snapshot();
        let track_length = snapshot.track_length();
        let target_position =
            Self::parse_position(position_str, snapshot.elapsed(), track_length)?;

        if let Some(length) = track_length {
            if target_position > length {
                return Err(Self::invalid(&format!(
                    "Position {} exceeds track length {}",
                    format_duration(target_position),
                    format_duration(length)
                )));
            }
        }

        let millis = u64::try_from(target_position.as_millis()).unwrap_or(u64::MAX);
        attached
            .observer
            .issue_transport_command(TransportCommand::SeekTo(millis))
            .await?;

        Ok(format!(
            "Seeked to {} on: {player_name}",
            format_duration(target_position)
        ))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "seek".to_string(),
            description: "Seek to a specific position in the current track".to_string(),
            category: "media".to_string(),
            args: vec![CommandArg {
                name: "position".to_string(),
                description: "Target position - seconds (30), time (1:30), percentage (50%), or relative (+10, -10)".to_string(),
                required: true,
                value_type: ArgType::Position,
            }],
            examples: vec![
                "mediamirror media seek 30".to_string(),
                "mediamirror media seek 1:30".to_string(),
                "mediamirror media seek 50%".to_string(),
                "mediamirror media seek +10".to_string(),
                "mediamirror media seek -15".to_string(),
            ],
        }
    }
}
