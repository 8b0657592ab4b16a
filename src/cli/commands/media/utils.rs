use std::sync::Arc;

use crate::{
    cli::CliError,
    config::Config,
    services::{MediaObserver, MprisSource, media::SessionSource},
};

/// An observer bound to the session bus for the lifetime of one command.
///
/// Holds the source so discovered sessions stay alive while the command runs.
pub struct AttachedObserver {
    /// Observer following the active player
    pub observer: MediaObserver,
    _source: Arc<MprisSource>,
}

/// Connects to the session bus and attaches a fresh observer to it.
///
/// Unlike a long-running observer, a denied bus connection is an error here.
///
/// # Errors
///
/// Returns `CliError::ServiceError` if the session bus is unreachable.
pub async fn attach_observer(config: &Config) -> Result<AttachedObserver, CliError> {
    let source = Arc::new(MprisSource::connect(&config.media).await?);
    let observer = MediaObserver::new(config.media.session_loss);

    observer
        .attach(Arc::clone(&source) as Arc<dyn SessionSource>)
        .await;

    Ok(AttachedObserver {
        observer,
        _source: source,
    })
}

/// Requires a bound session, naming it for command output.
///
/// # Errors
///
/// Returns `CliError::ServiceError` if no media player is active.
pub async fn bound_player_name(observer: &MediaObserver) -> Result<String, CliError> {
    observer
        .bound_session()
        .await
        .map(|session| player_display_name(session.id().as_str()))
        .ok_or_else(|| CliError::ServiceError {
            service: "Media".to_string(),
            details: "No active media player found".to_string(),
        })
}

/// Short player name from an MPRIS bus name.
///
/// `org.mpris.MediaPlayer2.spotify` becomes `spotify`; anything else is
/// returned unchanged.
pub fn player_display_name(bus_name: &str) -> String {
    bus_name
        .strip_prefix("org.mpris.MediaPlayer2.")
        .unwrap_or(bus_name)
        .to_string()
}
