use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Unique identifier for a media session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Create a SessionId from the platform's name for the session
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the platform name of the session
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback state reported by a media session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Session is currently playing
    Playing,

    /// Session is paused
    Paused,

    /// Session is stopped
    Stopped,

    /// Session is buffering before playback continues
    Buffering,

    /// Any state the session reports that has no dedicated variant
    Other,
}

impl PlaybackState {
    /// Whether this state counts as playing.
    ///
    /// Only [`PlaybackState::Playing`] does; buffering is not playing.
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

impl From<&str> for PlaybackState {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            "Stopped" => Self::Stopped,
            "Buffering" => Self::Buffering,
            _ => Self::Other,
        }
    }
}

/// A transport command forwarded to the bound session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Pause when the snapshot says playing, play otherwise
    TogglePlayPause,

    /// Skip to the next track
    SkipNext,

    /// Skip to the previous track
    SkipPrevious,

    /// Seek to an absolute position in milliseconds
    SeekTo(u64),
}

/// Binding state of the observer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverState {
    /// No session is bound
    Idle,

    /// Change callbacks are registered on the given session
    Bound(SessionId),
}

/// What the observer does when its bound session goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionLossPolicy {
    /// Keep the binding and the last known snapshot.
    #[default]
    Retain,

    /// Drop the binding, return to idle and restore the default snapshot.
    Reset,
}
