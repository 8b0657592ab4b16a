use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::{MediaError, MetadataUpdate, PlaybackUpdate, SessionId};

/// A change pushed by a bound session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Track metadata changed
    MetadataChanged(MetadataUpdate),

    /// Playback state or position changed
    PlaybackChanged(PlaybackUpdate),
}

/// A change in the set of sessions the platform considers active
pub enum SessionChange {
    /// The current candidate list, in platform order
    Active(Vec<Arc<dyn MediaSession>>),

    /// A session went away
    Closed(SessionId),
}

/// One application's media session as exposed by the platform.
///
/// Implementations are owned by their [`SessionSource`]; the observer only
/// keeps a weak reference.
#[async_trait]
pub trait MediaSession: Send + Sync {
    /// Platform identifier of the session
    fn id(&self) -> SessionId;

    /// Current track metadata, `None` when the session has none
    async fn metadata(&self) -> Result<Option<MetadataUpdate>, MediaError>;

    /// Current playback state, `None` when the session has none
    async fn playback(&self) -> Result<Option<PlaybackUpdate>, MediaError>;

    /// Register for change notifications.
    ///
    /// Dropping the returned stream unregisters.
    async fn events(&self) -> Result<BoxStream<'static, SessionEvent>, MediaError>;

    /// Start or resume playback
    async fn play(&self) -> Result<(), MediaError>;

    /// Pause playback
    async fn pause(&self) -> Result<(), MediaError>;

    /// Skip to the next track
    async fn skip_next(&self) -> Result<(), MediaError>;

    /// Skip to the previous track
    async fn skip_previous(&self) -> Result<(), MediaError>;

    /// Seek to an absolute position in milliseconds
    async fn seek_to(&self, position: u64) -> Result<(), MediaError>;
}

/// Platform service that discovers active media sessions.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Sessions active right now, in platform order
    ///
    /// # Errors
    ///
    /// Returns `MediaError::PermissionDenied` when the platform refuses access.
    async fn active_sessions(&self) -> Result<Vec<Arc<dyn MediaSession>>, MediaError>;

    /// Stream of discovery events
    ///
    /// # Errors
    ///
    /// Returns `MediaError::PermissionDenied` when the platform refuses access.
    async fn session_changes(&self) -> Result<BoxStream<'static, SessionChange>, MediaError>;
}
