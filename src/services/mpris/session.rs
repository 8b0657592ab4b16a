use async_stream::stream;
use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use tracing::debug;
use zbus::{
    Connection,
    fdo::PropertiesProxy,
    names::{InterfaceName, MemberName},
    zvariant::ObjectPath,
};

use crate::services::media::{
    MediaError, MediaSession, MetadataUpdate, PlaybackState, PlaybackUpdate, SessionEvent,
    SessionId,
};

use super::{MediaPlayer2PlayerProxy, metadata};

/// MPRIS interface name for the player object.
const MPRIS_BUS_PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// One MPRIS player exposed as a [`MediaSession`].
pub struct MprisSession {
    id: SessionId,
    connection: Connection,
    proxy: MediaPlayer2PlayerProxy<'static>,
}

impl MprisSession {
    /// Create a session for the player owning `id` on the bus.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::DbusError` if the proxy cannot be built.
    pub async fn connect(connection: &Connection, id: SessionId) -> Result<Self, MediaError> {
        let proxy = MediaPlayer2PlayerProxy::builder(connection)
            .destination(id.as_str().to_string())?
            .build()
            .await?;

        Ok(Self {
            id,
            connection: connection.clone(),
            proxy,
        })
    }

    /// Get current playback position.
    ///
    /// Players do not announce position changes, so the cached property is
    /// stale. Creates a fresh properties proxy to avoid caching.
    async fn position(&self) -> Option<u64> {
        Self::read_position(&self.connection, &self.proxy).await
    }

    async fn read_position(
        connection: &Connection,
        proxy: &MediaPlayer2PlayerProxy<'static>,
    ) -> Option<u64> {
        let destination = proxy.inner().destination().to_owned();
        let path = proxy.inner().path().to_owned();

        let properties = PropertiesProxy::builder(connection)
            .destination(destination)
            .ok()?
            .path(path)
            .ok()?
            .build()
            .await
            .ok()?;

        let interface = InterfaceName::try_from(MPRIS_BUS_PLAYER_INTERFACE).ok()?;
        let property = MemberName::try_from("Position").ok()?;

        let value = properties.get(interface, &property).await.ok()?;
        i64::try_from(&value).ok().map(metadata::micros_to_millis)
    }

    fn control_failed(action: &str, error: zbus::Error) -> MediaError {
        MediaError::ControlFailed(format!("{action} failed: {error}"))
    }
}

#[async_trait]
impl MediaSession for MprisSession {
    fn id(&self) -> SessionId {
        self.id.clone()
    }

    async fn metadata(&self) -> Result<Option<MetadataUpdate>, MediaError> {
        let map = self.proxy.metadata().await?;
        if map.is_empty() {
            return Ok(None);
        }
        Ok(Some(metadata::to_update(&map).await))
    }

    async fn playback(&self) -> Result<Option<PlaybackUpdate>, MediaError> {
        let status = self.proxy.playback_status().await?;
        let update = PlaybackUpdate {
            state: PlaybackState::from(status.as_str()),
            position: self.position().await,
        };
        Ok(Some(update))
    }

    async fn events(&self) -> Result<BoxStream<'static, SessionEvent>, MediaError> {
        let mut metadata_changes = self.proxy.receive_metadata_changed().await;
        let mut status_changes = self.proxy.receive_playback_status_changed().await;
        let mut seeks = self.proxy.receive_seeked().await?;

        let connection = self.connection.clone();
        let proxy = self.proxy.clone();
        let id = self.id.clone();

        let events = stream! {
            loop {
                let event = tokio::select! {
                    Some(change) = metadata_changes.next() => {
                        match change.get().await {
                            Ok(map) => Some(SessionEvent::MetadataChanged(metadata::to_update(&map).await)),
                            Err(_) => None,
                        }
                    }

                    Some(change) = status_changes.next() => {
                        match change.get().await {
                            Ok(status) => Some(SessionEvent::PlaybackChanged(PlaybackUpdate {
                                state: PlaybackState::from(status.as_str()),
                                position: Self::read_position(&connection, &proxy).await,
                            })),
                            Err(_) => None,
                        }
                    }

                    Some(signal) = seeks.next() => {
                        let position = signal.args().ok().map(|args| metadata::micros_to_millis(*args.position()));
                        match proxy.playback_status().await {
                            Ok(status) => Some(SessionEvent::PlaybackChanged(PlaybackUpdate {
                                state: PlaybackState::from(status.as_str()),
                                position,
                            })),
                            Err(_) => None,
                        }
                    }

                    else => {
                        debug!("All property streams ended for session {}", id);
                        break;
                    }
                };

                if let Some(event) = event {
                    yield event;
                }
            }
        };

        Ok(events.boxed())
    }

    async fn play(&self) -> Result<(), MediaError> {
        self.proxy
            .play()
            .await
            .map_err(|e| Self::control_failed("Play", e))
    }

    async fn pause(&self) -> Result<(), MediaError> {
        self.proxy
            .pause()
            .await
            .map_err(|e| Self::control_failed("Pause", e))
    }

    async fn skip_next(&self) -> Result<(), MediaError> {
        self.proxy
            .next()
            .await
            .map_err(|e| Self::control_failed("Next", e))
    }

    async fn skip_previous(&self) -> Result<(), MediaError> {
        self.proxy
            .previous()
            .await
            .map_err(|e| Self::control_failed("Previous", e))
    }

    async fn seek_to(&self, position: u64) -> Result<(), MediaError> {
        let map = self
            .proxy
            .metadata()
            .await
            .map_err(|e| Self::control_failed("Reading track ID", e))?;
        let track_id = metadata::track_id(&map);
        let track_path = ObjectPath::try_from(track_id.as_str())
            .map_err(|e| MediaError::ControlFailed(format!("Invalid track ID: {e}")))?;

        let micros = i64::try_from(position.saturating_mul(1_000)).unwrap_or(i64::MAX);

        self.proxy
            .set_position(&track_path, micros)
            .await
            .map_err(|e| Self::control_failed("Set position", e))
    }
}
