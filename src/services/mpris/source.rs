use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use zbus::{Connection, fdo::DBusProxy};

use crate::{
    config::MediaConfig,
    services::media::{MediaError, MediaSession, SessionChange, SessionId, SessionSource},
};

use super::MprisSession;

const MPRIS_BUS_PREFIX: &str = "org.mpris.MediaPlayer2.";

type SessionRegistry = Arc<RwLock<Vec<Arc<MprisSession>>>>;

/// Discovers MPRIS players on the session bus.
///
/// Owns every discovered [`MprisSession`]; a player leaving the bus drops
/// its session, which invalidates any weak handle an observer holds.
pub struct MprisSource {
    connection: Connection,
    sessions: SessionRegistry,
    ignored_patterns: Vec<String>,
}

impl MprisSource {
    /// Connect to the session bus and discover existing players.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::PermissionDenied` if the bus refuses the
    /// connection, `MediaError::InitializationFailed` for any other
    /// connection failure.
    #[instrument(skip(config))]
    pub async fn connect(config: &MediaConfig) -> Result<Self, MediaError> {
        let connection = Connection::session()
            .await
            .map_err(MediaError::from_connection_error)?;

        let source = Self {
            connection,
            sessions: Arc::new(RwLock::new(Vec::new())),
            ignored_patterns: config.ignored_players.clone(),
        };

        source.discover_existing_players().await?;

        Ok(source)
    }

    async fn discover_existing_players(&self) -> Result<(), MediaError> {
        let dbus_proxy = DBusProxy::new(&self.connection)
            .await
            .map_err(MediaError::from_connection_error)?;

        let names = dbus_proxy
            .list_names()
            .await
            .map_err(|e| MediaError::from_connection_error(e.into()))?;

        for name in names {
            if name.starts_with(MPRIS_BUS_PREFIX) && !should_ignore(&name, &self.ignored_patterns)
            {
                let id = SessionId::new(name.to_string());
                handle_player_added(&self.connection, &self.sessions, id).await;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl SessionSource for MprisSource {
    async fn active_sessions(&self) -> Result<Vec<Arc<dyn MediaSession>>, MediaError> {
        Ok(current_sessions(&self.sessions).await)
    }

    async fn session_changes(&self) -> Result<BoxStream<'static, SessionChange>, MediaError> {
        let dbus_proxy = DBusProxy::new(&self.connection)
            .await
            .map_err(MediaError::from_connection_error)?;
        let mut name_owner_changed = dbus_proxy
            .receive_name_owner_changed()
            .await
            .map_err(MediaError::from_connection_error)?;

        let connection = self.connection.clone();
        let sessions = Arc::clone(&self.sessions);
        let ignored_patterns = self.ignored_patterns.clone();

        let changes = stream! {
            while let Some(signal) = name_owner_changed.next().await {
                let Ok(args) = signal.args() else { continue };

                let change = classify_name_change(
                    args.name(),
                    args.old_owner().is_some(),
                    args.new_owner().is_some(),
                    &ignored_patterns,
                );
                let id = SessionId::new(args.name().to_string());

                match change {
                    NameChange::PlayerAdded => {
                        if handle_player_added(&connection, &sessions, id).await {
                            yield SessionChange::Active(current_sessions(&sessions).await);
                        }
                    }
                    NameChange::PlayerRemoved => {
                        if handle_player_removed(&sessions, &id).await {
                            yield SessionChange::Closed(id);

                            let remaining = current_sessions(&sessions).await;
                            if !remaining.is_empty() {
                                yield SessionChange::Active(remaining);
                            }
                        }
                    }
                    NameChange::Unrelated => {}
                }
            }

            debug!("Name monitoring ended");
        };

        Ok(changes.boxed())
    }
}

/// What a `NameOwnerChanged` signal means for player discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameChange {
    PlayerAdded,
    PlayerRemoved,
    Unrelated,
}

/// Classify an owner change of `name`.
///
/// Only MPRIS names gaining their first owner or losing their last one
/// matter. An ownership handover keeps the player as it is, and ignored
/// players are never added.
fn classify_name_change(
    name: &str,
    had_owner: bool,
    has_owner: bool,
    ignored_patterns: &[String],
) -> NameChange {
    if !name.starts_with(MPRIS_BUS_PREFIX) {
        return NameChange::Unrelated;
    }

    match (had_owner, has_owner) {
        (false, true) if !should_ignore(name, ignored_patterns) => NameChange::PlayerAdded,
        (true, false) => NameChange::PlayerRemoved,
        _ => NameChange::Unrelated,
    }
}

async fn current_sessions(sessions: &SessionRegistry) -> Vec<Arc<dyn MediaSession>> {
    sessions
        .read()
        .await
        .iter()
        .map(|session| Arc::clone(session) as Arc<dyn MediaSession>)
        .collect()
}

async fn handle_player_added(
    connection: &Connection,
    sessions: &SessionRegistry,
    id: SessionId,
) -> bool {
    match MprisSession::connect(connection, id.clone()).await {
        Ok(session) => {
            let mut sessions = sessions.write().await;
            if sessions.iter().any(|existing| existing.id() == id) {
                return false;
            }
            sessions.push(Arc::new(session));
            debug!("Player {} added", id);
            true
        }
        Err(e) => {
            warn!("Failed to create player {}: {}", id, e);
            false
        }
    }
}

async fn handle_player_removed(sessions: &SessionRegistry, id: &SessionId) -> bool {
    let mut sessions = sessions.write().await;
    let before = sessions.len();
    sessions.retain(|session| &session.id() != id);

    let removed = sessions.len() != before;
    if removed {
        debug!("Player {} removed", id);
    }
    removed
}

fn should_ignore(bus_name: &str, ignored_patterns: &[String]) -> bool {
    ignored_patterns
        .iter()
        .any(|pattern| bus_name.contains(pattern))
}
