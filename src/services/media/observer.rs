use std::sync::{Arc, Weak};

use futures::Stream;
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, info, instrument, warn};

use crate::services::common::Property;

use super::{
    MediaError, MediaSession, MediaSnapshot, MetadataUpdate, ObserverState, PlaybackUpdate,
    SessionEvent, SessionId, SessionLossPolicy, SessionSource, TransportCommand,
    monitoring::{DiscoveryMonitor, SessionMonitor},
};

/// Bridges platform media-session notifications into one shared snapshot.
///
/// Cloning is cheap and every clone observes the same snapshot and binding.
/// Construct one at startup and hand clones to whichever component needs it.
#[derive(Clone)]
pub struct MediaObserver {
    pub(super) inner: Arc<ObserverInner>,
}

pub(super) struct ObserverInner {
    snapshot: Property<MediaSnapshot>,
    binding: RwLock<Option<Binding>>,
    discovery: RwLock<Option<JoinHandle<()>>>,
    loss_policy: SessionLossPolicy,
}

struct Binding {
    id: SessionId,
    session: Weak<dyn MediaSession>,
    monitor: Option<JoinHandle<()>>,
}

impl Drop for Binding {
    fn drop(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }
    }
}

impl Drop for ObserverInner {
    fn drop(&mut self) {
        if let Some(discovery) = self.discovery.get_mut().take() {
            discovery.abort();
        }
    }
}

impl MediaObserver {
    /// Create an idle observer holding the default snapshot.
    pub fn new(loss_policy: SessionLossPolicy) -> Self {
        Self {
            inner: Arc::new(ObserverInner {
                snapshot: Property::new(MediaSnapshot::default()),
                binding: RwLock::new(None),
                discovery: RwLock::new(None),
                loss_policy,
            }),
        }
    }

    pub(super) fn from_inner(inner: Arc<ObserverInner>) -> Self {
        Self { inner }
    }

    /// Start following a session source.
    ///
    /// Binds to the first currently active session and keeps following the
    /// source's discovery events. Failures, including a denied permission,
    /// are logged and suppressed: the observer then stays idle with its
    /// current snapshot.
    #[instrument(skip_all)]
    pub async fn attach(&self, source: Arc<dyn SessionSource>) {
        match source.active_sessions().await {
            Ok(sessions) => self.on_active_session_changed(sessions).await,
            Err(MediaError::PermissionDenied(reason)) => {
                warn!("Not permitted to observe media sessions, staying idle: {reason}");
                return;
            }
            Err(e) => {
                warn!("Session discovery failed, staying idle: {e}");
                return;
            }
        }

        match source.session_changes().await {
            Ok(changes) => {
                let handle = DiscoveryMonitor::start(Arc::downgrade(&self.inner), changes);
                if let Some(previous) = self.inner.discovery.write().await.replace(handle) {
                    previous.abort();
                }
            }
            Err(e) => warn!("Cannot follow session changes: {e}"),
        }
    }

    /// Bind to the first candidate session.
    ///
    /// The remaining candidates are ignored. The previous registration is
    /// dropped, change notifications of the new session are forwarded into
    /// the snapshot, and its current metadata and playback state are pulled
    /// right away. An empty candidate list leaves everything untouched.
    #[instrument(skip_all, fields(candidates = candidates.len()))]
    pub async fn on_active_session_changed(&self, candidates: Vec<Arc<dyn MediaSession>>) {
        let Some(session) = candidates.into_iter().next() else {
            debug!("No active session offered, keeping current binding");
            return;
        };

        let id = session.id();
        let events = match session.events().await {
            Ok(events) => Some(events),
            Err(e) => {
                warn!("Cannot register for changes on {id}: {e}");
                None
            }
        };

        {
            // Monitor must not read the binding before it is replaced.
            let mut binding = self.inner.binding.write().await;
            let monitor = events.map(|events| {
                SessionMonitor::start(id.clone(), Arc::downgrade(&self.inner), events)
            });
            *binding = Some(Binding {
                id: id.clone(),
                session: Arc::downgrade(&session),
                monitor,
            });
        }

        info!("Bound to media session {id}");

        match session.metadata().await {
            Ok(Some(metadata)) => self.on_metadata_changed(metadata),
            Ok(None) => {}
            Err(e) => warn!("Cannot read metadata from {id}: {e}"),
        }

        match session.playback().await {
            Ok(Some(playback)) => self.on_playback_state_changed(playback),
            Ok(None) => {}
            Err(e) => warn!("Cannot read playback state from {id}: {e}"),
        }
    }

    /// Merge a metadata change into the snapshot.
    pub fn on_metadata_changed(&self, metadata: MetadataUpdate) {
        debug!(title = ?metadata.title, artist = ?metadata.artist, "Metadata changed");
        self.inner
            .snapshot
            .update(|snapshot| snapshot.apply_metadata(metadata));
    }

    /// Merge a playback-state change into the snapshot.
    pub fn on_playback_state_changed(&self, playback: PlaybackUpdate) {
        debug!(state = ?playback.state, position = ?playback.position, "Playback changed");
        self.inner
            .snapshot
            .update(|snapshot| snapshot.apply_playback(playback));
    }

    /// React to a session going away.
    ///
    /// Only the bound session matters. With [`SessionLossPolicy::Retain`]
    /// nothing changes; with [`SessionLossPolicy::Reset`] the binding is
    /// dropped and the snapshot returns to its defaults.
    pub async fn on_session_closed(&self, id: &SessionId) {
        if self.inner.loss_policy == SessionLossPolicy::Retain {
            debug!("Session {id} closed, retaining last known state");
            return;
        }

        let mut binding = self.inner.binding.write().await;
        if binding.as_ref().is_some_and(|bound| &bound.id == id) {
            binding.take();
            drop(binding);

            self.inner.snapshot.set(MediaSnapshot::default());
            info!("Bound session {id} closed, observer idle");
        }
    }

    /// Forward a transport command to the bound session.
    ///
    /// Does nothing when no session is bound or the bound session is gone.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::ControlFailed` if the session rejects the command.
    #[instrument(skip(self))]
    pub async fn issue_transport_command(&self, command: TransportCommand) -> Result<(), MediaError> {
        let Some(session) = self.bound_session().await else {
            debug!("No session bound, dropping {command:?}");
            return Ok(());
        };

        match command {
            TransportCommand::Play => session.play().await,
            TransportCommand::Pause => session.pause().await,
            TransportCommand::TogglePlayPause => {
                if self.snapshot().is_playing {
                    session.pause().await
                } else {
                    session.play().await
                }
            }
            TransportCommand::SkipNext => session.skip_next().await,
            TransportCommand::SkipPrevious => session.skip_previous().await,
            TransportCommand::SeekTo(position) => session.seek_to(position).await,
        }
    }

    /// Get the current snapshot.
    pub fn snapshot(&self) -> MediaSnapshot {
        self.inner.snapshot.get()
    }

    /// Watch the snapshot.
    ///
    /// The stream yields the current snapshot first, then every change.
    pub fn watch(&self) -> impl Stream<Item = MediaSnapshot> + Send + use<> {
        self.inner.snapshot.watch()
    }

    /// Current binding state.
    pub async fn state(&self) -> ObserverState {
        match self.inner.binding.read().await.as_ref() {
            Some(binding) => ObserverState::Bound(binding.id.clone()),
            None => ObserverState::Idle,
        }
    }

    /// The bound session, if it is still alive.
    pub async fn bound_session(&self) -> Option<Arc<dyn MediaSession>> {
        self.inner
            .binding
            .read()
            .await
            .as_ref()
            .and_then(|binding| binding.session.upgrade())
    }

    /// Apply a session event if `id` is still the bound session.
    ///
    /// The binding stays read-locked while the event is merged, so a rebind
    /// cannot slip in between the check and the update.
    pub(super) async fn apply_if_bound(&self, id: &SessionId, event: SessionEvent) -> bool {
        let binding = self.inner.binding.read().await;
        if !binding.as_ref().is_some_and(|bound| &bound.id == id) {
            return false;
        }

        match event {
            SessionEvent::MetadataChanged(metadata) => self.on_metadata_changed(metadata),
            SessionEvent::PlaybackChanged(playback) => self.on_playback_state_changed(playback),
        }
        true
    }
}

impl Default for MediaObserver {
    fn default() -> Self {
        Self::new(SessionLossPolicy::default())
    }
}
