//! In-memory media sessions for driving the observer in tests.

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use mediamirror::services::{
    MediaObserver, MediaSnapshot,
    media::{
        MediaError, MediaSession, MetadataUpdate, PlaybackUpdate, SessionChange, SessionEvent,
        SessionId, SessionSource,
    },
};
use tokio::{sync::mpsc, time::timeout};
use tokio_stream::wrappers::UnboundedReceiverStream;

pub const WAIT: Duration = Duration::from_secs(2);

/// Shared record of the transport calls a fake session received.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub struct FakeSession {
    id: SessionId,
    metadata: Mutex<Option<MetadataUpdate>>,
    playback: Mutex<Option<PlaybackUpdate>>,
    events: Mutex<Option<mpsc::UnboundedSender<SessionEvent>>>,
    calls: CallLog,
    reject_commands: bool,
}

impl FakeSession {
    pub fn new(name: &str) -> Arc<Self> {
        Self::build(name, None, None, false)
    }

    pub fn with_state(
        name: &str,
        metadata: Option<MetadataUpdate>,
        playback: Option<PlaybackUpdate>,
    ) -> Arc<Self> {
        Self::build(name, metadata, playback, false)
    }

    pub fn rejecting(name: &str) -> Arc<Self> {
        Self::build(name, None, None, true)
    }

    fn build(
        name: &str,
        metadata: Option<MetadataUpdate>,
        playback: Option<PlaybackUpdate>,
        reject_commands: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: SessionId::new(name),
            metadata: Mutex::new(metadata),
            playback: Mutex::new(playback),
            events: Mutex::new(None),
            calls: Arc::new(Mutex::new(Vec::new())),
            reject_commands,
        })
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    /// Push a change notification; false when nobody is registered.
    pub fn emit(&self, event: SessionEvent) -> bool {
        self.events
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|tx| tx.send(event).is_ok())
    }

    fn record(&self, call: String) -> Result<(), MediaError> {
        if self.reject_commands {
            return Err(MediaError::ControlFailed(format!("{call} rejected")));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl MediaSession for FakeSession {
    fn id(&self) -> SessionId {
        self.id.clone()
    }

    async fn metadata(&self) -> Result<Option<MetadataUpdate>, MediaError> {
        Ok(self.metadata.lock().unwrap().clone())
    }

    async fn playback(&self) -> Result<Option<PlaybackUpdate>, MediaError> {
        Ok(self.playback.lock().unwrap().clone())
    }

    async fn events(&self) -> Result<BoxStream<'static, SessionEvent>, MediaError> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.events.lock().unwrap() = Some(tx);
        Ok(UnboundedReceiverStream::new(rx).boxed())
    }

    async fn play(&self) -> Result<(), MediaError> {
        self.record("play".to_string())
    }

    async fn pause(&self) -> Result<(), MediaError> {
        self.record("pause".to_string())
    }

    async fn skip_next(&self) -> Result<(), MediaError> {
        self.record("next".to_string())
    }

    async fn skip_previous(&self) -> Result<(), MediaError> {
        self.record("previous".to_string())
    }

    async fn seek_to(&self, position: u64) -> Result<(), MediaError> {
        self.record(format!("seek {position}"))
    }
}

pub struct FakeSource {
    sessions: Vec<Arc<dyn MediaSession>>,
    changes: Mutex<Option<mpsc::UnboundedReceiver<SessionChange>>>,
    deny: bool,
}

impl FakeSource {
    pub fn new(
        sessions: Vec<Arc<dyn MediaSession>>,
    ) -> (Arc<Self>, mpsc::UnboundedSender<SessionChange>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Arc::new(Self {
            sessions,
            changes: Mutex::new(Some(rx)),
            deny: false,
        });
        (source, tx)
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            sessions: Vec::new(),
            changes: Mutex::new(None),
            deny: true,
        })
    }
}

#[async_trait]
impl SessionSource for FakeSource {
    async fn active_sessions(&self) -> Result<Vec<Arc<dyn MediaSession>>, MediaError> {
        if self.deny {
            return Err(MediaError::PermissionDenied(
                "notification access not granted".to_string(),
            ));
        }
        Ok(self.sessions.clone())
    }

    async fn session_changes(&self) -> Result<BoxStream<'static, SessionChange>, MediaError> {
        if self.deny {
            return Err(MediaError::PermissionDenied(
                "notification access not granted".to_string(),
            ));
        }
        match self.changes.lock().unwrap().take() {
            Some(rx) => Ok(UnboundedReceiverStream::new(rx).boxed()),
            None => Ok(futures::stream::pending().boxed()),
        }
    }
}

pub fn as_candidates(sessions: &[&Arc<FakeSession>]) -> Vec<Arc<dyn MediaSession>> {
    sessions
        .iter()
        .map(|session| Arc::clone(session) as Arc<dyn MediaSession>)
        .collect()
}

pub fn metadata(title: &str, artist: &str) -> MetadataUpdate {
    MetadataUpdate {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        ..MetadataUpdate::default()
    }
}

/// Wait until the snapshot satisfies the predicate.
pub async fn wait_for_snapshot(
    observer: &MediaObserver,
    predicate: impl Fn(&MediaSnapshot) -> bool,
) -> MediaSnapshot {
    let mut snapshots = Box::pin(observer.watch());
    timeout(WAIT, async {
        while let Some(snapshot) = snapshots.next().await {
            if predicate(&snapshot) {
                return snapshot;
            }
        }
        panic!("snapshot stream ended");
    })
    .await
    .expect("snapshot never matched")
}

/// Poll an async condition until it holds.
pub async fn eventually<F, Fut>(condition: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    timeout(WAIT, async {
        while !condition().await {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition never held");
}
