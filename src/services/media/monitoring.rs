use std::sync::Weak;

use futures::{StreamExt, stream::BoxStream};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use super::{
    SessionChange, SessionEvent, SessionId,
    observer::{MediaObserver, ObserverInner},
};

/// Forwards one session's change notifications into the observer.
pub(super) struct SessionMonitor;

impl SessionMonitor {
    /// Start forwarding events of the given session.
    ///
    /// Forwarding stops when the observer is dropped, when the session's
    /// event stream ends, or when the returned handle is aborted.
    pub fn start(
        id: SessionId,
        observer: Weak<ObserverInner>,
        events: BoxStream<'static, SessionEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(Self::forward(id, observer, events))
    }

    #[instrument(skip(observer, events))]
    async fn forward(
        id: SessionId,
        observer: Weak<ObserverInner>,
        mut events: BoxStream<'static, SessionEvent>,
    ) {
        while let Some(event) = events.next().await {
            let Some(inner) = observer.upgrade() else {
                debug!("Observer dropped, stopping session monitor");
                return;
            };
            let observer = MediaObserver::from_inner(inner);

            if !observer.apply_if_bound(&id, event).await {
                debug!("Session {id} is no longer bound, stopping session monitor");
                return;
            }
        }

        debug!("Event stream of session {id} ended");
    }
}

/// Feeds session discovery events into the observer.
pub(super) struct DiscoveryMonitor;

impl DiscoveryMonitor {
    /// Start following discovery events.
    ///
    /// Monitoring stops automatically when the observer is dropped.
    pub fn start(
        observer: Weak<ObserverInner>,
        changes: BoxStream<'static, SessionChange>,
    ) -> JoinHandle<()> {
        tokio::spawn(Self::monitor(observer, changes))
    }

    #[instrument(skip_all)]
    async fn monitor(observer: Weak<ObserverInner>, mut changes: BoxStream<'static, SessionChange>) {
        while let Some(change) = changes.next().await {
            let Some(inner) = observer.upgrade() else {
                debug!("Observer dropped, stopping discovery monitor");
                return;
            };
            let observer = MediaObserver::from_inner(inner);

            match change {
                SessionChange::Active(sessions) => {
                    observer.on_active_session_changed(sessions).await
                }
                SessionChange::Closed(id) => observer.on_session_closed(&id).await,
            }
        }

        debug!("Session discovery ended");
    }
}
