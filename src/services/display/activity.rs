use std::{pin::pin, time::Duration};

use futures::{Stream, StreamExt};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, sleep_until},
};
use tracing::{debug, instrument};

use crate::services::{
    common::Property,
    media::{MediaObserver, MediaSnapshot},
};

/// Whether the full display should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Full display
    Awake,

    /// Dimmed, always-on-display style
    Dimmed,
}

/// Delays before the display dims
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimTiming {
    /// Delay while media is playing
    pub playing: Duration,

    /// Delay while media is paused or stopped
    pub paused: Duration,
}

impl Default for DimTiming {
    fn default() -> Self {
        Self {
            playing: Duration::from_secs(7),
            paused: Duration::from_secs(10),
        }
    }
}

impl DimTiming {
    fn delay(&self, is_playing: bool) -> Duration {
        if is_playing { self.playing } else { self.paused }
    }
}

/// Dims the display after a period without activity.
///
/// The timer restarts whenever playback starts or stops, or the user
/// interacts. Playback starting and interaction also wake the display;
/// metadata changes alone do not.
pub struct DisplayActivity {
    /// Current display mode
    pub mode: Property<DisplayMode>,
    interactions: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl DisplayActivity {
    /// Start following the observer's snapshot.
    pub fn start(observer: &MediaObserver, timing: DimTiming) -> Self {
        let mode = Property::new(DisplayMode::Awake);
        let (interactions, interaction_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(Self::run(
            observer.watch(),
            interaction_rx,
            mode.clone(),
            timing,
        ));

        Self {
            mode,
            interactions,
            task,
        }
    }

    /// Record a user interaction; wakes the display and restarts the timer.
    pub fn notify_interaction(&self) {
        let _ = self.interactions.send(());
    }

    #[instrument(skip_all)]
    async fn run(
        snapshots: impl Stream<Item = MediaSnapshot> + Send,
        mut interactions: mpsc::UnboundedReceiver<()>,
        mode: Property<DisplayMode>,
        timing: DimTiming,
    ) {
        let mut snapshots = pin!(snapshots);
        let mut last: Option<MediaSnapshot> = None;
        let mut deadline = Instant::now() + timing.paused;

        loop {
            tokio::select! {
                Some(snapshot) = snapshots.next() => {
                    let (restart, wake) = match &last {
                        Some(previous) if previous.is_playing != snapshot.is_playing => {
                            (true, snapshot.is_playing)
                        }
                        Some(_) => (false, false),
                        None => (true, false),
                    };

                    if wake {
                        mode.set(DisplayMode::Awake);
                    }
                    if restart {
                        deadline = Instant::now() + timing.delay(snapshot.is_playing);
                    }
                    last = Some(snapshot);
                }

                Some(()) = interactions.recv() => {
                    mode.set(DisplayMode::Awake);
                    let is_playing = last.as_ref().is_some_and(|snapshot| snapshot.is_playing);
                    deadline = Instant::now() + timing.delay(is_playing);
                }

                _ = sleep_until(deadline), if mode.get() == DisplayMode::Awake => {
                    debug!("No activity, dimming display");
                    mode.set(DisplayMode::Dimmed);
                }

                else => break,
            }
        }

        debug!("Display activity monitoring ended");
    }
}

impl Drop for DisplayActivity {
    fn drop(&mut self) {
        self.task.abort();
    }
}
