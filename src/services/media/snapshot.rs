use std::{fmt, sync::Arc, time::Duration};

use serde::Serialize;

use super::PlaybackState;

/// Title shown before any session has reported metadata.
pub const NO_TRACK_TITLE: &str = "No Track";

/// Title used when a metadata update carries no title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Artist used when a metadata update carries no artist.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Opaque album artwork bytes.
///
/// Cloning shares the underlying buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Artwork(Arc<[u8]>);

impl Artwork {
    /// Wrap encoded image bytes
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Raw image bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size of the image in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Artwork({} bytes)", self.0.len())
    }
}

/// The merged view of the most recently known media state.
///
/// Every field always holds a value. Updates are merged field by field,
/// so anything an update does not mention keeps its previous value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSnapshot {
    /// Track title
    pub title: String,

    /// Track artist(s)
    pub artist: String,

    /// Whether the bound session is playing
    pub is_playing: bool,

    /// Album artwork, if any session ever provided one
    #[serde(skip)]
    pub artwork: Option<Artwork>,

    /// Track length in milliseconds
    pub duration: u64,

    /// Playback position in milliseconds
    pub position: u64,
}

impl Default for MediaSnapshot {
    fn default() -> Self {
        Self {
            title: NO_TRACK_TITLE.to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            is_playing: false,
            artwork: None,
            duration: 0,
            position: 0,
        }
    }
}

impl MediaSnapshot {
    /// Merge a metadata change.
    ///
    /// A missing title or artist falls back to the fixed placeholders;
    /// missing artwork and duration keep their previous values.
    pub fn apply_metadata(&mut self, update: MetadataUpdate) {
        self.title = update.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        self.artist = update.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        if let Some(artwork) = update.artwork {
            self.artwork = Some(artwork);
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
    }

    /// Merge a playback-state change.
    pub fn apply_playback(&mut self, update: PlaybackUpdate) {
        self.is_playing = update.state.is_playing();

        if let Some(position) = update.position {
            self.position = position;
        }
    }

    /// Track length as a [`Duration`], `None` when unknown.
    pub fn track_length(&self) -> Option<Duration> {
        (self.duration > 0).then(|| Duration::from_millis(self.duration))
    }

    /// Playback position as a [`Duration`].
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.position)
    }
}

/// Fields delivered by a metadata change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataUpdate {
    /// Track title
    pub title: Option<String>,

    /// Track artist(s)
    pub artist: Option<String>,

    /// Album artwork
    pub artwork: Option<Artwork>,

    /// Track length in milliseconds
    pub duration: Option<u64>,
}

/// Fields delivered by a playback-state change
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackUpdate {
    /// Reported playback state
    pub state: PlaybackState,

    /// Playback position in milliseconds
    pub position: Option<u64>,
}

impl PlaybackUpdate {
    /// Update carrying only a state
    pub fn new(state: PlaybackState) -> Self {
        Self {
            state,
            position: None,
        }
    }

    /// Attach a position in milliseconds
    pub fn with_position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_fully_populated() {
        let snapshot = MediaSnapshot::default();

        assert_eq!(snapshot.title, NO_TRACK_TITLE);
        assert_eq!(snapshot.artist, UNKNOWN_ARTIST);
        assert!(!snapshot.is_playing);
        assert!(snapshot.artwork.is_none());
        assert_eq!(snapshot.track_length(), None);
    }

    #[test]
    fn missing_title_and_artist_use_placeholders() {
        let mut snapshot = MediaSnapshot::default();

        snapshot.apply_metadata(MetadataUpdate {
            duration: Some(1_000),
            ..MetadataUpdate::default()
        });

        assert_eq!(snapshot.title, UNKNOWN_TITLE);
        assert_eq!(snapshot.artist, UNKNOWN_ARTIST);
        assert_eq!(snapshot.duration, 1_000);
    }

    #[test]
    fn metadata_keeps_artwork_and_duration_when_absent() {
        let mut snapshot = MediaSnapshot::default();
        let art = Artwork::new(vec![0x89, 0x50, 0x4e, 0x47]);

        snapshot.apply_metadata(MetadataUpdate {
            title: Some("First".to_string()),
            artist: Some("Band".to_string()),
            artwork: Some(art.clone()),
            duration: Some(180_000),
        });
        snapshot.apply_metadata(MetadataUpdate {
            title: Some("Second".to_string()),
            ..MetadataUpdate::default()
        });

        assert_eq!(snapshot.title, "Second");
        assert_eq!(snapshot.artwork, Some(art));
        assert_eq!(snapshot.duration, 180_000);
    }

    #[test]
    fn playback_merge_keeps_position_when_absent() {
        let mut snapshot = MediaSnapshot::default();

        snapshot.apply_playback(PlaybackUpdate::new(PlaybackState::Playing).with_position(42));
        snapshot.apply_playback(PlaybackUpdate::new(PlaybackState::Paused));

        assert!(!snapshot.is_playing);
        assert_eq!(snapshot.position, 42);
    }

    #[test]
    fn playback_merge_leaves_metadata_alone() {
        let mut snapshot = MediaSnapshot::default();
        snapshot.apply_metadata(MetadataUpdate {
            title: Some("Song".to_string()),
            ..MetadataUpdate::default()
        });

        snapshot.apply_playback(PlaybackUpdate::new(PlaybackState::Playing));

        assert_eq!(snapshot.title, "Song");
        assert!(snapshot.is_playing);
    }

    #[test]
    fn artwork_debug_hides_bytes() {
        let art = Artwork::new(vec![1, 2, 3]);
        assert_eq!(format!("{art:?}"), "Artwork(3 bytes)");
    }
}
