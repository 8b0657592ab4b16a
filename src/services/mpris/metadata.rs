use std::collections::HashMap;

use tracing::debug;
use url::Url;
use zbus::zvariant::{self, OwnedValue};

use crate::services::media::{Artwork, MetadataUpdate};

/// Fallback track path for `SetPosition` when the player reports no track ID.
pub(super) const NO_TRACK_PATH: &str = "/";

const FILE_SCHEME: &str = "file";

/// Translates an MPRIS metadata map into a [`MetadataUpdate`].
///
/// Artwork is loaded from `file://` URLs only; remote art is left unset so
/// the previous artwork stays visible.
pub(super) async fn to_update(metadata: &HashMap<String, OwnedValue>) -> MetadataUpdate {
    let artwork = match metadata.get("mpris:artUrl").and_then(extract_string) {
        Some(url) => load_artwork(&url).await,
        None => None,
    };

    MetadataUpdate {
        title: metadata
            .get("xesam:title")
            .and_then(extract_string)
            .filter(|title| !title.is_empty()),
        artist: metadata
            .get("xesam:artist")
            .and_then(extract_string_array)
            .filter(|artist| !artist.is_empty()),
        artwork,
        duration: metadata.get("mpris:length").and_then(extract_millis),
    }
}

/// The track object path used for absolute seeks.
pub(super) fn track_id(metadata: &HashMap<String, OwnedValue>) -> String {
    metadata
        .get("mpris:trackid")
        .and_then(|value| {
            value
                .downcast_ref::<zvariant::ObjectPath>()
                .map(|path| path.to_string())
                .ok()
                .or_else(|| extract_string(value))
        })
        .unwrap_or_else(|| NO_TRACK_PATH.to_string())
}

async fn load_artwork(art_url: &str) -> Option<Artwork> {
    let path = match Url::parse(art_url) {
        Ok(url) if url.scheme() == FILE_SCHEME => url.to_file_path().ok()?,
        Ok(_) => {
            debug!("Skipping non-local artwork {art_url}");
            return None;
        }
        Err(e) => {
            debug!("Invalid artwork URL {art_url}: {e}");
            return None;
        }
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) if !bytes.is_empty() => Some(Artwork::new(bytes)),
        Ok(_) => None,
        Err(e) => {
            debug!("Cannot read artwork {}: {e}", path.display());
            None
        }
    }
}

fn extract_string(value: &OwnedValue) -> Option<String> {
    if let Ok(s) = String::try_from(value.clone()) {
        return Some(s);
    }
    if let Ok(s) = value.downcast_ref::<String>() {
        return Some(s.to_string());
    }
    if let Ok(s) = value.downcast_ref::<&str>() {
        return Some(s.to_string());
    }
    None
}

fn extract_string_array(value: &OwnedValue) -> Option<String> {
    if let Ok(array) = <&zvariant::Array>::try_from(value) {
        let strings: Vec<String> = array
            .iter()
            .filter_map(|item| {
                item.downcast_ref::<String>()
                    .or_else(|_| item.downcast_ref::<&str>().map(|s| s.to_string()))
                    .ok()
            })
            .collect();

        if !strings.is_empty() {
            return Some(strings.join(", "));
        }
    }

    extract_string(value)
}

/// MPRIS lengths are microseconds; the snapshot keeps milliseconds.
pub(super) fn micros_to_millis(micros: i64) -> u64 {
    (micros.max(0) / 1_000) as u64
}

fn extract_millis(value: &OwnedValue) -> Option<u64> {
    if let Ok(length) = i64::try_from(value.clone())
        && length > 0
    {
        return Some(micros_to_millis(length));
    }

    if let Ok(length) = u64::try_from(value.clone())
        && length > 0
    {
        return Some(length / 1_000);
    }

    None
}

#[cfg(test)]
mod tests {
    use zbus::zvariant::Value;

    use super::*;

    fn owned(value: Value<'_>) -> OwnedValue {
        OwnedValue::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn maps_title_artist_and_length() {
        let mut map = HashMap::new();
        map.insert("xesam:title".to_string(), owned(Value::from("Song")));
        map.insert(
            "xesam:artist".to_string(),
            owned(Value::from(vec!["A", "B"])),
        );
        map.insert("mpris:length".to_string(), owned(Value::from(215_000_000_i64)));

        let update = to_update(&map).await;

        assert_eq!(update.title.as_deref(), Some("Song"));
        assert_eq!(update.artist.as_deref(), Some("A, B"));
        assert_eq!(update.duration, Some(215_000));
        assert!(update.artwork.is_none());
    }

    #[tokio::test]
    async fn empty_title_counts_as_missing() {
        let mut map = HashMap::new();
        map.insert("xesam:title".to_string(), owned(Value::from("")));

        let update = to_update(&map).await;

        assert_eq!(update.title, None);
    }

    #[tokio::test]
    async fn reads_local_artwork() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, [1_u8, 2, 3]).unwrap();

        let mut map = HashMap::new();
        map.insert(
            "mpris:artUrl".to_string(),
            owned(Value::from(format!("file://{}", path.display()))),
        );

        let update = to_update(&map).await;

        assert_eq!(update.artwork.map(|art| art.len()), Some(3));
    }

    #[tokio::test]
    async fn remote_artwork_is_skipped() {
        let mut map = HashMap::new();
        map.insert(
            "mpris:artUrl".to_string(),
            owned(Value::from("https://example.org/cover.jpg")),
        );

        assert!(to_update(&map).await.artwork.is_none());
    }

    #[tokio::test]
    async fn reads_percent_encoded_artwork_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("My Cover ü.png");
        std::fs::write(&path, [7_u8; 5]).unwrap();
        let art_url = Url::from_file_path(&path).unwrap();
        assert!(art_url.as_str().contains("My%20Cover"));

        let mut map = HashMap::new();
        map.insert(
            "mpris:artUrl".to_string(),
            owned(Value::from(art_url.to_string())),
        );

        let update = to_update(&map).await;

        assert_eq!(update.artwork.map(|art| art.len()), Some(5));
    }

    #[tokio::test]
    async fn malformed_artwork_url_is_skipped() {
        let mut map = HashMap::new();
        map.insert("mpris:artUrl".to_string(), owned(Value::from("not a url")));

        assert!(to_update(&map).await.artwork.is_none());
    }

    #[test]
    fn missing_track_id_falls_back() {
        assert_eq!(track_id(&HashMap::new()), NO_TRACK_PATH);
    }

    #[test]
    fn negative_micros_clamp_to_zero() {
        assert_eq!(micros_to_millis(-5), 0);
        assert_eq!(micros_to_millis(1_500), 1);
    }
}
