//! Media handles referenced by playlist items
//!
//! A `Media` is owned by whoever created it and shared with the playlist
//! through `Arc<Media>`. Its URI never changes; its metadata may be refreshed
//! at any time (preparsing, tag edits) without holding the playlist lock.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Descriptive metadata of a media
///
/// All fields are optional: a media freshly added from an MRL knows nothing
/// until it has been parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMeta {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub genre: Option<String>,
    pub date: Option<String>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub duration: Option<Duration>,
    pub rating: Option<u8>,
}

/// Externally shared media handle
#[derive(Debug)]
pub struct Media {
    uri: String,
    meta: RwLock<MediaMeta>,
}

impl Media {
    /// Create a media with empty metadata
    pub fn new(uri: impl Into<String>) -> Self {
        Self::with_meta(uri, MediaMeta::default())
    }

    /// Create a media with known metadata
    pub fn with_meta(uri: impl Into<String>, meta: MediaMeta) -> Self {
        Self {
            uri: uri.into(),
            meta: RwLock::new(meta),
        }
    }

    /// Unique resource identifier
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Display name: the title if known, the URI otherwise
    pub fn name(&self) -> String {
        self.meta
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .title
            .clone()
            .unwrap_or_else(|| self.uri.clone())
    }

    /// Snapshot of the current metadata
    pub fn meta(&self) -> MediaMeta {
        self.meta
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the metadata
    ///
    /// Playlists holding this media are not told automatically; call
    /// `Playlist::notify_media_updated` under the playlist lock afterwards.
    pub fn set_meta(&self, meta: MediaMeta) {
        *self.meta.write().unwrap_or_else(PoisonError::into_inner) = meta;
    }

    /// Edit the metadata in place
    pub fn update_meta(&self, f: impl FnOnce(&mut MediaMeta)) {
        f(&mut self.meta.write().unwrap_or_else(PoisonError::into_inner));
    }
}

/// A media and the sub-items discovered inside it (a playlist file, a
/// directory, a disc)
#[derive(Debug, Clone)]
pub struct MediaNode {
    pub media: Arc<Media>,
    pub children: Vec<MediaNode>,
}

impl MediaNode {
    pub fn new(media: Arc<Media>) -> Self {
        Self {
            media,
            children: Vec::new(),
        }
    }

    /// Append a child and return it for further nesting
    pub fn push(&mut self, media: Arc<Media>) -> &mut MediaNode {
        self.children.push(MediaNode::new(media));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// All descendants in depth-first order (each child before its own
    /// children), excluding this node's media
    pub fn flatten(&self) -> Vec<Arc<Media>> {
        let mut out = Vec::new();
        Self::collect(self, &mut out);
        out
    }

    fn collect(node: &MediaNode, out: &mut Vec<Arc<Media>>) {
        for child in &node.children {
            out.push(Arc::clone(&child.media));
            Self::collect(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_uri() {
        let media = Media::new("file:///music/a.flac");
        assert_eq!(media.name(), "file:///music/a.flac");

        media.update_meta(|m| m.title = Some("Song A".to_string()));
        assert_eq!(media.name(), "Song A");
        assert_eq!(media.uri(), "file:///music/a.flac");
    }

    #[test]
    fn set_meta_replaces_everything() {
        let media = Media::with_meta(
            "x",
            MediaMeta {
                artist: Some("Artist".to_string()),
                ..Default::default()
            },
        );
        media.set_meta(MediaMeta {
            title: Some("T".to_string()),
            ..Default::default()
        });
        let meta = media.meta();
        assert_eq!(meta.title.as_deref(), Some("T"));
        assert!(meta.artist.is_none());
    }

    #[test]
    fn flatten_is_depth_first() {
        let m = |uri: &str| Arc::new(Media::new(uri));
        let mut root = MediaNode::new(m("root"));
        root.push(m("a"));
        root.push(m("b"));
        {
            let c = root.push(m("c"));
            c.push(m("c1"));
            c.push(m("c2"));
        }
        root.push(m("d"));

        let uris: Vec<String> = root.flatten().iter().map(|m| m.uri().to_string()).collect();
        assert_eq!(uris, vec!["a", "b", "c", "c1", "c2", "d"]);
    }
}
