//! Playlist items
//!
//! An item wraps a shared media and is itself shared: front-ends may keep an
//! `ItemRef` after releasing the lock and hand it back later in a request.
//! Identity is the allocation, never the value: two items wrapping the same
//! media are still different items.

use crate::media::Media;
use std::fmt;
use std::sync::Arc;

/// Shared reference to a playlist item
pub type ItemRef = Arc<PlaylistItem>;

/// Identity-stable wrapper around a media
pub struct PlaylistItem {
    media: Arc<Media>,
}

impl PlaylistItem {
    pub(crate) fn new(media: Arc<Media>) -> ItemRef {
        Arc::new(Self { media })
    }

    /// The wrapped media
    pub fn media(&self) -> &Arc<Media> {
        &self.media
    }

    /// Identity comparison
    pub fn same(a: &ItemRef, b: &ItemRef) -> bool {
        Arc::ptr_eq(a, b)
    }

    /// Key usable in hash maps for identity lookups
    pub(crate) fn identity(item: &ItemRef) -> usize {
        Arc::as_ptr(item) as usize
    }
}

impl fmt::Debug for PlaylistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaylistItem")
            .field("ptr", &(self as *const Self))
            .field("uri", &self.media.uri())
            .finish()
    }
}
