//! Cue - Playback Queue
//!
//! Ordered, observable playback queue with a single current cursor.
//!
//! This crate provides:
//! - Item container (insert, move, remove, clear) with stable item identity
//! - Listener registry with ordered, synchronous notifications
//! - Navigation (prev, next, goto) with repeat and order modes
//! - Non-repeating random traversal that remembers its history
//! - Multi-criteria stable sort and in-place shuffle
//! - Identity-based requests that tolerate stale indices
//! - Expansion of container media into their children
//!
//! # Architecture
//!
//! A `Playlist` owns its items, listeners and player. It is shared through a
//! `SharedPlaylist`, whose mutex is the one lock protecting all of them:
//! listener callbacks and player calls happen while it is held.
//!
//! Every operation first validates, then mutates, then notifies the content
//! change followed by the cursor changes (current index, has_prev,
//! has_next), each only if its value actually changed.
//!
//! # Example: Basic Queue
//!
//! ```rust
//! use cue_playlist::{Media, SharedPlaylist};
//! use std::sync::Arc;
//!
//! let playlist = SharedPlaylist::default();
//! let mut guard = playlist.lock();
//!
//! guard.append(&[
//!     Arc::new(Media::new("file:///music/one.ogg")),
//!     Arc::new(Media::new("file:///music/two.ogg")),
//! ])?;
//!
//! guard.next()?;
//! assert_eq!(guard.current_index(), Some(0));
//! assert!(guard.has_next());
//! # Ok::<(), cue_playlist::PlaylistError>(())
//! ```
//!
//! # Example: Listening
//!
//! ```rust
//! use cue_playlist::{ChannelListener, Media, PlaylistEvent, SharedPlaylist};
//! use std::sync::Arc;
//!
//! let playlist = SharedPlaylist::default();
//! let (listener, events) = ChannelListener::new();
//! playlist.add_listener(Box::new(listener), false);
//!
//! playlist.lock().append(&[Arc::new(Media::new("file:///a.ogg"))])?;
//!
//! assert!(matches!(
//!     events.try_recv(),
//!     Ok(PlaylistEvent::ItemsAdded { index: 0, .. })
//! ));
//! # Ok::<(), cue_playlist::PlaylistError>(())
//! ```
//!
//! # Example: Sort and Random Order
//!
//! ```rust
//! use cue_playlist::{PlaybackOrder, Playlist, SortCriterion, SortKey};
//!
//! let mut playlist = Playlist::default();
//! playlist.sort(&[
//!     SortCriterion::ascending(SortKey::Artist),
//!     SortCriterion::descending(SortKey::Date),
//! ]);
//! playlist.set_playback_order(PlaybackOrder::Random);
//! ```

mod content;
mod error;
mod events;
mod item;
mod listener;
mod media;
mod navigate;
mod player;
mod playlist;
mod randomizer;
mod request;
mod shared;
mod sort;
pub mod types;

// Public exports
pub use error::{PlaylistError, Result};
pub use events::{ChannelListener, PlaylistEvent};
pub use item::{ItemRef, PlaylistItem};
pub use listener::{ListenerId, PlaylistListener};
pub use media::{Media, MediaMeta, MediaNode};
pub use player::{NullPlayer, Player, PlayerState};
pub use playlist::{Playlist, PlaylistState};
pub use shared::{PlaylistGuard, SharedPlaylist};
pub use types::{
    PlaybackOrder, PlaybackRepeat, PlaylistConfig, SortCriterion, SortKey, SortOrder,
};
