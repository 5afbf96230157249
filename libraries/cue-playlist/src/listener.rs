//! Listener registry
//!
//! Listeners are called synchronously, on the thread that mutates the
//! playlist, while the lock is held. They observe a consistent state and must
//! not call back into the playlist.

use crate::item::ItemRef;
use crate::playlist::PlaylistState;
use crate::types::{PlaybackOrder, PlaybackRepeat};

/// Playlist observer
///
/// Every method defaults to a no-op so implementors only write the callbacks
/// they care about. `state` is the playlist as it is after the change.
#[allow(unused_variables)]
pub trait PlaylistListener: Send {
    /// The whole content was replaced (clear, sort, shuffle, initial replay)
    fn on_items_reset(&mut self, state: &PlaylistState, items: &[ItemRef]) {}

    /// `items` were inserted starting at `index`
    fn on_items_added(&mut self, state: &PlaylistState, index: usize, items: &[ItemRef]) {}

    /// The slice `[index, index + count)` was moved so that it now starts at
    /// `target`
    fn on_items_moved(&mut self, state: &PlaylistState, index: usize, count: usize, target: usize) {
    }

    /// The slice `[index, index + count)` was removed
    fn on_items_removed(&mut self, state: &PlaylistState, index: usize, count: usize) {}

    /// Metadata of `items` (starting at `index`) was refreshed in place
    fn on_items_updated(&mut self, state: &PlaylistState, index: usize, items: &[ItemRef]) {}

    fn on_playback_repeat_changed(&mut self, state: &PlaylistState, repeat: PlaybackRepeat) {}

    fn on_playback_order_changed(&mut self, state: &PlaylistState, order: PlaybackOrder) {}

    fn on_current_index_changed(&mut self, state: &PlaylistState, index: Option<usize>) {}

    fn on_has_prev_changed(&mut self, state: &PlaylistState, has_prev: bool) {}

    fn on_has_next_changed(&mut self, state: &PlaylistState, has_next: bool) {}
}

/// Opaque registration handle returned by `add_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners, dispatched in registration order
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn PlaylistListener>)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn PlaylistListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if `id` was not (or no longer) registered
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(
        &mut self,
        state: &PlaylistState,
        mut f: impl FnMut(&mut dyn PlaylistListener, &PlaylistState),
    ) {
        for (_, listener) in &mut self.entries {
            f(listener.as_mut(), state);
        }
    }

    pub(crate) fn notify_one(
        &mut self,
        id: ListenerId,
        state: &PlaylistState,
        f: impl FnOnce(&mut dyn PlaylistListener, &PlaylistState),
    ) {
        if let Some((_, listener)) = self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id) {
            f(listener.as_mut(), state);
        }
    }
}
