//! Playlist container
//!
//! Owns the item sequence, the current cursor, the playback modes, the
//! randomizer, the listeners and the player. Every operation takes
//! `&mut self`: a caller reaches a `Playlist` through the guard of a
//! `SharedPlaylist`, which is the lock shared with the player.
//!
//! Mutating operations are split by concern:
//! - `content.rs`: direct index-based edits, sort, shuffle, expansion
//! - `navigate.rs`: playback modes, cursor movement, player pass-through
//! - `request.rs`: identity-based edits tolerant of stale indices

use crate::item::ItemRef;
use crate::listener::{ListenerId, Listeners, PlaylistListener};
use crate::media::Media;
use crate::player::{NullPlayer, Player};
use crate::randomizer::Randomizer;
use crate::types::{PlaybackOrder, PlaybackRepeat, PlaylistConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Observable playlist state
///
/// This is what listeners see: every getter reflects the state after the
/// change being notified.
pub struct PlaylistState {
    pub(crate) items: Vec<ItemRef>,
    pub(crate) current: Option<usize>,
    pub(crate) has_prev: bool,
    pub(crate) has_next: bool,
    pub(crate) repeat: PlaybackRepeat,
    pub(crate) order: PlaybackOrder,
    pub(crate) randomizer: Randomizer,
    pub(crate) shuffle_rng: StdRng,
}

impl PlaylistState {
    pub(crate) fn new(config: &PlaylistConfig) -> Self {
        let mut seeder = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut randomizer = Randomizer::new(StdRng::seed_from_u64(seeder.gen()));
        randomizer.set_loop(config.repeat == PlaybackRepeat::All);

        Self {
            items: Vec::new(),
            current: None,
            has_prev: false,
            has_next: false,
            repeat: config.repeat,
            order: config.order,
            randomizer,
            shuffle_rng: StdRng::seed_from_u64(seeder.gen()),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ItemRef> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Index of `item` by identity, `None` once it has been removed
    pub fn index_of(&self, item: &ItemRef) -> Option<usize> {
        self.items.iter().position(|i| Arc::ptr_eq(i, item))
    }

    /// Index of the first item wrapping `media`
    pub fn index_of_media(&self, media: &Arc<Media>) -> Option<usize> {
        self.items.iter().position(|i| Arc::ptr_eq(i.media(), media))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_item(&self) -> Option<&ItemRef> {
        self.current.and_then(|index| self.items.get(index))
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn playback_repeat(&self) -> PlaybackRepeat {
        self.repeat
    }

    pub fn playback_order(&self) -> PlaybackOrder {
        self.order
    }
}

/// Cursor-derived values captured before a mutation, to notify only what
/// actually changed afterwards
#[derive(Debug, Clone, Copy)]
pub(crate) struct SavedState {
    current: Option<usize>,
    has_prev: bool,
    has_next: bool,
}

/// The playback queue
pub struct Playlist {
    pub(crate) state: PlaylistState,
    pub(crate) listeners: Listeners,
    pub(crate) player: Box<dyn Player>,
}

impl Playlist {
    pub fn new(player: Box<dyn Player>, config: &PlaylistConfig) -> Self {
        let mut playlist = Self {
            state: PlaylistState::new(config),
            listeners: Listeners::default(),
            player,
        };
        playlist.recompute();
        playlist
    }

    /// Read-only view, the same one listeners receive
    pub fn state(&self) -> &PlaylistState {
        &self.state
    }

    pub fn count(&self) -> usize {
        self.state.count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ItemRef> {
        self.state.get(index)
    }

    pub fn items(&self) -> &[ItemRef] {
        self.state.items()
    }

    pub fn index_of(&self, item: &ItemRef) -> Option<usize> {
        self.state.index_of(item)
    }

    pub fn index_of_media(&self, media: &Arc<Media>) -> Option<usize> {
        self.state.index_of_media(media)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    pub fn current_item(&self) -> Option<&ItemRef> {
        self.state.current_item()
    }

    pub fn has_prev(&self) -> bool {
        self.state.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn playback_repeat(&self) -> PlaybackRepeat {
        self.state.playback_repeat()
    }

    pub fn playback_order(&self) -> PlaybackOrder {
        self.state.playback_order()
    }

    pub fn player(&self) -> &dyn Player {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> &mut dyn Player {
        self.player.as_mut()
    }

    /// Register a listener
    ///
    /// With `notify_current_state`, the new listener immediately receives
    /// the callbacks describing the present state, as if it had just been
    /// built: items reset, repeat, order, then the cursor values that are
    /// set.
    pub fn add_listener(
        &mut self,
        listener: Box<dyn PlaylistListener>,
        notify_current_state: bool,
    ) -> ListenerId {
        let id = self.listeners.add(listener);
        if notify_current_state {
            let state = &self.state;
            self.listeners
                .notify_one(id, state, |l, s| l.on_items_reset(s, &s.items));
            self.listeners
                .notify_one(id, state, |l, s| l.on_playback_repeat_changed(s, s.repeat));
            self.listeners
                .notify_one(id, state, |l, s| l.on_playback_order_changed(s, s.order));
            if state.current.is_some() {
                self.listeners
                    .notify_one(id, state, |l, s| l.on_current_index_changed(s, s.current));
            }
            if state.has_prev {
                self.listeners
                    .notify_one(id, state, |l, s| l.on_has_prev_changed(s, true));
            }
            if state.has_next {
                self.listeners
                    .notify_one(id, state, |l, s| l.on_has_next_changed(s, true));
            }
        }
        id
    }

    /// Unregister a listener; it receives nothing from now on
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify(&mut self, f: impl FnMut(&mut dyn PlaylistListener, &PlaylistState)) {
        self.listeners.notify(&self.state, f);
    }

    pub(crate) fn save_state(&self) -> SavedState {
        SavedState {
            current: self.state.current,
            has_prev: self.state.has_prev,
            has_next: self.state.has_next,
        }
    }

    /// Recompute the derived navigation flags from the current state
    pub(crate) fn recompute(&mut self) {
        self.state.has_prev = self.state.compute_has_prev();
        self.state.has_next = self.state.compute_has_next();
    }

    /// Emit the cursor events whose value differs from `saved`, in the
    /// fixed order current index, has_prev, has_next
    pub(crate) fn notify_changes(&mut self, saved: SavedState) {
        if saved.current != self.state.current {
            self.notify(|l, s| l.on_current_index_changed(s, s.current));
        }
        if saved.has_prev != self.state.has_prev {
            self.notify(|l, s| l.on_has_prev_changed(s, s.has_prev));
        }
        if saved.has_next != self.state.has_next {
            self.notify(|l, s| l.on_has_next_changed(s, s.has_next));
        }
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(Box::new(NullPlayer::new()), &PlaylistConfig::default())
    }
}
