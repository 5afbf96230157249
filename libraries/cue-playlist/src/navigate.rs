//! Playback modes and cursor movement

use crate::error::{PlaylistError, Result};
use crate::media::Media;
use crate::player::PlayerState;
use crate::playlist::{Playlist, PlaylistState};
use crate::types::{PlaybackOrder, PlaybackRepeat};
use std::sync::Arc;
use tracing::debug;

impl PlaylistState {
    pub(crate) fn compute_has_prev(&self) -> bool {
        if self.repeat == PlaybackRepeat::Current && self.current.is_some() {
            return true;
        }
        match self.order {
            PlaybackOrder::Normal => match self.current {
                None => false,
                Some(_) if self.repeat == PlaybackRepeat::All => true,
                Some(current) => current > 0,
            },
            PlaybackOrder::Random => self.randomizer.has_prev(),
        }
    }

    pub(crate) fn compute_has_next(&self) -> bool {
        if self.repeat == PlaybackRepeat::Current && self.current.is_some() {
            return true;
        }
        match self.order {
            PlaybackOrder::Normal => {
                let len = self.items.len();
                if self.repeat == PlaybackRepeat::All {
                    return len > 0;
                }
                match self.current {
                    None => len > 0,
                    Some(current) => current + 1 < len,
                }
            }
            PlaybackOrder::Random => self.randomizer.has_next(),
        }
    }

    fn normal_prev_index(&self) -> Option<usize> {
        let current = self.current?;
        match (current, self.repeat) {
            (0, PlaybackRepeat::All) => self.items.len().checked_sub(1),
            (0, _) => None,
            (current, _) => Some(current - 1),
        }
    }

    fn normal_next_index(&self) -> Option<usize> {
        let len = self.items.len();
        let next = self.current.map_or(0, |current| current + 1);
        if next < len {
            Some(next)
        } else if self.repeat == PlaybackRepeat::All && len > 0 {
            Some(0)
        } else {
            None
        }
    }

    /// `Repeat::Current` replays the current item in both directions
    fn replays_current(&self) -> bool {
        self.repeat == PlaybackRepeat::Current && self.current.is_some()
    }
}

impl Playlist {
    pub fn set_playback_repeat(&mut self, repeat: PlaybackRepeat) {
        if self.state.repeat == repeat {
            return;
        }
        debug!(?repeat, "Playback repeat changed");
        let saved = self.save_state();

        self.state.repeat = repeat;
        self.state
            .randomizer
            .set_loop(repeat == PlaybackRepeat::All);

        self.recompute();
        self.player.invalidate_next_media();
        self.notify(|l, s| l.on_playback_repeat_changed(s, s.repeat));
        self.notify_changes(saved);
    }

    /// Switching to random starts a fresh random cycle over every item,
    /// with the current item (if any) counted as already played
    pub fn set_playback_order(&mut self, order: PlaybackOrder) {
        if self.state.order == order {
            return;
        }
        debug!(?order, "Playback order changed");
        let saved = self.save_state();

        self.state.order = order;
        let state = &mut self.state;
        state.randomizer.clear();
        if order == PlaybackOrder::Random {
            state.randomizer.add(&state.items);
            state
                .randomizer
                .set_loop(state.repeat == PlaybackRepeat::All);
            if let Some(current) = state.current.and_then(|index| state.items.get(index)) {
                state.randomizer.select(current);
            }
        }

        self.recompute();
        self.player.invalidate_next_media();
        self.notify(|l, s| l.on_playback_order_changed(s, s.order));
        self.notify_changes(saved);
    }

    /// Go to the previous item, per the playback order and repeat mode
    ///
    /// Fails with `NotFound` when `has_prev()` is false.
    pub fn prev(&mut self) -> Result<()> {
        if !self.state.has_prev {
            return Err(PlaylistError::NotFound);
        }
        if self.state.replays_current() {
            self.replay_current();
            return Ok(());
        }

        let index = match self.state.order {
            PlaybackOrder::Normal => self.state.normal_prev_index(),
            PlaybackOrder::Random => {
                let state = &mut self.state;
                state
                    .randomizer
                    .prev()
                    .and_then(|item| state.index_of(&item))
            }
        };
        let index = index.ok_or(PlaylistError::NotFound)?;
        self.select(Some(index));
        Ok(())
    }

    /// Go to the next item, per the playback order and repeat mode
    ///
    /// Fails with `NotFound` when `has_next()` is false.
    pub fn next(&mut self) -> Result<()> {
        if !self.state.has_next {
            return Err(PlaylistError::NotFound);
        }
        if self.state.replays_current() {
            self.replay_current();
            return Ok(());
        }

        let index = match self.state.order {
            PlaybackOrder::Normal => self.state.normal_next_index(),
            PlaybackOrder::Random => {
                let state = &mut self.state;
                state
                    .randomizer
                    .next()
                    .and_then(|item| state.index_of(&item))
            }
        };
        let index = index.ok_or(PlaylistError::NotFound)?;
        self.select(Some(index));
        Ok(())
    }

    /// Make `index` current, or clear the current item with `None`
    pub fn goto(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            let len = self.state.items.len();
            if index >= len {
                return Err(PlaylistError::OutOfRange { index, len });
            }
            if self.state.order == PlaybackOrder::Random {
                let state = &mut self.state;
                state.randomizer.select(&state.items[index]);
            }
        }
        self.select(index);
        Ok(())
    }

    /// The media the player should chain to once the current one ends,
    /// without moving the cursor
    ///
    /// In random order with `Repeat::All`, peeking past the end of a cycle
    /// starts the next one, which drops the history: `has_prev` may flip.
    pub fn next_media(&mut self) -> Option<Arc<Media>> {
        if self.state.replays_current() {
            return self.state.current_item().map(|item| Arc::clone(item.media()));
        }
        if !self.state.has_next {
            return None;
        }
        let item = match self.state.order {
            PlaybackOrder::Normal => self
                .state
                .normal_next_index()
                .and_then(|index| self.state.items.get(index))
                .cloned(),
            PlaybackOrder::Random => {
                let saved = self.save_state();
                let item = self.state.randomizer.peek_next();
                self.recompute();
                self.notify_changes(saved);
                item
            }
        };
        item.map(|item| Arc::clone(item.media()))
    }

    /// Start playing; without a current item, the next one is selected first
    pub fn start(&mut self) -> Result<()> {
        if self.state.current.is_none() {
            self.next()?;
        }
        self.player.start();
        Ok(())
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn resume(&mut self) {
        self.player.resume();
    }

    pub fn player_state(&self) -> PlayerState {
        self.player.state()
    }

    fn replay_current(&mut self) {
        let media = self
            .state
            .current_item()
            .map(|item| Arc::clone(item.media()));
        self.player.set_current_media(media);
    }

    /// Set the current index and hand its media to the player
    fn select(&mut self, index: Option<usize>) {
        let saved = self.save_state();
        let media = index
            .and_then(|index| self.state.items.get(index))
            .map(|item| Arc::clone(item.media()));
        self.player.set_current_media(media);
        self.state.current = index;
        self.recompute();
        self.notify_changes(saved);
    }
}
