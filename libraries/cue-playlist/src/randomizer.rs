//! Random playback order
//!
//! Produces a non-repeating random traversal of the playlist items, one
//! Fisher-Yates step at a time, and remembers what was drawn so that
//! "previous" walks back through the actual listening history.
//!
//! Layout of `items`:
//! ```text
//!  0            current          head                len
//!  |--- history ---|--- redo ---|------- pool -------|
//! ```
//! - `[0, head)`: items already drawn in this cycle, in draw order
//! - `items[current - 1]`: the item returned last (the one playing)
//! - `[current, head)`: items drawn before the user went back with `prev`
//! - `[head, len)`: items not drawn yet, in no particular order

use crate::item::{ItemRef, PlaylistItem};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

pub(crate) struct Randomizer {
    items: Vec<ItemRef>,
    head: usize,
    current: usize,
    looping: bool,
    rng: StdRng,
}

impl Randomizer {
    pub(crate) fn new(rng: StdRng) -> Self {
        Self {
            items: Vec::new(),
            head: 0,
            current: 0,
            looping: false,
            rng,
        }
    }

    /// With loop enabled, an exhausted pool is refilled instead of ending
    pub(crate) fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    #[cfg(test)]
    pub(crate) fn count(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub(crate) fn has_next(&self) -> bool {
        self.current < self.head
            || self.head < self.items.len()
            || (self.looping && !self.items.is_empty())
    }

    /// The item `prev` would return
    #[cfg(test)]
    pub(crate) fn peek_prev(&self) -> Option<&ItemRef> {
        if self.has_prev() {
            self.items.get(self.current - 2)
        } else {
            None
        }
    }

    /// The item `next` would return
    ///
    /// May draw from the pool (or restart the cycle when looping), but the
    /// draw is kept so that the following `next` returns the same item.
    pub(crate) fn peek_next(&mut self) -> Option<ItemRef> {
        if self.current == self.head {
            if self.head == self.items.len() {
                if !self.looping || self.items.is_empty() {
                    return None;
                }
                self.reshuffle();
            }
            self.draw();
        }
        self.items.get(self.current).cloned()
    }

    pub(crate) fn next(&mut self) -> Option<ItemRef> {
        let item = self.peek_next()?;
        self.current += 1;
        Some(item)
    }

    pub(crate) fn prev(&mut self) -> Option<ItemRef> {
        if !self.has_prev() {
            return None;
        }
        self.current -= 1;
        Some(Arc::clone(&self.items[self.current - 1]))
    }

    /// Mark `item` as the last drawn one (explicit selection by the user)
    ///
    /// An item from the pool leaves it; an item already drawn moves to the
    /// end of the history. Either way the redo part is discarded.
    pub(crate) fn select(&mut self, item: &ItemRef) -> bool {
        let Some(idx) = self.position(item) else {
            return false;
        };
        if idx >= self.head {
            self.items.swap(idx, self.head);
            self.head += 1;
        } else {
            self.items[idx..self.head].rotate_left(1);
        }
        self.current = self.head;
        true
    }

    /// New items join the pool; they have not been played
    pub(crate) fn add(&mut self, items: &[ItemRef]) {
        self.items.extend(items.iter().cloned());
    }

    /// Purge items from history and pool
    pub(crate) fn remove(&mut self, items: &[ItemRef]) {
        let removed: HashSet<usize> = items.iter().map(PlaylistItem::identity).collect();
        let mut before_head = 0;
        let mut before_current = 0;
        for (idx, item) in self.items.iter().enumerate() {
            if removed.contains(&PlaylistItem::identity(item)) {
                if idx < self.head {
                    before_head += 1;
                }
                if idx < self.current {
                    before_current += 1;
                }
            }
        }
        self.items
            .retain(|item| !removed.contains(&PlaylistItem::identity(item)));
        self.head -= before_head;
        self.current -= before_current;
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.head = 0;
        self.current = 0;
    }

    /// Start a new cycle: every item goes back to the pool
    fn reshuffle(&mut self) {
        self.head = 0;
        self.current = 0;
    }

    /// One Fisher-Yates step: move a random pool item to `head`
    fn draw(&mut self) {
        let selected = self.rng.gen_range(self.head..self.items.len());
        self.items.swap(self.head, selected);
        self.head += 1;
    }

    fn position(&self, item: &ItemRef) -> Option<usize> {
        self.items.iter().position(|i| Arc::ptr_eq(i, item))
    }
}
