//! Direct content operations
//!
//! Index-based edits. Arguments are validated up front: an operation either
//! fails without touching anything or applies fully, then notifies the
//! content event followed by the cursor changes it caused.

use crate::error::{PlaylistError, Result};
use crate::item::{ItemRef, PlaylistItem};
use crate::media::{Media, MediaNode};
use crate::playlist::Playlist;
use crate::sort::{shuffle_items, sort_items};
use crate::types::{PlaybackOrder, SortCriterion};
use std::sync::Arc;
use tracing::trace;

impl Playlist {
    /// Insert one new item per media at `index`
    ///
    /// `index == count()` appends. The same media may be inserted several
    /// times; each insertion gets its own item identity.
    pub fn insert(&mut self, index: usize, medias: &[Arc<Media>]) -> Result<()> {
        let len = self.state.items.len();
        if index > len {
            return Err(PlaylistError::OutOfRange { index, len });
        }
        if medias.is_empty() {
            return Ok(());
        }

        let mut new_items: Vec<ItemRef> = Vec::new();
        new_items.try_reserve_exact(medias.len())?;
        new_items.extend(medias.iter().map(|media| PlaylistItem::new(Arc::clone(media))));
        self.state.items.try_reserve(new_items.len())?;

        trace!(index, count = new_items.len(), "Inserting items");
        self.state.items.splice(index..index, new_items);
        self.items_inserted(index, medias.len());
        Ok(())
    }

    /// Append one new item per media
    pub fn append(&mut self, medias: &[Arc<Media>]) -> Result<()> {
        self.insert(self.state.items.len(), medias)
    }

    /// Move the slice `[index, index + count)` so that it starts at `target`
    ///
    /// `target` is the final position of the first moved item, in the
    /// resulting sequence.
    pub fn move_items(&mut self, index: usize, count: usize, target: usize) -> Result<()> {
        let len = self.state.items.len();
        let end = index.checked_add(count).filter(|&end| end <= len);
        let Some(end) = end else {
            return Err(PlaylistError::OutOfRange { index, len });
        };
        if target > len - count {
            return Err(PlaylistError::OutOfRange { index: target, len });
        }
        if count == 0 || index == target {
            return Ok(());
        }

        trace!(index, count, target, "Moving items");
        let saved = self.save_state();

        let moved: Vec<ItemRef> = self.state.items.drain(index..end).collect();
        self.state.items.splice(target..target, moved);

        if let Some(current) = self.state.current {
            self.state.current = Some(if (index..end).contains(&current) {
                target + (current - index)
            } else {
                let without = if current >= end { current - count } else { current };
                if without >= target {
                    without + count
                } else {
                    without
                }
            });
        }

        self.recompute();
        self.player.invalidate_next_media();
        self.notify(|l, s| l.on_items_moved(s, index, count, target));
        self.notify_changes(saved);
        Ok(())
    }

    /// Remove the slice `[index, index + count)`
    ///
    /// If the current item is among the removed ones, there is no current
    /// item anymore and the player is told so.
    pub fn remove(&mut self, index: usize, count: usize) -> Result<()> {
        let len = self.state.items.len();
        let end = index.checked_add(count).filter(|&end| end <= len);
        let Some(end) = end else {
            return Err(PlaylistError::OutOfRange { index, len });
        };
        if count == 0 {
            return Ok(());
        }

        trace!(index, count, "Removing items");
        let saved = self.save_state();

        if self.state.order == PlaybackOrder::Random {
            self.state.randomizer.remove(&self.state.items[index..end]);
        }
        // released once listeners have been told
        let removed: Vec<ItemRef> = self.state.items.drain(index..end).collect();

        let mut current_removed = false;
        if let Some(current) = self.state.current {
            if (index..end).contains(&current) {
                self.state.current = None;
                current_removed = true;
            } else if current >= end {
                self.state.current = Some(current - count);
            }
        }

        self.recompute();
        if current_removed {
            self.player.set_current_media(None);
        } else {
            self.player.invalidate_next_media();
        }
        self.notify(|l, s| l.on_items_removed(s, index, count));
        self.notify_changes(saved);
        drop(removed);
        Ok(())
    }

    /// Remove every item
    pub fn clear(&mut self) {
        trace!(count = self.state.items.len(), "Clearing playlist");
        self.state.items.clear();
        if self.state.order == PlaybackOrder::Random {
            self.state.randomizer.clear();
        }
        self.player.set_current_media(None);
        self.items_reset(None);
    }

    /// Stable sort by the given criteria, the current item keeps being
    /// current wherever it lands
    pub fn sort(&mut self, criteria: &[SortCriterion]) {
        trace!(?criteria, "Sorting playlist");
        let current = self.state.current_item().cloned();
        sort_items(&mut self.state.items, criteria);
        self.items_reset(current);
    }

    /// Random permutation of the stored order
    ///
    /// Independent of the random playback order, which never touches the
    /// stored order.
    pub fn shuffle(&mut self) {
        trace!(count = self.state.items.len(), "Shuffling playlist");
        let current = self.state.current_item().cloned();
        let state = &mut self.state;
        shuffle_items(&mut state.items, &mut state.shuffle_rng);
        self.items_reset(current);
    }

    /// Tell listeners that the metadata of `media` changed
    ///
    /// Emits one `items_updated` per contiguous run of items wrapping
    /// `media`, and returns how many items were concerned.
    pub fn notify_media_updated(&mut self, media: &Arc<Media>) -> usize {
        let indices: Vec<usize> = self
            .state
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| Arc::ptr_eq(item.media(), media))
            .map(|(index, _)| index)
            .collect();

        for (index, count) in runs(&indices) {
            self.notify(|l, s| l.on_items_updated(s, index, &s.items[index..index + count]));
        }
        indices.len()
    }

    /// Replace the item at `index` by the flattened children of `node`
    ///
    /// Used when a container media (a playlist file, a directory) has been
    /// parsed. If the expanded item was current, its first child becomes
    /// current.
    pub fn expand(&mut self, index: usize, node: &MediaNode) -> Result<()> {
        let len = self.state.items.len();
        if index >= len {
            return Err(PlaylistError::OutOfRange { index, len });
        }

        let children = node.flatten();
        self.state.items.try_reserve(children.len())?;

        let was_current = self.state.current == Some(index);
        self.remove(index, 1)?;
        if !children.is_empty() {
            self.insert(index, &children)?;
            if was_current {
                self.goto(Some(index))?;
            }
        }
        Ok(())
    }

    /// Expand the first item wrapping `node.media`
    ///
    /// Returns `false` if no item wraps it (it was removed meanwhile).
    pub fn expand_media(&mut self, node: &MediaNode) -> Result<bool> {
        match self.state.index_of_media(&node.media) {
            Some(index) => self.expand(index, node).map(|()| true),
            None => Ok(false),
        }
    }

    fn items_inserted(&mut self, index: usize, count: usize) {
        let saved = self.save_state();

        if self.state.order == PlaybackOrder::Random {
            self.state.randomizer.add(&self.state.items[index..index + count]);
        }
        if let Some(current) = self.state.current {
            if current >= index {
                self.state.current = Some(current + count);
            }
        }

        self.recompute();
        self.player.invalidate_next_media();
        self.notify(|l, s| l.on_items_added(s, index, &s.items[index..index + count]));
        self.notify_changes(saved);
    }

    /// Whole content replaced: `current` is looked up again by identity
    fn items_reset(&mut self, current: Option<ItemRef>) {
        let saved = self.save_state();
        self.state.current = current.and_then(|item| self.state.index_of(&item));
        self.recompute();
        self.player.invalidate_next_media();
        self.notify(|l, s| l.on_items_reset(s, &s.items));
        self.notify_changes(saved);
    }
}

/// Group ascending, distinct indices into `(start, count)` runs
pub(crate) fn runs(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &index in indices {
        match runs.last_mut() {
            Some((start, count)) if *start + *count == index => *count += 1,
            _ => runs.push((index, 1)),
        }
    }
    runs
}
