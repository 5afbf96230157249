//! Identity-based requests
//!
//! Callers that build a request from a snapshot (a UI selection, a remote
//! command) hold item handles and indices that may be stale by the time the
//! request runs. These operations resolve items by identity, ignore the
//! ones that are gone, and clamp positions instead of failing. Index hints
//! only speed up the lookup; a wrong hint never changes the result.

use crate::content::runs;
use crate::error::{PlaylistError, Result};
use crate::item::{ItemRef, PlaylistItem};
use crate::media::Media;
use crate::playlist::{Playlist, PlaylistState};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

impl PlaylistState {
    /// Current indices of the requested items still present, in request
    /// order, each index at most once
    fn resolve_indices(&self, items: &[ItemRef], index_hint: Option<usize>) -> Vec<usize> {
        let mut resolved: Vec<Option<usize>> = vec![None; items.len()];

        // fast path: the items are still where the caller saw them
        let mut matched = 0;
        if let Some(hint) = index_hint {
            for (offset, item) in items.iter().enumerate() {
                let index = hint.saturating_add(offset);
                match self.items.get(index) {
                    Some(found) if Arc::ptr_eq(found, item) => {
                        resolved[offset] = Some(index);
                        matched += 1;
                    }
                    _ => break,
                }
            }
        }

        if matched < items.len() {
            let positions: HashMap<usize, usize> = self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| (PlaylistItem::identity(item), index))
                .collect();
            for (slot, item) in resolved.iter_mut().zip(items).skip(matched) {
                *slot = positions.get(&PlaylistItem::identity(item)).copied();
            }
        }

        let mut seen = HashSet::with_capacity(resolved.len());
        resolved
            .into_iter()
            .flatten()
            .filter(|index| seen.insert(*index))
            .collect()
    }
}

impl Playlist {
    /// Insert at `index`, clamped to the playlist end
    pub fn request_insert(&mut self, index: usize, medias: &[Arc<Media>]) -> Result<()> {
        let index = index.min(self.state.items.len());
        self.insert(index, medias)
    }

    /// Remove the given items, skipping those already gone
    ///
    /// Contiguous items are removed together; removals are notified from
    /// the highest index down, so earlier notifications never shift the
    /// indices of later ones.
    pub fn request_remove(&mut self, items: &[ItemRef], index_hint: Option<usize>) -> Result<()> {
        let mut indices = self.state.resolve_indices(items, index_hint);
        indices.sort_unstable();

        for (index, count) in runs(&indices).into_iter().rev() {
            self.remove(index, count)?;
        }
        Ok(())
    }

    /// Move the given items so that they end up adjacent, in request order,
    /// the first one at `target` (clamped) in the resulting sequence
    ///
    /// Items already gone are skipped. Items that are not moved keep their
    /// relative order.
    pub fn request_move(
        &mut self,
        items: &[ItemRef],
        target: usize,
        index_hint: Option<usize>,
    ) -> Result<()> {
        let indices = self.state.resolve_indices(items, index_hint);
        if indices.is_empty() {
            return Ok(());
        }

        let moved: Vec<ItemRef> = indices
            .iter()
            .map(|&index| Arc::clone(&self.state.items[index]))
            .collect();
        let len = self.state.items.len();
        let target = target.min(len - moved.len());

        // the block is inserted before the target-th item that stays put
        let moved_ids: HashSet<usize> = moved.iter().map(PlaylistItem::identity).collect();
        let anchor: Option<ItemRef> = self
            .state
            .items
            .iter()
            .filter(|item| !moved_ids.contains(&PlaylistItem::identity(item)))
            .nth(target)
            .cloned();

        let mut i = 0;
        while i < moved.len() {
            let from = self.state.index_of(&moved[i]).ok_or(PlaylistError::NotFound)?;
            let mut count = 1;
            while i + count < moved.len()
                && self
                    .state
                    .items
                    .get(from + count)
                    .is_some_and(|item| Arc::ptr_eq(item, &moved[i + count]))
            {
                count += 1;
            }

            let dest = if i == 0 {
                match &anchor {
                    Some(anchor) => self.state.index_of(anchor).ok_or(PlaylistError::NotFound)?,
                    None => len,
                }
            } else {
                self.state
                    .index_of(&moved[i - 1])
                    .ok_or(PlaylistError::NotFound)?
                    + 1
            };
            // dest never falls inside the run
            let to = if from < dest { dest - count } else { dest };
            if to != from {
                self.move_items(from, count, to)?;
            }
            i += count;
        }
        Ok(())
    }

    /// Make `item` current; `NotFound` if it is no longer in the playlist
    pub fn request_goto(&mut self, item: &ItemRef, index_hint: Option<usize>) -> Result<()> {
        let index = index_hint
            .filter(|&hint| {
                self.state
                    .items
                    .get(hint)
                    .is_some_and(|found| Arc::ptr_eq(found, item))
            })
            .or_else(|| self.state.index_of(item))
            .ok_or(PlaylistError::NotFound)?;
        self.goto(Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_playlist(count: usize) -> Playlist {
        let mut playlist = Playlist::default();
        let medias: Vec<Arc<Media>> = (0..count)
            .map(|i| Arc::new(Media::new(i.to_string())))
            .collect();
        playlist.append(&medias).unwrap();
        playlist
    }

    fn uris(playlist: &Playlist) -> Vec<&str> {
        playlist.items().iter().map(|item| item.media().uri()).collect()
    }

    fn pick(playlist: &Playlist, indices: &[usize]) -> Vec<ItemRef> {
        indices
            .iter()
            .map(|&i| Arc::clone(playlist.get(i).unwrap()))
            .collect()
    }

    #[test]
    fn resolve_ignores_wrong_hint() {
        let playlist = create_playlist(6);
        let items = pick(&playlist, &[4, 2, 2]);

        assert_eq!(playlist.state().resolve_indices(&items, None), vec![4, 2]);
        assert_eq!(playlist.state().resolve_indices(&items, Some(0)), vec![4, 2]);
        assert_eq!(playlist.state().resolve_indices(&items, Some(4)), vec![4, 2]);
        assert_eq!(playlist.state().resolve_indices(&items, Some(99)), vec![4, 2]);
    }

    #[test]
    fn insert_clamps_index() {
        let mut playlist = create_playlist(2);
        playlist
            .request_insert(10, &[Arc::new(Media::new("x"))])
            .unwrap();
        assert_eq!(uris(&playlist), ["0", "1", "x"]);
    }

    #[test]
    fn move_gathers_scattered_items_in_request_order() {
        let mut playlist = create_playlist(10);
        let items = pick(&playlist, &[8, 2, 5]);

        playlist.request_move(&items, 3, None).unwrap();
        assert_eq!(uris(&playlist), ["0", "1", "3", "8", "2", "5", "4", "6", "7", "9"]);
    }

    #[test]
    fn move_clamps_target() {
        let mut playlist = create_playlist(5);
        let items = pick(&playlist, &[0, 1]);

        playlist.request_move(&items, 100, Some(0)).unwrap();
        assert_eq!(uris(&playlist), ["2", "3", "4", "0", "1"]);
    }

    #[test]
    fn move_skips_stale_items() {
        let mut playlist = create_playlist(6);
        let items = pick(&playlist, &[1, 3, 4]);
        playlist.remove(3, 1).unwrap();

        playlist.request_move(&items, 0, Some(1)).unwrap();
        assert_eq!(uris(&playlist), ["1", "4", "0", "2", "5"]);
    }

    #[test]
    fn goto_removed_item_is_not_found() {
        let mut playlist = create_playlist(3);
        let item = Arc::clone(playlist.get(1).unwrap());

        playlist.request_goto(&item, Some(0)).unwrap();
        assert_eq!(playlist.current_index(), Some(1));

        playlist.remove(1, 1).unwrap();
        assert_eq!(
            playlist.request_goto(&item, Some(1)),
            Err(PlaylistError::NotFound)
        );
    }
}
