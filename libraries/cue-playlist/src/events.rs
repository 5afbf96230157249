//! Owned playlist events, for consumers living outside the lock
//!
//! Listener callbacks run while the playlist is locked and must not block.
//! `ChannelListener` turns each callback into a `PlaylistEvent` sent over a
//! channel, so that another thread (a UI, a network session) can process
//! them at its own pace.
//!
//! A bounded channel never blocks the playlist: once it is full, events are
//! dropped and counted, and the consumer gets a single `Dropped` event as
//! soon as there is room again.

use crate::item::ItemRef;
use crate::listener::PlaylistListener;
use crate::playlist::PlaylistState;
use crate::types::{PlaybackOrder, PlaybackRepeat};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::debug;

#[derive(Debug, Clone)]
pub enum PlaylistEvent {
    ItemsReset { items: Vec<ItemRef> },
    ItemsAdded { index: usize, items: Vec<ItemRef> },
    ItemsMoved { index: usize, count: usize, target: usize },
    ItemsRemoved { index: usize, count: usize },
    ItemsUpdated { index: usize, items: Vec<ItemRef> },
    PlaybackRepeatChanged(PlaybackRepeat),
    PlaybackOrderChanged(PlaybackOrder),
    CurrentIndexChanged(Option<usize>),
    HasPrevChanged(bool),
    HasNextChanged(bool),
    /// `count` events were lost because the channel was full
    Dropped { count: usize },
}

/// Forwards every callback to a channel
pub struct ChannelListener {
    tx: Sender<PlaylistEvent>,
    dropped: usize,
}

impl ChannelListener {
    /// Create a listener and the receiving end of an unbounded channel
    pub fn new() -> (Self, Receiver<PlaylistEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::with_sender(tx), rx)
    }

    /// Create a listener whose channel holds at most `capacity` events
    ///
    /// For consumers that only drain now and then: a slow consumer loses
    /// events (see `PlaylistEvent::Dropped`) instead of growing the queue
    /// and keeping removed items alive.
    pub fn bounded(capacity: usize) -> (Self, Receiver<PlaylistEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (Self::with_sender(tx), rx)
    }

    pub fn with_sender(tx: Sender<PlaylistEvent>) -> Self {
        Self { tx, dropped: 0 }
    }

    fn send(&mut self, event: PlaylistEvent) {
        if self.dropped > 0 {
            let notice = PlaylistEvent::Dropped {
                count: self.dropped,
            };
            match self.tx.try_send(notice) {
                Ok(()) => self.dropped = 0,
                Err(TrySendError::Full(_)) => {
                    self.dropped += 1;
                    return;
                }
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                if self.dropped == 0 {
                    debug!("Event channel full, dropping playlist events");
                }
                self.dropped += 1;
            }
            // receiver dropped: nobody is interested anymore
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

impl PlaylistListener for ChannelListener {
    fn on_items_reset(&mut self, _state: &PlaylistState, items: &[ItemRef]) {
        self.send(PlaylistEvent::ItemsReset {
            items: items.to_vec(),
        });
    }

    fn on_items_added(&mut self, _state: &PlaylistState, index: usize, items: &[ItemRef]) {
        self.send(PlaylistEvent::ItemsAdded {
            index,
            items: items.to_vec(),
        });
    }

    fn on_items_moved(&mut self, _state: &PlaylistState, index: usize, count: usize, target: usize) {
        self.send(PlaylistEvent::ItemsMoved {
            index,
            count,
            target,
        });
    }

    fn on_items_removed(&mut self, _state: &PlaylistState, index: usize, count: usize) {
        self.send(PlaylistEvent::ItemsRemoved { index, count });
    }

    fn on_items_updated(&mut self, _state: &PlaylistState, index: usize, items: &[ItemRef]) {
        self.send(PlaylistEvent::ItemsUpdated {
            index,
            items: items.to_vec(),
        });
    }

    fn on_playback_repeat_changed(&mut self, _state: &PlaylistState, repeat: PlaybackRepeat) {
        self.send(PlaylistEvent::PlaybackRepeatChanged(repeat));
    }

    fn on_playback_order_changed(&mut self, _state: &PlaylistState, order: PlaybackOrder) {
        self.send(PlaylistEvent::PlaybackOrderChanged(order));
    }

    fn on_current_index_changed(&mut self, _state: &PlaylistState, index: Option<usize>) {
        self.send(PlaylistEvent::CurrentIndexChanged(index));
    }

    fn on_has_prev_changed(&mut self, _state: &PlaylistState, has_prev: bool) {
        self.send(PlaylistEvent::HasPrevChanged(has_prev));
    }

    fn on_has_next_changed(&mut self, _state: &PlaylistState, has_next: bool) {
        self.send(PlaylistEvent::HasNextChanged(has_next));
    }
}
