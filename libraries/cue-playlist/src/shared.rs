//! Lock shared by the playlist and its player

use crate::listener::{ListenerId, PlaylistListener};
use crate::playlist::Playlist;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type PlaylistGuard<'a> = MutexGuard<'a, Playlist>;

/// Cloneable handle to a playlist behind its mutex
///
/// Every playlist operation is reached through `lock()`: several operations
/// in one critical section observe a consistent state. Listener callbacks
/// run while the lock is held and must not try to take it again.
#[derive(Clone)]
pub struct SharedPlaylist {
    inner: Arc<Mutex<Playlist>>,
}

impl SharedPlaylist {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            inner: Arc::new(Mutex::new(playlist)),
        }
    }

    /// Lock the playlist, recovering from a poisoned lock
    pub fn lock(&self) -> PlaylistGuard<'_> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_listener(
        &self,
        listener: Box<dyn PlaylistListener>,
        notify_current_state: bool,
    ) -> ListenerId {
        self.lock().add_listener(listener, notify_current_state)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.lock().remove_listener(id)
    }
}

impl Default for SharedPlaylist {
    fn default() -> Self {
        Self::new(Playlist::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChannelListener, PlaylistEvent};
    use crate::media::Media;
    use std::thread;

    #[test]
    fn operations_from_several_threads() {
        let shared = SharedPlaylist::default();
        let (listener, rx) = ChannelListener::new();
        let id = shared.add_listener(Box::new(listener), false);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let media = Arc::new(Media::new(format!("{t}-{i}")));
                        shared.lock().append(&[media]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.lock().count(), 100);
        let added = rx
            .try_iter()
            .filter(|event| matches!(event, PlaylistEvent::ItemsAdded { .. }))
            .count();
        assert_eq!(added, 100);
        assert!(shared.remove_listener(id));
        assert!(!shared.remove_listener(id));
    }
}
