//! Headless player for the shell
//!
//! Media decoding lives elsewhere; this player keeps the state the shell
//! reports and logs what the playlist asks of it.

use cue_playlist::{Media, NullPlayer, Player, PlayerState};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ShellPlayer {
    inner: NullPlayer,
}

impl ShellPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for ShellPlayer {
    fn set_current_media(&mut self, media: Option<Arc<Media>>) {
        match &media {
            Some(media) => debug!(uri = media.uri(), "Loading media"),
            None => debug!("Unloading media"),
        }
        self.inner.set_current_media(media);
    }

    fn invalidate_next_media(&mut self) {
        debug!("Next media invalidated");
    }

    fn start(&mut self) {
        self.inner.start();
        debug!(state = ?self.inner.state(), "Start requested");
    }

    fn stop(&mut self) {
        self.inner.stop();
    }

    fn pause(&mut self) {
        self.inner.pause();
    }

    fn resume(&mut self) {
        self.inner.resume();
    }

    fn state(&self) -> PlayerState {
        self.inner.state()
    }

    fn current_media(&self) -> Option<Arc<Media>> {
        self.inner.current_media()
    }
}
