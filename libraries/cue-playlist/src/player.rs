//! Player collaborator
//!
//! The playlist never decodes anything. It tells a `Player` which media is
//! current and forwards transport commands; the player owns its own state
//! machine. The player lives inside the playlist's lock, so both are always
//! observed and mutated together.

use crate::media::Media;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Transport state reported by a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Platform player driven by the playlist
pub trait Player: Send {
    /// Load `media` as the current one (`None` unloads)
    fn set_current_media(&mut self, media: Option<Arc<Media>>);

    /// The media chained after the current one may have changed
    fn invalidate_next_media(&mut self) {}

    fn start(&mut self);

    fn stop(&mut self);

    fn pause(&mut self);

    fn resume(&mut self);

    fn state(&self) -> PlayerState;

    fn current_media(&self) -> Option<Arc<Media>>;
}

/// Player that only records what it was asked to do
///
/// Used when the playlist runs without an output (tests, headless shells).
#[derive(Debug, Default)]
pub struct NullPlayer {
    media: Option<Arc<Media>>,
    state: PlayerState,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for NullPlayer {
    fn set_current_media(&mut self, media: Option<Arc<Media>>) {
        if media.is_none() {
            self.state = PlayerState::Stopped;
        }
        self.media = media;
    }

    fn start(&mut self) {
        if self.media.is_some() {
            self.state = PlayerState::Playing;
        }
    }

    fn stop(&mut self) {
        self.state = PlayerState::Stopped;
    }

    fn pause(&mut self) {
        if self.state == PlayerState::Playing {
            self.state = PlayerState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == PlayerState::Paused {
            self.state = PlayerState::Playing;
        }
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn current_media(&self) -> Option<Arc<Media>> {
        self.media.clone()
    }
}
