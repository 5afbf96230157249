//! Cue Remote Control Library
//!
//! Line-oriented remote control shell over the cue playback queue, served
//! on stdin/stdout or TCP.
//!
//! This library exposes the shell components for testing purposes.

pub mod command;
pub mod config;
pub mod error;
pub mod player;
pub mod server;
pub mod session;

// Re-export commonly used types for convenience
pub use command::{parse_line, Command};
pub use config::RcConfig;
pub use error::{RcError, Result};
pub use player::ShellPlayer;
pub use session::{Reply, Session};

use cue_playlist::{Media, Playlist, SharedPlaylist};
use std::sync::Arc;
use tracing::info;

/// Build the shared playlist described by `config`, startup items enqueued
pub fn build_playlist(config: &RcConfig) -> Result<SharedPlaylist> {
    let mut playlist = Playlist::new(Box::new(ShellPlayer::new()), &config.playlist);

    let medias: Vec<Arc<Media>> = config
        .startup
        .items
        .iter()
        .map(|mrl| Arc::new(Media::new(mrl.as_str())))
        .collect();
    playlist.append(&medias)?;
    if !medias.is_empty() {
        info!(count = medias.len(), "Startup items enqueued");
    }

    Ok(SharedPlaylist::new(playlist))
}
