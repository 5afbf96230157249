//! Core types for the playback queue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackRepeat {
    /// Stop when the end is reached
    #[default]
    None,

    /// Replay the current item
    Current,

    /// Loop over all items
    All,
}

/// Playback order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackOrder {
    /// Follow the stored order
    #[default]
    Normal,

    /// Non-repeating random traversal of the stored items
    Random,
}

/// Metadata field a sort criterion compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Duration,
    Artist,
    Album,
    AlbumArtist,
    Genre,
    Date,
    TrackNumber,
    DiscNumber,
    Url,
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Duration => "duration",
            SortKey::Artist => "artist",
            SortKey::Album => "album",
            SortKey::AlbumArtist => "album_artist",
            SortKey::Genre => "genre",
            SortKey::Date => "date",
            SortKey::TrackNumber => "track_number",
            SortKey::DiscNumber => "disc_number",
            SortKey::Url => "url",
            SortKey::Rating => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "duration" => Ok(SortKey::Duration),
            "artist" => Ok(SortKey::Artist),
            "album" => Ok(SortKey::Album),
            "album_artist" | "albumartist" => Ok(SortKey::AlbumArtist),
            "genre" => Ok(SortKey::Genre),
            "date" => Ok(SortKey::Date),
            "track_number" | "track" => Ok(SortKey::TrackNumber),
            "disc_number" | "disc" => Ok(SortKey::DiscNumber),
            "url" | "uri" => Ok(SortKey::Url),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// One `(key, order)` component of a multi-key sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortCriterion {
    pub key: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortCriterion {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Descending,
        }
    }
}

/// Initial playlist configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Initial repeat mode (default: None)
    #[serde(default)]
    pub repeat: PlaybackRepeat,

    /// Initial playback order (default: Normal)
    #[serde(default)]
    pub order: PlaybackOrder,

    /// Seed for random order and shuffle (default: OS entropy)
    #[serde(default)]
    pub random_seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaylistConfig::default();
        assert_eq!(config.repeat, PlaybackRepeat::None);
        assert_eq!(config.order, PlaybackOrder::Normal);
        assert!(config.random_seed.is_none());
    }

    #[test]
    fn sort_key_parses_aliases() {
        assert_eq!("Artist".parse::<SortKey>(), Ok(SortKey::Artist));
        assert_eq!("track".parse::<SortKey>(), Ok(SortKey::TrackNumber));
        assert_eq!("uri".parse::<SortKey>(), Ok(SortKey::Url));
        assert!("colour".parse::<SortKey>().is_err());
    }

    #[test]
    fn sort_key_display_round_trips() {
        for key in [SortKey::AlbumArtist, SortKey::DiscNumber, SortKey::Rating] {
            assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
        }
    }
}
