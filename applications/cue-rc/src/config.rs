/// Remote control configuration
use crate::error::Result;
use cue_playlist::PlaylistConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cue-rc.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RcConfig {
    #[serde(default)]
    pub rc: RcSettings,

    #[serde(default)]
    pub playlist: PlaylistConfig,

    #[serde(default)]
    pub startup: StartupSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RcSettings {
    /// TCP address to serve on; stdin/stdout when unset
    #[serde(default)]
    pub listen: Option<String>,

    /// Print a `> ` prompt before reading each command
    #[serde(default = "default_prompt")]
    pub prompt: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StartupSettings {
    /// MRLs enqueued before the first command is read
    #[serde(default)]
    pub items: Vec<String>,
}

impl Default for RcSettings {
    fn default() -> Self {
        Self {
            listen: None,
            prompt: default_prompt(),
        }
    }
}

impl RcConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `cue-rc.toml` is read if
    /// present. Environment variables prefixed with `CUE_` override the file,
    /// with `__` between section and key (`CUE_RC__LISTEN`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CUE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }
}

fn default_prompt() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_playlist::{PlaybackOrder, PlaybackRepeat};

    #[test]
    fn defaults() {
        let config = RcConfig::default();
        assert!(config.rc.listen.is_none());
        assert!(!config.rc.prompt);
        assert_eq!(config.playlist.repeat, PlaybackRepeat::None);
        assert_eq!(config.playlist.order, PlaybackOrder::Normal);
        assert!(config.startup.items.is_empty());
    }
}
