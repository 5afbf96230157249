/// Remote control error types
use cue_playlist::PlaylistError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RcError>;

#[derive(Debug, Error)]
pub enum RcError {
    #[error("Unknown command `{0}'. Type 'help' for help.")]
    UnknownCommand(String),

    #[error("Error: `{0}' needs an argument.")]
    MissingArgument(&'static str),

    #[error("Error: bad argument for `{command}': {reason}")]
    BadArgument {
        command: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error: {0}")]
    Playlist(#[from] PlaylistError),
}

impl From<config::ConfigError> for RcError {
    fn from(err: config::ConfigError) -> Self {
        RcError::Config(err.to_string())
    }
}
