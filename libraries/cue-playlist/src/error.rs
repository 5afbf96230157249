//! Error types for playlist operations

use thiserror::Error;

/// Playlist errors
///
/// Stale requests are never errors: the request operations absorb them by
/// clamping or dropping, and succeed without notifying anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    /// Index argument violates the bound of a direct operation
    #[error("Index out of range: {index} (length {len})")]
    OutOfRange { index: usize, len: usize },

    /// Identity-based lookup failed, or there is nothing to navigate to
    #[error("Item not found")]
    NotFound,

    /// Wrapping medias into new items failed
    #[error("Allocation failure")]
    AllocationFailure,
}

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;

impl From<std::collections::TryReserveError> for PlaylistError {
    fn from(_: std::collections::TryReserveError) -> Self {
        PlaylistError::AllocationFailure
    }
}
