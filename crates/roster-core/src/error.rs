//! Error types for Roster.

/// Result type alias for Roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors raised by positional list mutations.
///
/// Selection operations never fail; invalid indices there are ignored. Only
/// operations that must hand back an item (or cannot silently skip work)
/// report errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// An index was outside the bounds of the list.
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A range was reversed or extended past the end of the list.
    #[error("range {start}..{end} is invalid for a list of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}

impl RosterError {
    /// Create an out-of-bounds error.
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create an invalid range error.
    pub fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange { start, end, len }
    }
}
