//! Error types for move handling and game configuration.

use derive_more::{Display, Error};
use tracing::instrument;

/// Why a submitted cell index was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidMove {
    /// Index outside 0-8.
    #[display("cell index out of range (must be 0-8)")]
    OutOfRange,
    /// The cell already holds a mark.
    #[display("cell {} is already occupied", _0)]
    Occupied(usize),
}

/// Error that can occur when requesting or applying a move.
///
/// Both variants are recoverable and leave the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The index is out of range or targets an occupied cell.
    #[display("Invalid move: {}", _0)]
    InvalidMove(#[error(not(source))] InvalidMove),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,
}

/// Configuration error with location tracking.
///
/// Raised for strengths outside 0-4 and unparsable player kinds. These are
/// caller bugs; the core refuses them before they can reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Configuration error: {} at {}:{}", message, file, line)]
pub struct ConfigurationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigurationError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_messages() {
        assert_eq!(
            MoveError::InvalidMove(InvalidMove::Occupied(4)).to_string(),
            "Invalid move: cell 4 is already occupied"
        );
        assert_eq!(MoveError::GameOver.to_string(), "Game is already over");
    }

    #[test]
    fn test_configuration_error_tracks_caller() {
        let err = ConfigurationError::new("strength 7 is out of range");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("strength 7 is out of range"));
    }
}
