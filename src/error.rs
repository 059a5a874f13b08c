//! Error types for the rules engine.

use thiserror::Error;

use crate::board::SnakeId;

/// Errors that abort the processing of a turn.
///
/// Every variant indicates a broken board invariant. None of them are
/// recoverable: the turn is abandoned rather than returning a partially
/// corrected board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// A snake that should be alive has no body segments.
    #[error("snake {snake} has zero length")]
    ZeroLengthSnake {
        /// The offending snake.
        snake: SnakeId,
    },
    /// No move was supplied for a living snake.
    #[error("no move found for snake {snake}")]
    NoMoveFound {
        /// The snake without a move.
        snake: SnakeId,
    },
    /// A snake was eliminated by collision but no culprit was recorded.
    #[error("snake {snake} eliminated by collision without a recorded culprit")]
    MissingCulprit {
        /// The eliminated snake.
        snake: SnakeId,
    },
}

/// Result type for rules operations.
pub type RulesResult<T> = Result<T, RulesError>;
