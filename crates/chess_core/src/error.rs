//! Error types for the rule engine.
//!
//! Every error is recoverable: an operation that returns `Err` leaves the
//! board, the turn and the phase exactly as they were.

use thiserror::Error;

use crate::coord::Coordinate;
use crate::types::Side;

/// Errors returned by coordinate parsing, move execution and the game lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Notation that is not a file `a`..`h` followed by a rank `1`..`8`,
    /// or row/column indices outside the board.
    #[error("Invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    /// No piece stands on the source cell
    #[error("No piece at source square {0}")]
    EmptySource(Coordinate),

    /// The piece on the source cell belongs to the side that is not moving
    #[error("Piece at {square} belongs to {owner:?}, but it is {to_move:?}'s turn")]
    WrongSideToMove {
        square: Coordinate,
        owner: Side,
        to_move: Side,
    },

    /// The movement rules of the piece reject the vector
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Coordinate, to: Coordinate },

    #[error("Game is already running")]
    AlreadyStarted,

    #[error("Game has not been started")]
    GameNotStarted,

    #[error("Game is already over")]
    GameAlreadyOver,

    /// A persisted board or game snapshot that breaks a board invariant
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type alias for rule engine operations
pub type ChessResult<T> = Result<T, ChessError>;
