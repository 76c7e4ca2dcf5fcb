//! Errors of the room layer.

use chess_core::ChessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
    /// The rule engine rejected the request; the stored game is unchanged.
    #[error(transparent)]
    Game(#[from] ChessError),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Room codes are used as file names, so only ASCII letters, digits,
    /// `-` and `_` are accepted.
    #[error("Invalid room name: {0:?}")]
    InvalidRoomName(String),

    /// A logged move no longer replays from the initial position
    #[error("Move history of room {room} does not replay: {source}")]
    CorruptHistory {
        room: String,
        #[source]
        source: ChessError,
    },

    #[error("Room lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize game: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias for room operations
pub type RoomResult<T> = Result<T, RoomError>;
