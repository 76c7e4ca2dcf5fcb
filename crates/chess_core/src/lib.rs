pub mod board;
pub mod coord;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod movement;
pub mod snapshot;
pub mod types;

// Re-export core game logic (not player-specific)
pub use board::*;
pub use coord::*;
pub use error::*;
pub use eval::*;
pub use game::*;
pub use movegen::*;
pub use movement::*;
pub use snapshot::*;
pub use types::*;

// =============================================================================
// Player trait: implemented by anything that picks moves
// =============================================================================

/// Something that can choose a move for one side.
///
/// Implementations only propose moves; the game still validates them.
pub trait Player: Send {
    /// Pick a move for `side` on `board`, or `None` if it has nothing to play.
    fn choose_move(&mut self, board: &Board, side: Side) -> Option<Move>;

    /// Display name of the player
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
