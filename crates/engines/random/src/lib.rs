//! Random Move Player
//!
//! A player that selects moves uniformly at random from every move its pieces
//! may legally make. Useful for:
//! - A throwaway opponent in the console
//! - Stress testing the rule engine with long random games

use chess_core::{legal_moves_into, Board, Move, Player, Side};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A player that plays random legal moves.
///
/// It has no evaluation; it picks any move the piece rules accept,
/// including moves that leave its own king en prise.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
    buf: Vec<Move>,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic player for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            buf: Vec::with_capacity(64),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        legal_moves_into(board, side, &mut self.buf);
        self.buf.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.buf.clear();
    }
}
