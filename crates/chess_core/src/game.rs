//! Game lifecycle: the turn/phase state machine around a [`Board`].
//!
//! ```text
//! NotStarted --start--> Running --king captured / end--> Ended
//!                          ^                                |
//!                          +------------start---------------+
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::{Board, MoveOutcome};
use crate::coord::Coordinate;
use crate::error::{ChessError, ChessResult};
use crate::eval::score_of;
use crate::movegen::legal_moves;
use crate::snapshot::{BoardSnapshot, GameSnapshot};
use crate::types::{Move, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The winner captured the opposing king.
    KingCaptured,
    /// Play was stopped; the side ahead on material wins.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    Running {
        turn: Side,
    },
    /// Terminal for moves. `winner` is `None` for a game stopped level on material.
    Ended {
        winner: Option<Side>,
        reason: EndReason,
    },
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::KingCaptured => write!(f, "king captured"),
            EndReason::Stopped => write!(f, "stopped"),
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::NotStarted => write!(f, "not started"),
            GamePhase::Running { turn } => write!(f, "{turn} to move"),
            GamePhase::Ended {
                winner: Some(side),
                reason,
            } => write!(f, "{side} wins ({reason})"),
            GamePhase::Ended {
                winner: None,
                reason,
            } => write!(f, "no winner ({reason})"),
        }
    }
}

/// Scores of both sides plus the phase, as reported by a status query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStatus {
    pub phase: GamePhase,
    pub white_score: f64,
    pub black_score: f64,
}

/// One game: a board plus the phase that decides who may move.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    phase: GamePhase,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A fresh game, not started yet. The board shows the initial layout.
    pub fn new() -> Self {
        Self {
            board: Board::startpos(),
            phase: GamePhase::NotStarted,
        }
    }

    /// Begin a game with the standard layout and White to move.
    ///
    /// Allowed before the first game and after a game has ended.
    pub fn start(&mut self) -> ChessResult<()> {
        if let GamePhase::Running { .. } = self.phase {
            return Err(ChessError::AlreadyStarted);
        }
        self.board = Board::startpos();
        self.phase = GamePhase::Running { turn: Side::White };
        Ok(())
    }

    /// Play a move given in rank-file notation, e.g. `("e2", "e4")`.
    pub fn submit_move(&mut self, source: &str, target: &str) -> ChessResult<MoveOutcome> {
        self.running_turn()?;
        let from = Coordinate::from_notation(source)?;
        let to = Coordinate::from_notation(target)?;
        self.play(Move::new(from, to))
    }

    pub fn play(&mut self, mv: Move) -> ChessResult<MoveOutcome> {
        let turn = self.running_turn()?;
        let outcome = self.board.move_piece(mv.from, mv.to, turn)?;
        self.phase = if outcome.captured_king() {
            GamePhase::Ended {
                winner: Some(turn),
                reason: EndReason::KingCaptured,
            }
        } else {
            GamePhase::Running { turn: turn.other() }
        };
        Ok(outcome)
    }

    /// Stop a running game. The side with more material wins; equal
    /// material ends without a winner.
    pub fn end(&mut self) -> ChessResult<GamePhase> {
        self.running_turn()?;
        let white = self.score_of(Side::White);
        let black = self.score_of(Side::Black);
        let winner = if white > black {
            Some(Side::White)
        } else if black > white {
            Some(Side::Black)
        } else {
            None
        };
        self.phase = GamePhase::Ended {
            winner,
            reason: EndReason::Stopped,
        };
        Ok(self.phase)
    }

    fn running_turn(&self) -> ChessResult<Side> {
        match self.phase {
            GamePhase::Running { turn } => Ok(turn),
            GamePhase::NotStarted => Err(ChessError::GameNotStarted),
            GamePhase::Ended { .. } => Err(ChessError::GameAlreadyOver),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Side to move, `None` unless the game is running.
    pub fn current_turn(&self) -> Option<Side> {
        self.running_turn().ok()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            GamePhase::Ended { winner, .. } => winner,
            _ => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn score_of(&self, side: Side) -> f64 {
        score_of(&self.board, side)
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            phase: self.phase,
            white_score: self.score_of(Side::White),
            black_score: self.score_of(Side::Black),
        }
    }

    /// Moves available to the side to move; empty unless running.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.current_turn() {
            Some(turn) => legal_moves(&self.board, turn),
            None => Vec::new(),
        }
    }

    /// Rebuild a game from a persisted board and the side to move.
    ///
    /// A board already missing one king resumes as an ended game won by the
    /// side whose king remains.
    pub fn resume(board: &BoardSnapshot, turn: Side) -> ChessResult<Game> {
        let board = Board::from_snapshot(board)?;
        let phase = match (
            board.is_king_alive(Side::White),
            board.is_king_alive(Side::Black),
        ) {
            (true, true) => GamePhase::Running { turn },
            (true, false) => GamePhase::Ended {
                winner: Some(Side::White),
                reason: EndReason::KingCaptured,
            },
            (false, true) => GamePhase::Ended {
                winner: Some(Side::Black),
                reason: EndReason::KingCaptured,
            },
            (false, false) => {
                return Err(ChessError::InvalidSnapshot("no king on the board".into()));
            }
        };
        Ok(Game { board, phase })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board_snapshot(),
            phase: self.phase,
        }
    }

    /// Restore a game exactly as snapshotted, phase included.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> ChessResult<Game> {
        let board = Board::from_snapshot(&snapshot.board)?;
        if let GamePhase::Running { .. } = snapshot.phase {
            for side in [Side::White, Side::Black] {
                if !board.is_king_alive(side) {
                    return Err(ChessError::InvalidSnapshot(format!(
                        "running game without a {side} king"
                    )));
                }
            }
        }
        Ok(Game {
            board,
            phase: snapshot.phase,
        })
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
