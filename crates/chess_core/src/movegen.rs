//! Per-piece move legality and legal move enumeration.
//!
//! Legality is a pure predicate over a read-only board. Moving into an
//! attacked cell is allowed: the game ends on king capture, not checkmate.

use crate::board::Board;
use crate::coord::Coordinate;
use crate::error::{ChessError, ChessResult};
use crate::movement::{MovementPolicy, Reach, pawn_start_row};
use crate::types::*;

impl Piece {
    /// Whether this piece, standing on `source`, may move to `target`.
    pub fn can_move(&self, board: &Board, source: Coordinate, target: Coordinate) -> bool {
        if board.piece_at(source) != Some(*self) {
            return false;
        }
        if let Some(occupant) = board.piece_at(target) {
            if occupant.side == self.side {
                return false;
            }
        }
        match MovementPolicy::of(self.kind) {
            Some(policy) => policy_allows(&policy, board, source, target),
            None => pawn_allows(self.side, board, source, target),
        }
    }

    /// Validating form of [`Piece::can_move`].
    pub fn check_move(
        &self,
        board: &Board,
        source: Coordinate,
        target: Coordinate,
    ) -> ChessResult<()> {
        if self.can_move(board, source, target) {
            Ok(())
        } else {
            Err(ChessError::IllegalMove {
                from: source,
                to: target,
            })
        }
    }
}

fn policy_allows(
    policy: &MovementPolicy,
    board: &Board,
    source: Coordinate,
    target: Coordinate,
) -> bool {
    let Some(((dr, dc), steps)) = policy.decompose(source.delta_to(target)) else {
        return false;
    };
    if policy.reach == Reach::FixedOneStep {
        return true;
    }
    // Every cell strictly between source and target must be empty.
    (1..steps as i8).all(|i| {
        source
            .offset(dr * i, dc * i)
            .is_some_and(|c| board.piece_at(c).is_none())
    })
}

fn pawn_allows(side: Side, board: &Board, source: Coordinate, target: Coordinate) -> bool {
    let forward = side.forward();
    let (dr, dc) = source.delta_to(target);
    let target_piece = board.piece_at(target);

    match (dr, dc.abs()) {
        // Straight advances never capture.
        (r, 0) if r == forward => target_piece.is_none(),
        (r, 0) if r == 2 * forward => {
            source.row() == pawn_start_row(side)
                && target_piece.is_none()
                && source
                    .offset(forward, 0)
                    .is_some_and(|c| board.piece_at(c).is_none())
        }
        // Diagonal steps only capture.
        (r, 1) if r == forward => target_piece.is_some_and(|p| p.side != side),
        _ => false,
    }
}

/// Every move of `side` that its piece's rules accept.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, side, &mut out);
    out
}

/// Generate legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &Board, side: Side, out: &mut Vec<Move>) {
    out.clear();
    for (from, piece) in board.pieces() {
        if piece.side != side {
            continue;
        }
        out.extend(
            Coordinate::all()
                .filter(|&to| piece.can_move(board, from, to))
                .map(|to| Move::new(from, to)),
        );
    }
    // HashMap iteration order is arbitrary; keep the output deterministic.
    out.sort_by_key(|mv| (mv.from, mv.to));
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
