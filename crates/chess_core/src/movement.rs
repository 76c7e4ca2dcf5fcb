//! Movement policies per piece kind.
//!
//! Every non-pawn kind is a set of (row, column) deltas plus a reach: either a
//! single application of a delta (king, knight) or repeated application along
//! a direction until blocked (rook, bishop, queen). Pawns have their own
//! side-dependent rule and no policy value.

use crate::types::{PieceKind, Side};

/// A (row, column) delta.
pub type Delta = (i8, i8);

pub const ORTHOGONAL: [Delta; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const DIAGONAL: [Delta; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ALL_DIRECTIONS: [Delta; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_JUMPS: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    /// Exactly one application of a delta.
    FixedOneStep,
    /// Any positive multiple of a unit direction, over empty cells only.
    Unbounded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementPolicy {
    pub deltas: &'static [Delta],
    pub reach: Reach,
}

impl MovementPolicy {
    /// The policy of `kind`, `None` for pawns.
    pub fn of(kind: PieceKind) -> Option<MovementPolicy> {
        let (deltas, reach): (&'static [Delta], Reach) = match kind {
            PieceKind::King => (&ALL_DIRECTIONS, Reach::FixedOneStep),
            PieceKind::Knight => (&KNIGHT_JUMPS, Reach::FixedOneStep),
            PieceKind::Rook => (&ORTHOGONAL, Reach::Unbounded),
            PieceKind::Bishop => (&DIAGONAL, Reach::Unbounded),
            PieceKind::Queen => (&ALL_DIRECTIONS, Reach::Unbounded),
            PieceKind::Pawn => return None,
        };
        Some(MovementPolicy { deltas, reach })
    }

    /// Decompose a move vector into `(unit delta, step count)` if this policy
    /// allows it. Obstruction is not considered here.
    pub fn decompose(&self, vector: Delta) -> Option<(Delta, u8)> {
        match self.reach {
            Reach::FixedOneStep => self.deltas.contains(&vector).then_some((vector, 1)),
            Reach::Unbounded => {
                let (dr, dc) = vector;
                if vector == (0, 0) {
                    return None;
                }
                // Straight lines only: one component zero or both equal in size.
                if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
                    return None;
                }
                let unit = (dr.signum(), dc.signum());
                let steps = dr.unsigned_abs().max(dc.unsigned_abs());
                self.deltas.contains(&unit).then_some((unit, steps))
            }
        }
    }
}

/// Row a pawn of each side starts on; the two-step advance is only allowed
/// from here.
pub fn pawn_start_row(side: Side) -> u8 {
    match side {
        Side::White => 6,
        Side::Black => 1,
    }
}
