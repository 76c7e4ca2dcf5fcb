use std::collections::HashMap;
use std::fmt;

use crate::coord::{BOARD_SIZE, Coordinate};
use crate::error::{ChessError, ChessResult};
use crate::snapshot::BoardSnapshot;
use crate::types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Sparse occupancy map. Cells without an entry are empty.
///
/// All mutation after construction goes through [`Board::move_piece`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: HashMap<Coordinate, Piece>,
}

/// What a successful move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Coordinate,
    pub to: Coordinate,
    pub moved: Piece,
    pub captured: Option<Piece>,
}

impl MoveOutcome {
    pub fn captured_king(&self) -> bool {
        self.captured.is_some_and(Piece::is_king)
    }
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial placement: White on rows 6-7, Black on rows 0-1.
    pub fn startpos() -> Self {
        let mut cells = HashMap::with_capacity(32);
        for col in 0..BOARD_SIZE {
            let kind = BACK_RANK[col as usize];
            for (side, back_row, pawn_row) in [(Side::White, 7, 6), (Side::Black, 0, 1)] {
                cells.insert(Coordinate::at(back_row, col), Piece::new(kind, side));
                cells.insert(Coordinate::at(pawn_row, col), Piece::new(PieceKind::Pawn, side));
            }
        }
        Self { cells }
    }

    /// Build a board from explicit placements, e.g. a persisted position.
    ///
    /// Rejects a cell listed twice and more than one king per side.
    pub fn from_placements<I>(placements: I) -> ChessResult<Self>
    where
        I: IntoIterator<Item = (Coordinate, Piece)>,
    {
        let mut cells = HashMap::new();
        for (c, piece) in placements {
            if cells.insert(c, piece).is_some() {
                return Err(ChessError::InvalidSnapshot(format!(
                    "square {c} occupied twice"
                )));
            }
        }
        let board = Self { cells };
        for side in [Side::White, Side::Black] {
            if board.king_count(side) > 1 {
                return Err(ChessError::InvalidSnapshot(format!(
                    "{side} has more than one king"
                )));
            }
        }
        Ok(board)
    }

    pub fn from_snapshot(snapshot: &BoardSnapshot) -> ChessResult<Self> {
        Self::from_placements(snapshot.iter())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.pieces().collect()
    }

    pub fn piece_at(&self, c: Coordinate) -> Option<Piece> {
        self.cells.get(&c).copied()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.cells.iter().map(|(&c, &p)| (c, p))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_king_alive(&self, side: Side) -> bool {
        self.king_count(side) > 0
    }

    fn king_count(&self, side: Side) -> usize {
        self.cells
            .values()
            .filter(|p| p.side == side && p.is_king())
            .count()
    }

    /// Move the piece on `source` to `target` on behalf of `acting`.
    ///
    /// Checks run in order (empty source, wrong side, piece rules) and the
    /// board is only touched once all of them pass.
    pub fn move_piece(
        &mut self,
        source: Coordinate,
        target: Coordinate,
        acting: Side,
    ) -> ChessResult<MoveOutcome> {
        let moved = self
            .piece_at(source)
            .ok_or(ChessError::EmptySource(source))?;
        if moved.side != acting {
            return Err(ChessError::WrongSideToMove {
                square: source,
                owner: moved.side,
                to_move: acting,
            });
        }
        moved.check_move(self, source, target)?;

        self.cells.remove(&source);
        let captured = self.cells.insert(target, moved);
        Ok(MoveOutcome {
            from: source,
            to: target,
            moved,
            captured,
        })
    }
}

/// Rank 8 first; uppercase White, lowercase Black, `.` for empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in Coordinate::all().enumerate() {
            let ch = self.piece_at(c).map_or('.', Piece::symbol);
            write!(f, "{ch}")?;
            if i % BOARD_SIZE as usize == BOARD_SIZE as usize - 1 {
                writeln!(f, "  {}", BOARD_SIZE - c.row())?;
            }
        }
        write!(f, "abcdefgh")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
