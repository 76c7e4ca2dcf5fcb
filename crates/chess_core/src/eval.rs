use crate::{board::Board, coord::BOARD_SIZE, types::*};

/// Material value of a piece kind; kings are not counted.
pub fn piece_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.0,
        PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

/// Material score of `side`. Pawns sharing a file with another pawn of the
/// same side count half, each.
pub fn score_of(board: &Board, side: Side) -> f64 {
    let mut pawns_per_file = [0u8; BOARD_SIZE as usize];
    let mut score = 0.0;
    for (c, pc) in board.pieces() {
        if pc.side != side {
            continue;
        }
        if pc.kind == PieceKind::Pawn {
            pawns_per_file[c.column() as usize] += 1;
        } else {
            score += piece_value(pc.kind);
        }
    }
    for count in pawns_per_file {
        let each = if count >= 2 { 0.5 } else { 1.0 };
        score += f64::from(count) * each * piece_value(PieceKind::Pawn);
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
