use super::*;

fn sq(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn board(placements: &[(&str, char)]) -> Board {
    Board::from_placements(
        placements
            .iter()
            .map(|&(s, sym)| (sq(s), Piece::from_symbol(sym).unwrap())),
    )
    .unwrap()
}

#[test]
fn test_startpos_layout() {
    let b = Board::startpos();
    assert_eq!(b.len(), 32);
    assert_eq!(
        b.piece_at(sq("e1")),
        Some(Piece::new(PieceKind::King, Side::White))
    );
    assert_eq!(
        b.piece_at(sq("d8")),
        Some(Piece::new(PieceKind::Queen, Side::Black))
    );
    assert_eq!(
        b.piece_at(sq("g7")),
        Some(Piece::new(PieceKind::Pawn, Side::Black))
    );
    assert_eq!(b.piece_at(sq("e4")), None);
    assert!(b.is_king_alive(Side::White));
    assert!(b.is_king_alive(Side::Black));
}

#[test]
fn test_display_renders_rank_8_first() {
    let text = Board::startpos().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "rnbqkbnr  8");
    assert_eq!(lines[1], "pppppppp  7");
    assert_eq!(lines[4], "........  4");
    assert_eq!(lines[7], "RNBQKBNR  1");
    assert_eq!(lines[8], "abcdefgh");
}

#[test]
fn test_move_relocates_piece() {
    let mut b = Board::startpos();
    let outcome = b.move_piece(sq("e2"), sq("e4"), Side::White).unwrap();
    assert_eq!(outcome.captured, None);
    assert_eq!(outcome.moved, Piece::new(PieceKind::Pawn, Side::White));
    assert_eq!(b.piece_at(sq("e2")), None);
    assert_eq!(b.piece_at(sq("e4")), Some(outcome.moved));
    assert_eq!(b.len(), 32);
}

#[test]
fn test_capture_removes_occupant() {
    let mut b = board(&[("a1", 'R'), ("a7", 'n'), ("e1", 'K'), ("e8", 'k')]);
    let outcome = b.move_piece(sq("a1"), sq("a7"), Side::White).unwrap();
    assert_eq!(
        outcome.captured,
        Some(Piece::new(PieceKind::Knight, Side::Black))
    );
    assert!(!outcome.captured_king());
    assert_eq!(b.len(), 3);
}

#[test]
fn test_empty_source_checked_first() {
    let mut b = Board::startpos();
    let before = b.clone();
    assert_eq!(
        b.move_piece(sq("e4"), sq("e5"), Side::White),
        Err(ChessError::EmptySource(sq("e4")))
    );
    assert_eq!(b, before);
}

#[test]
fn test_wrong_side_checked_before_legality() {
    let mut b = Board::startpos();
    let before = b.clone();
    // Black pawn, illegal vector too: the side error wins.
    assert_eq!(
        b.move_piece(sq("e7"), sq("e3"), Side::White),
        Err(ChessError::WrongSideToMove {
            square: sq("e7"),
            owner: Side::Black,
            to_move: Side::White,
        })
    );
    assert_eq!(b, before);
}

#[test]
fn test_illegal_move_leaves_board_untouched() {
    let mut b = Board::startpos();
    let before = b.clone();
    assert!(matches!(
        b.move_piece(sq("a1"), sq("a3"), Side::White),
        Err(ChessError::IllegalMove { .. })
    ));
    assert_eq!(b, before);
}

#[test]
fn test_king_capture_reported() {
    let mut b = board(&[("d1", 'Q'), ("d8", 'k'), ("e1", 'K')]);
    let outcome = b.move_piece(sq("d1"), sq("d8"), Side::White).unwrap();
    assert!(outcome.captured_king());
    assert!(!b.is_king_alive(Side::Black));
}

#[test]
fn test_from_placements_rejects_duplicates_and_extra_kings() {
    let dup = Board::from_placements([
        (sq("a1"), Piece::new(PieceKind::Rook, Side::White)),
        (sq("a1"), Piece::new(PieceKind::Knight, Side::White)),
    ]);
    assert!(matches!(dup, Err(ChessError::InvalidSnapshot(_))));

    let kings = Board::from_placements([
        (sq("a1"), Piece::new(PieceKind::King, Side::Black)),
        (sq("h8"), Piece::new(PieceKind::King, Side::Black)),
    ]);
    assert!(matches!(kings, Err(ChessError::InvalidSnapshot(_))));
}

#[test]
fn test_snapshot_round_trip() {
    let b = board(&[("c3", 'N'), ("f6", 'b'), ("e1", 'K')]);
    let snap = b.snapshot();
    assert_eq!(snap.len(), 3);
    assert_eq!(Board::from_snapshot(&snap).unwrap(), b);

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"c3\""));
    let back: BoardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
    assert_eq!(
        snap.by_notation().get("f6"),
        Some(&(Side::Black, PieceKind::Bishop))
    );
}
