use super::*;
use crate::types::{Piece, PieceKind};

fn sq(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn snapshot(placements: &[(&str, char)]) -> BoardSnapshot {
    placements
        .iter()
        .map(|&(s, sym)| (sq(s), Piece::from_symbol(sym).unwrap()))
        .collect()
}

#[test]
fn test_new_game_is_not_started() {
    let mut game = Game::new();
    assert_eq!(game.phase(), GamePhase::NotStarted);
    assert_eq!(game.current_turn(), None);
    assert_eq!(game.submit_move("e2", "e4"), Err(ChessError::GameNotStarted));
    assert_eq!(game.end(), Err(ChessError::GameNotStarted));
}

#[test]
fn test_start_sets_white_to_move() {
    let mut game = Game::new();
    game.start().unwrap();
    assert_eq!(game.phase(), GamePhase::Running { turn: Side::White });
    assert_eq!(game.current_turn(), Some(Side::White));
    assert_eq!(game.board().len(), 32);
    assert_eq!(game.start(), Err(ChessError::AlreadyStarted));
}

#[test]
fn test_turn_alternates_only_on_success() {
    let mut game = Game::new();
    game.start().unwrap();

    game.submit_move("e2", "e4").unwrap();
    assert_eq!(game.current_turn(), Some(Side::Black));

    // White piece on Black's turn
    assert!(matches!(
        game.submit_move("d2", "d4"),
        Err(ChessError::WrongSideToMove { .. })
    ));
    assert_eq!(game.current_turn(), Some(Side::Black));

    // Malformed notation
    assert!(matches!(
        game.submit_move("e7", "e9"),
        Err(ChessError::InvalidCoordinate(_))
    ));
    assert_eq!(game.current_turn(), Some(Side::Black));

    game.submit_move("e7", "e5").unwrap();
    assert_eq!(game.current_turn(), Some(Side::White));
}

#[test]
fn test_king_capture_ends_game() {
    let mut game = Game::resume(
        &snapshot(&[("d1", 'Q'), ("d8", 'k'), ("e1", 'K')]),
        Side::White,
    )
    .unwrap();
    let outcome = game.submit_move("d1", "d8").unwrap();
    assert!(outcome.captured_king());
    assert_eq!(
        game.phase(),
        GamePhase::Ended {
            winner: Some(Side::White),
            reason: EndReason::KingCaptured
        }
    );
    assert_eq!(game.winner(), Some(Side::White));
    assert_eq!(game.current_turn(), None);
    assert_eq!(
        game.submit_move("e1", "e2"),
        Err(ChessError::GameAlreadyOver)
    );
}

#[test]
fn test_restart_after_end() {
    let mut game = Game::resume(&snapshot(&[("a1", 'K'), ("a2", 'k')]), Side::White).unwrap();
    game.submit_move("a1", "a2").unwrap();
    assert!(!game.is_running());

    game.start().unwrap();
    assert_eq!(game.current_turn(), Some(Side::White));
    assert_eq!(game.board().len(), 32);
}

#[test]
fn test_end_awards_material_leader() {
    let mut game = Game::resume(
        &snapshot(&[("e1", 'K'), ("e8", 'k'), ("a1", 'R'), ("h7", 'p')]),
        Side::Black,
    )
    .unwrap();
    let phase = game.end().unwrap();
    assert_eq!(
        phase,
        GamePhase::Ended {
            winner: Some(Side::White),
            reason: EndReason::Stopped
        }
    );
    assert_eq!(game.end(), Err(ChessError::GameAlreadyOver));
}

#[test]
fn test_end_level_material_has_no_winner() {
    let mut game = Game::new();
    game.start().unwrap();
    game.end().unwrap();
    assert!(matches!(game.phase(), GamePhase::Ended { winner: None, .. }));
}

#[test]
fn test_status_reports_scores() {
    let mut game = Game::new();
    game.start().unwrap();
    let status = game.status();
    assert_eq!(status.white_score, 38.0);
    assert_eq!(status.black_score, 38.0);
    assert_eq!(status.phase, GamePhase::Running { turn: Side::White });
}

#[test]
fn test_resume_keeps_turn_and_position() {
    let snap = snapshot(&[("e1", 'K'), ("e8", 'k'), ("c4", 'B')]);
    let game = Game::resume(&snap, Side::Black).unwrap();
    assert_eq!(game.current_turn(), Some(Side::Black));
    assert_eq!(game.board_snapshot(), snap);
}

#[test]
fn test_resume_without_king_is_ended() {
    let game = Game::resume(&snapshot(&[("e1", 'K'), ("a7", 'p')]), Side::Black).unwrap();
    assert_eq!(game.winner(), Some(Side::White));
    assert!(matches!(
        Game::resume(&snapshot(&[("a7", 'p')]), Side::White),
        Err(ChessError::InvalidSnapshot(_))
    ));
}

#[test]
fn test_game_snapshot_round_trip() {
    let mut game = Game::new();
    game.start().unwrap();
    game.submit_move("g1", "f3").unwrap();

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let restored = Game::from_snapshot(&serde_json::from_str(&json).unwrap()).unwrap();
    assert_eq!(restored.phase(), GamePhase::Running { turn: Side::Black });
    assert_eq!(restored.board(), game.board());
    assert_eq!(
        restored.board().piece_at(sq("f3")),
        Some(Piece::new(PieceKind::Knight, Side::White))
    );
}

#[test]
fn test_from_snapshot_rejects_running_without_king() {
    let snap = GameSnapshot {
        board: snapshot(&[("e1", 'K')]),
        phase: GamePhase::Running { turn: Side::White },
    };
    assert!(matches!(
        Game::from_snapshot(&snap),
        Err(ChessError::InvalidSnapshot(_))
    ));
}

#[test]
fn test_legal_moves_follow_turn() {
    let mut game = Game::new();
    assert!(game.legal_moves().is_empty());
    game.start().unwrap();
    assert!(
        game.legal_moves()
            .iter()
            .all(|mv| game.board().piece_at(mv.from).unwrap().side == Side::White)
    );
}

#[test]
fn test_phase_display() {
    assert_eq!(GamePhase::NotStarted.to_string(), "not started");
    assert_eq!(
        GamePhase::Running { turn: Side::Black }.to_string(),
        "Black to move"
    );
    assert_eq!(
        GamePhase::Ended {
            winner: Some(Side::White),
            reason: EndReason::KingCaptured
        }
        .to_string(),
        "White wins (king captured)"
    );
}
