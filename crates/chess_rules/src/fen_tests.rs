use super::*;
use crate::game_state::START_FEN;
use crate::moves::Move;

fn sq(coord: &str) -> Position {
    Position::from_coord(coord).unwrap()
}

#[test]
fn test_round_trip_standard_positions() {
    for fen in [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
    ] {
        let state = GameState::from_fen(fen).unwrap();
        assert_eq!(state.generate_fen(), fen);
    }
}

#[test]
fn test_fields_default_when_missing() {
    let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
    assert_eq!(state.side_to_move(), Colour::White);
    assert_eq!(state.en_passant(), None);
    assert_eq!(state.halfmove_clock(), 0);
    assert_eq!(state.fullmove_number(), 1);
    assert_eq!(state.generate_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
}

#[test]
fn test_side_to_move_and_counters() {
    let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 12 40").unwrap();
    assert_eq!(state.side_to_move(), Colour::Black);
    assert_eq!(state.halfmove_clock(), 12);
    assert_eq!(state.fullmove_number(), 40);
}

#[test]
fn test_castling_field_maps_to_move_counts() {
    let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
    assert_eq!(state.castling_rights(), "Kq");
    assert_eq!(state.piece_at(sq("h1")).unwrap().move_count, 0);
    assert_eq!(state.piece_at(sq("a1")).unwrap().move_count, 1);
    assert_eq!(state.piece_at(sq("e1")).unwrap().move_count, 0);
    assert_eq!(state.piece_at(sq("h8")).unwrap().move_count, 1);
    assert_eq!(state.piece_at(sq("a8")).unwrap().move_count, 0);

    let castles: Vec<Move> = state
        .get_legal_moves(Colour::White)
        .into_iter()
        .filter(Move::is_castling)
        .collect();
    assert_eq!(castles, vec![Move::castling(Colour::White, CastleSide::King)]);
}

#[test]
fn test_no_rights_means_no_castling() {
    let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert_eq!(state.castling_rights(), "");
    assert!(!state.get_legal_moves(Colour::White).iter().any(Move::is_castling));
}

#[test]
fn test_rights_follow_play() {
    let mut state = GameState::startpos();
    for (from, to, kind) in [
        ("g1", "f3", PieceKind::Knight),
        ("b8", "c6", PieceKind::Knight),
        ("h1", "g1", PieceKind::Rook),
        ("e7", "e5", PieceKind::Pawn),
    ] {
        state
            .make_move(Move::normal(sq(from), sq(to), kind), true)
            .unwrap();
    }
    assert_eq!(
        state.generate_fen(),
        "r1bqkbnr/pppp1ppp/2n5/4p3/8/5N2/PPPPPPPP/RNBQKBR1 w Qkq e6 0 3"
    );
    let reloaded = GameState::from_fen(&state.generate_fen()).unwrap();
    assert_eq!(reloaded.generate_fen(), state.generate_fen());
}

#[test]
fn test_rejects_malformed_fen() {
    for bad in [
        "",
        "8/8/8/8/8/8/8 w - - 0 1",
        "8/8/8/8/8/8/8/8/8 w - - 0 1",
        "9/8/8/8/8/8/8/8 w - - 0 1",
        "7/8/8/8/8/8/8/8 w - - 0 1",
        "ppppppppp/8/8/8/8/8/8/8 w - - 0 1",
        "4x3/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
        "4k3/8/8/8/8/8/8/4K3 w KX - 0 1",
        "4k3/8/8/8/8/8/8/4K3 w - z9 0 1",
        "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",
        "4k3/8/8/8/8/8/8/4K3 w - e3 0 1",
        "4k3/8/8/8/8/8/8/4K3 b - e6 0 1",
        "4k3/8/8/8/8/8/8/4K3 w - - abc 1",
        "4k3/8/8/8/8/8/8/4K3 w - - 0 -1",
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
        "0k7/8/8/8/8/8/8/4K3 w - - 0 1",
    ] {
        assert!(
            matches!(GameState::from_fen(bad), Err(ChessError::InvalidFen(_))),
            "accepted {bad:?}"
        );
    }
}

#[test]
fn test_load_fen_is_atomic() {
    let mut state = GameState::startpos();
    assert!(state.load_fen("not a fen").is_err());
    assert_eq!(state.generate_fen(), START_FEN);
    state.load_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    assert_eq!(state.side_to_move(), Colour::Black);
}

#[test]
fn test_en_passant_square_must_match_side_to_move() {
    let state = GameState::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").unwrap();
    assert_eq!(state.en_passant(), Some(sq("e3")));
    let state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    assert_eq!(state.en_passant(), Some(sq("d6")));
}

#[test]
fn test_saturated_halfmove_clock_does_not_overflow() {
    let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 4294967295 90").unwrap();
    state
        .make_move(Move::normal(sq("a1"), sq("a2"), PieceKind::Rook), true)
        .unwrap();
    assert_eq!(state.halfmove_clock(), u32::MAX);
    state
        .make_move(Move::normal(sq("e8"), sq("d8"), PieceKind::King), true)
        .unwrap();
    assert_eq!(state.halfmove_clock(), u32::MAX);
    state.undo_move().unwrap();
    state.undo_move().unwrap();
    assert_eq!(state.halfmove_clock(), u32::MAX);
}

#[test]
fn test_castling_saturates_halfmove_clock() {
    let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 4294967295 90").unwrap();
    state
        .make_move(Move::castling(Colour::White, CastleSide::Queen), true)
        .unwrap();
    assert_eq!(state.halfmove_clock(), u32::MAX);
}
