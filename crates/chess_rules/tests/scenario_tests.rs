//! End-to-end scenarios on the public API.

use chess_rules::{CastleSide, Colour, GameState, Move, PieceKind, Position};

#[test]
fn scenario_pawn_double_step_flips_turn() {
    let mut state = GameState::startpos();
    let mv = Move::from_algebraic_notation(&state, Colour::White, "a4").expect("a4 is legal");
    state.make_move(mv, true).unwrap();

    let pawn = state.piece_at(Position::new(0, 4)).expect("pawn on a4");
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert_eq!(pawn.colour, Colour::White);
    assert!(state.piece_at(Position::new(0, 6)).is_none());
    assert_eq!(state.side_to_move(), Colour::Black);
}

#[test]
fn scenario_two_rooks_against_bare_king() {
    // As written the g7 rook is unprotected, so the king's only move is to take it.
    let state = GameState::from_fen("R6k/6R1/8/8/8/8/8/1NBQKBN1 w - - 0 1").unwrap();
    assert!(state.check(Colour::Black));
    assert_eq!(
        state.get_legal_moves(Colour::Black),
        vec![Move::normal(Position::new(7, 0), Position::new(6, 1), PieceKind::King)]
    );
    assert!(!state.checkmate(Colour::Black));

    // With the bishop guarding g7 it is mate.
    let state = GameState::from_fen("R6k/6R1/8/8/8/8/1B6/4K3 w - - 0 1").unwrap();
    assert!(state.get_legal_moves(Colour::Black).is_empty());
    assert!(state.checkmate(Colour::Black));
}

#[test]
fn scenario_promotion_in_place() {
    let mut state = GameState::from_fen("1P6/7k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let square = Position::new(1, 0);
    state
        .make_move(Move::promotion(square, square, PieceKind::Queen), true)
        .unwrap();

    let piece = state.piece_at(square).expect("piece on b8");
    assert_eq!(piece.kind, PieceKind::Queen);
    assert_eq!(piece.colour, Colour::White);
}

#[test]
fn scenario_castling_both_sides_available() {
    let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let king_square = Position::new(4, 7);
    let king = state.piece_at(king_square).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(king.move_count, 0);

    let moves = state.piece_moves(king_square);
    assert!(moves.contains(&Move::castling(Colour::White, CastleSide::King)));
    assert!(moves.contains(&Move::castling(Colour::White, CastleSide::Queen)));
}

#[test]
fn scenario_start_position_has_twenty_moves() {
    let state = GameState::startpos();
    let moves = state.get_legal_moves(Colour::White);
    assert_eq!(moves.len(), 20);

    let pawn_moves = moves
        .iter()
        .filter(|mv| matches!(mv, Move::Normal { piece: PieceKind::Pawn, .. }))
        .count();
    let knight_moves = moves
        .iter()
        .filter(|mv| matches!(mv, Move::Normal { piece: PieceKind::Knight, .. }))
        .count();
    assert_eq!(pawn_moves, 16);
    assert_eq!(knight_moves, 4);
}
