use super::*;
use crate::SearchResult;

fn sq(coord: &str) -> Position {
    Position::from_coord(coord).unwrap()
}

/// Plays the first legal move it is given.
struct FirstMove;

impl Engine for FirstMove {
    fn search(&mut self, state: &GameState, depth: u8) -> SearchResult {
        let moves = state.get_legal_moves(state.side_to_move());
        SearchResult {
            best_move: moves.first().copied(),
            score: 0,
            depth,
            nodes: moves.len() as u64,
        }
    }

    fn name(&self) -> &str {
        "first-move"
    }
}

fn humans() -> (Box<dyn Player>, Box<dyn Player>) {
    (Box::new(QueuedPlayer::new("white")), Box::new(QueuedPlayer::new("black")))
}

#[test]
fn test_game_over_codes() {
    assert_eq!(GameOver::WhiteWins.code(), "w");
    assert_eq!(GameOver::BlackWins.code(), "b");
    assert_eq!(GameOver::Draw.code(), "d");
    assert_eq!(GameOver::NotOver.code(), "");
    assert!(!GameOver::NotOver.is_over());
    assert_eq!(GameOver::BlackWins.winner(), Some(Colour::Black));
    assert_eq!(GameOver::Draw.winner(), None);
}

#[test]
fn test_game_over_detection() {
    let fools = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert_eq!(fools.game_over(), GameOver::BlackWins);

    let stalemate = GameState::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(stalemate.game_over(), GameOver::Draw);

    let bare_kings = GameState::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    assert_eq!(bare_kings.game_over(), GameOver::Draw);

    let fifty = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
    assert_eq!(fifty.game_over(), GameOver::Draw);

    assert_eq!(GameState::startpos().game_over(), GameOver::NotOver);
}

#[test]
fn test_submit_move_checks_turn_and_notation() {
    let (white, black) = humans();
    let mut game = Game::new(white, black);
    assert_eq!(game.player_to_play(), Colour::White);

    assert!(matches!(
        game.submit_move(Colour::Black, "e5"),
        Err(ChessError::NotYourTurn(Colour::Black))
    ));
    assert!(matches!(
        game.submit_move(Colour::White, "e5"),
        Err(ChessError::InvalidNotation(_))
    ));
    let mv = game.submit_move(Colour::White, "e4").unwrap();
    assert_eq!(mv, Move::normal(sq("e2"), sq("e4"), PieceKind::Pawn));
    assert_eq!(game.player_to_play(), Colour::Black);
    assert_eq!(game.previous_moves(), vec!["Pe2e4".to_string()]);
}

#[test]
fn test_submit_after_mate_reports_game_over() {
    let (white, black) = humans();
    let mut game = Game::new(white, black);
    for (colour, text) in [
        (Colour::White, "f3"),
        (Colour::Black, "e5"),
        (Colour::White, "g4"),
        (Colour::Black, "Qh4#"),
    ] {
        game.submit_move(colour, text).unwrap();
    }
    assert_eq!(game.game_over(), GameOver::BlackWins);
    assert!(matches!(
        game.submit_move(Colour::White, "a3"),
        Err(ChessError::GameOver("b"))
    ));
    assert!(game.legal_moves_notation().is_empty());
}

#[test]
fn test_tick_with_queued_players() {
    let mut white = QueuedPlayer::new("white");
    white.push("Zz9");
    white.push("e4");
    let black = QueuedPlayer::new("black");
    let mut game = Game::new(Box::new(white), Box::new(black));

    // The junk entry is dropped and the next one played.
    assert_eq!(
        game.tick().unwrap(),
        Tick::Moved(Move::normal(sq("e2"), sq("e4"), PieceKind::Pawn))
    );
    assert_eq!(game.tick().unwrap(), Tick::Waiting);
    assert_eq!(game.player_to_play(), Colour::Black);

    game.queue_move(Colour::Black, "e5").unwrap();
    assert_eq!(
        game.tick().unwrap(),
        Tick::Moved(Move::normal(sq("e7"), sq("e5"), PieceKind::Pawn))
    );
    assert_eq!(game.previous_moves(), vec!["Pe2e4".to_string(), "Pe7e5".to_string()]);
}

#[test]
fn test_queue_move_needs_a_queued_player() {
    let mut game = Game::new(
        Box::new(EnginePlayer::new(FirstMove, 1)),
        Box::new(QueuedPlayer::new("black")),
    );
    assert!(matches!(
        game.queue_move(Colour::White, "e4"),
        Err(ChessError::NotQueued(Colour::White))
    ));
    assert!(game.queue_move(Colour::Black, "e5").is_ok());
}

#[test]
fn test_restart_clears_board_and_queues() {
    let (white, black) = humans();
    let mut game = Game::new(white, black);
    game.submit_move(Colour::White, "d4").unwrap();
    game.queue_move(Colour::Black, "d5").unwrap();
    game.restart();

    assert_eq!(game.state().generate_fen(), crate::START_FEN);
    assert!(game.previous_moves().is_empty());
    game.submit_move(Colour::White, "e4").unwrap();
    // The queued reply went with the old game.
    assert_eq!(game.tick().unwrap(), Tick::Waiting);
}

#[test]
fn test_tick_with_engines_until_game_over() {
    let white = EnginePlayer::new(FirstMove, 1);
    let black = EnginePlayer::from_config(FirstMove, &EngineConfig::with_depth(1));
    let mut game = Game::from_fen(
        Box::new(white),
        Box::new(black),
        "7k/8/6K1/8/8/8/8/R7 w - - 0 1",
    )
    .unwrap();
    let mut plies = 0;
    loop {
        match game.tick().unwrap() {
            Tick::Moved(_) => plies += 1,
            Tick::Over(_) => break,
            Tick::Waiting => panic!("engines always have a move"),
        }
        assert!(plies < 400, "game did not finish");
    }
    assert!(game.game_over().is_over());
}

#[test]
fn test_undo_and_snapshots() {
    let (white, black) = humans();
    let mut game = Game::new(white, black);
    game.submit_move(Colour::White, "Nf3").unwrap();
    let snap = game.one_colour_board(Colour::White);
    assert_eq!(snap.piece_count(), 16);
    assert_eq!(snap.get(sq("f3")).map(|p| p.letter), Some('N'));
    assert!(snap.get(sq("e8")).is_none());
    assert_eq!(game.one_colour_board(Colour::Black).piece_count(), 16);

    assert_eq!(game.undo().unwrap(), Move::normal(sq("g1"), sq("f3"), PieceKind::Knight));
    assert_eq!(game.state().generate_fen(), crate::START_FEN);
    assert!(matches!(game.undo(), Err(ChessError::NothingToUndo)));
}

#[test]
fn test_piece_destinations_and_move_list() {
    let (white, black) = humans();
    let game = Game::new(white, black);
    let mut knight = game.piece_destinations(sq("g1"));
    knight.sort();
    let mut expected = vec![sq("f3"), sq("h3")];
    expected.sort();
    assert_eq!(knight, expected);
    assert!(game.piece_destinations(sq("e4")).is_empty());

    let list = game.legal_moves_notation();
    assert_eq!(list.len(), 20);
    assert!(list.contains(&"Ng1f3".to_string()));

    let promo = Game::from_fen(
        Box::new(QueuedPlayer::new("w")),
        Box::new(QueuedPlayer::new("b")),
        "7k/P7/8/8/8/8/8/K7 w - - 0 1",
    )
    .unwrap();
    assert_eq!(promo.piece_destinations(sq("a7")), vec![sq("a8")]);
}

#[test]
fn test_game_over_serializes_to_code() {
    assert_eq!(serde_json::to_string(&GameOver::WhiteWins).unwrap(), "\"w\"");
    assert_eq!(serde_json::to_string(&GameOver::NotOver).unwrap(), "\"\"");
    let back: GameOver = serde_json::from_str("\"d\"").unwrap();
    assert_eq!(back, GameOver::Draw);
}
