//! Game driver: two players taking turns on one [`GameState`].
//!
//! The surrounding application polls the driver with [`Game::tick`] and feeds
//! human or remote moves in through [`Game::submit_move`]; nothing here blocks.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{ChessError, Result};
use crate::game_state::GameState;
use crate::moves::Move;
use crate::snapshot::BoardSnapshot;
use crate::types::*;
use crate::Engine;

/// Game-over signal exchanged with the transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOver {
    #[serde(rename = "w")]
    WhiteWins,
    #[serde(rename = "b")]
    BlackWins,
    #[serde(rename = "d")]
    Draw,
    #[serde(rename = "")]
    NotOver,
}

impl GameOver {
    /// Wire code: `"w"`, `"b"`, `"d"`, or `""` while the game runs.
    pub fn code(self) -> &'static str {
        match self {
            GameOver::WhiteWins => "w",
            GameOver::BlackWins => "b",
            GameOver::Draw => "d",
            GameOver::NotOver => "",
        }
    }

    pub fn is_over(self) -> bool {
        self != GameOver::NotOver
    }

    pub fn winner(self) -> Option<Colour> {
        match self {
            GameOver::WhiteWins => Some(Colour::White),
            GameOver::BlackWins => Some(Colour::Black),
            GameOver::Draw | GameOver::NotOver => None,
        }
    }

    fn win_for(colour: Colour) -> Self {
        match colour {
            Colour::White => GameOver::WhiteWins,
            Colour::Black => GameOver::BlackWins,
        }
    }
}

impl GameState {
    /// Checkmate of the side to move, stalemate, the fifty-move rule, or
    /// insufficient material.
    pub fn game_over(&self) -> GameOver {
        let side = self.side_to_move();
        if self.get_legal_moves(side).is_empty() {
            return if self.check(side) {
                GameOver::win_for(side.other())
            } else {
                GameOver::Draw
            };
        }
        if self.is_fifty_move_draw() || self.is_insufficient_material() {
            return GameOver::Draw;
        }
        GameOver::NotOver
    }
}

/// Something that chooses moves for one colour.
pub trait Player: Send {
    /// The move to play for `colour`, or `None` when no move is available yet
    /// (a human who has not answered, an engine with no legal move).
    fn next_move(&mut self, colour: Colour, state: &GameState) -> Option<Move>;

    fn name(&self) -> &str;

    /// Hands the player a move string from outside. Returns `false` for
    /// players that choose their own moves.
    fn queue(&mut self, _text: String) -> bool {
        false
    }

    fn new_game(&mut self) {}
}

/// Plays whatever the wrapped engine finds at a fixed depth.
pub struct EnginePlayer<E: Engine> {
    engine: E,
    depth: u8,
}

impl<E: Engine> EnginePlayer<E> {
    pub fn new(engine: E, depth: u8) -> Self {
        Self { engine, depth }
    }

    pub fn from_config(engine: E, config: &EngineConfig) -> Self {
        Self::new(engine, config.depth)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: Engine> Player for EnginePlayer<E> {
    fn next_move(&mut self, _colour: Colour, state: &GameState) -> Option<Move> {
        let result = self.engine.search(state, self.depth);
        debug!(
            engine = self.engine.name(),
            best = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            "engine move"
        );
        result.best_move
    }

    fn name(&self) -> &str {
        self.engine.name()
    }

    fn new_game(&mut self) {
        self.engine.new_game();
    }
}

/// A player fed with move strings from outside (keyboard, network).
/// Strings that do not resolve to a legal move are dropped with a warning.
#[derive(Debug, Default)]
pub struct QueuedPlayer {
    name: String,
    pending: VecDeque<String>,
}

impl QueuedPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.pending.push_back(text.into());
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Player for QueuedPlayer {
    fn next_move(&mut self, colour: Colour, state: &GameState) -> Option<Move> {
        while let Some(text) = self.pending.pop_front() {
            match Move::from_algebraic_notation(state, colour, &text) {
                Some(mv) => return Some(mv),
                None => warn!(player = %self.name, %text, "rejected move"),
            }
        }
        None
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn queue(&mut self, text: String) -> bool {
        self.pending.push_back(text);
        true
    }

    fn new_game(&mut self) {
        self.pending.clear();
    }
}

/// What one call to [`Game::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Moved(Move),
    /// The side to move has no move ready.
    Waiting,
    Over(GameOver),
}

pub struct Game {
    state: GameState,
    white: Box<dyn Player>,
    black: Box<dyn Player>,
}

impl Game {
    pub fn new(white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        Self::with_state(white, black, GameState::startpos())
    }

    pub fn from_fen(white: Box<dyn Player>, black: Box<dyn Player>, fen: &str) -> Result<Self> {
        Ok(Self::with_state(white, black, GameState::from_fen(fen)?))
    }

    fn with_state(white: Box<dyn Player>, black: Box<dyn Player>, state: GameState) -> Self {
        Self { state, white, black }
    }

    /// Back to the starting position. Both players are told a new game began,
    /// which drops anything still queued.
    pub fn restart(&mut self) {
        self.state = GameState::startpos();
        self.white.new_game();
        self.black.new_game();
    }

    fn player_mut(&mut self, colour: Colour) -> &mut dyn Player {
        match colour {
            Colour::White => self.white.as_mut(),
            Colour::Black => self.black.as_mut(),
        }
    }

    /// Queues a move string for `colour`'s player, to be played on a later
    /// [`Game::tick`]. Fails for players that do not take moves from outside.
    pub fn queue_move(&mut self, colour: Colour, text: impl Into<String>) -> Result<()> {
        let player = self.player_mut(colour);
        if player.queue(text.into()) {
            Ok(())
        } else {
            Err(ChessError::NotQueued(colour))
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_to_play(&self) -> Colour {
        self.state.side_to_move()
    }

    pub fn game_over(&self) -> GameOver {
        self.state.game_over()
    }

    /// Asks the side to move for a move and plays it. A finished game is
    /// reported instead of consulting the player.
    pub fn tick(&mut self) -> Result<Tick> {
        let over = self.state.game_over();
        if over.is_over() {
            return Ok(Tick::Over(over));
        }
        let colour = self.state.side_to_move();
        let player = match colour {
            Colour::White => self.white.as_mut(),
            Colour::Black => self.black.as_mut(),
        };
        let Some(mv) = player.next_move(colour, &self.state) else {
            return Ok(Tick::Waiting);
        };
        self.state.make_move(mv, true)?;
        Ok(Tick::Moved(mv))
    }

    /// Plays a move string on behalf of `colour`, which must be the side to move.
    pub fn submit_move(&mut self, colour: Colour, text: &str) -> Result<Move> {
        let over = self.state.game_over();
        if over.is_over() {
            return Err(ChessError::GameOver(over.code()));
        }
        if colour != self.state.side_to_move() {
            return Err(ChessError::NotYourTurn(colour));
        }
        let mv = Move::from_algebraic_notation(&self.state, colour, text)
            .ok_or_else(|| ChessError::InvalidNotation(text.to_string()))?;
        self.state.make_move(mv, true)?;
        Ok(mv)
    }

    /// Takes back the last move.
    pub fn undo(&mut self) -> Result<Move> {
        self.state.undo_move()
    }

    pub fn one_colour_board(&self, colour: Colour) -> BoardSnapshot {
        self.state.board().snapshot(colour)
    }

    /// Legal moves of the side to move, in notation.
    pub fn legal_moves_notation(&self) -> Vec<String> {
        self.state
            .get_legal_moves(self.state.side_to_move())
            .iter()
            .map(Move::to_algebraic_notation)
            .collect()
    }

    /// Moves played so far, in notation, oldest first.
    pub fn previous_moves(&self) -> Vec<String> {
        self.state.history().map(|mv| mv.to_algebraic_notation()).collect()
    }

    /// Squares the piece on `pos` can legally reach.
    pub fn piece_destinations(&self, pos: Position) -> Vec<Position> {
        let mut out: Vec<Position> = self.state.piece_moves(pos).iter().map(Move::to).collect();
        out.dedup();
        out
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
