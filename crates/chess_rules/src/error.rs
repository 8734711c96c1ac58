//! Error types for the rules core.
//!
//! Every fallible operation returns [`Result`]. Notation parsing is the one
//! exception: an unreadable move string is a "no move" answer, not an error,
//! and the game driver turns it into [`ChessError::InvalidNotation`].

use thiserror::Error;

use crate::types::{Colour, Position};

/// Errors raised by the rules core.
#[derive(Error, Debug)]
pub enum ChessError {
    /// The move is not legal (or no longer legal) in this state.
    /// The state is left untouched.
    #[error("Invalid move: from {from} to {to}")]
    InvalidMove { from: Position, to: Position },

    /// `undo_move` was called on a state with an empty history.
    #[error("No move to undo")]
    NothingToUndo,

    /// The move handed to `undo_exact` is not the top of this state's history.
    #[error("Cannot undo move {from} to {to}: it is not the last move played")]
    UndoOutOfOrder { from: Position, to: Position },

    /// A piece was set on a square that already holds one.
    #[error("Square {0} is occupied: pop the piece before setting a new one")]
    SquareOccupied(Position),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    /// A submitted move string did not resolve to a legal move.
    #[error("Invalid move notation: {0:?}")]
    InvalidNotation(String),

    #[error("It is not {0}'s turn")]
    NotYourTurn(Colour),

    /// The player for this colour picks its own moves.
    #[error("The {0} player does not take queued moves")]
    NotQueued(Colour),

    #[error("Invalid colour: {0:?} (expected \"w\" or \"b\")")]
    InvalidColour(String),

    /// A move was requested from a finished game; carries the game-over code.
    #[error("Game is over ({0})")]
    GameOver(&'static str),

    #[error("Invalid engine configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias for rules-core operations
pub type Result<T> = std::result::Result<T, ChessError>;
