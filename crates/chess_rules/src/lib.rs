pub mod attacks;
pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod game;
pub mod game_state;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod perft;
pub mod snapshot;
pub mod types;

// Re-export the rules core (not engine-specific)
pub use board::{Board, Square};
pub use config::{DEFAULT_DEPTH, EngineConfig};
pub use error::{ChessError, Result};
pub use game::{EnginePlayer, Game, GameOver, Player, QueuedPlayer, Tick};
pub use game_state::{GameState, START_FEN};
pub use moves::{CastleSide, Move, MoveRecord};
pub use perft::perft;
pub use snapshot::{BoardSnapshot, SnapshotPiece};
pub use types::*;

// =============================================================================
// Engine trait: implemented by every move-choosing engine
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation in centipawns from White's point of view
    pub score: i32,
    /// Search depth in plies
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

/// Trait that all chess engines must implement.
///
/// Engines receive a shared reference and must leave the caller's state
/// untouched; lookahead happens on clones.
pub trait Engine: Send {
    /// Searches `state` for the side to move, `depth` plies deep.
    fn search(&mut self, state: &GameState, depth: u8) -> SearchResult;

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
