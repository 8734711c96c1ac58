//! Minimax Chess Engine
//!
//! Fixed-depth alpha-beta minimax over material and piece-square tables.
//! White maximises, Black minimises; scores are always from White's side.

mod eval;
mod search;

use chess_rules::{Engine, EngineConfig, EnginePlayer, GameState, SearchResult};
use tracing::{debug, warn};

/// Chess engine using minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Minimax search with alpha-beta pruning
/// - Material plus piece-square evaluation
/// - Fifty-move rule and insufficient-material draws
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// A player driving this engine at the configured depth.
    pub fn player(config: &EngineConfig) -> EnginePlayer<Self> {
        EnginePlayer::from_config(Self::new(), config)
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, state: &GameState, depth: u8) -> SearchResult {
        self.nodes = 0;
        let best = match search::pick_best_move(state, depth, &mut self.nodes) {
            Ok(best) => best,
            Err(err) => {
                warn!(%err, "search aborted");
                None
            }
        };
        debug!(?best, depth, nodes = self.nodes, "search finished");

        SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, s)| s).unwrap_or(0),
            depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

// Re-export for direct use if needed
pub use eval::{evaluate, piece_square_value};
pub use search::{pick_best_move, MATE};
