//! Minimax search with alpha-beta pruning

use chess_rules::{Colour, GameState, Move, Result};
use tracing::trace;

use crate::eval::evaluate;

/// Score of a mate delivered at the root; mates further away score less.
pub const MATE: i32 = 100_000;

const INFINITY: i32 = MATE * 2;

/// Searches the position and returns the best move for the side to move with
/// its score (White's point of view).
///
/// White picks the highest score, Black the lowest; among equal scores the
/// first move generated wins. Returns `Ok(None)` when the side to move has no
/// legal move.
///
/// # Arguments
/// * `state` - The position to search; it is not modified
/// * `depth` - Search depth in plies (at least one)
/// * `nodes` - Counter for nodes searched (for statistics)
pub fn pick_best_move(state: &GameState, depth: u8, nodes: &mut u64) -> Result<Option<(Move, i32)>> {
    let side = state.side_to_move();
    let moves = state.get_legal_moves(side);
    if moves.is_empty() {
        return Ok(None);
    }

    let maximising = side == Colour::White;
    let mut tmp = state.clone();
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        tmp.make_move(mv, false)?;
        *nodes += 1;
        let score = minimax(&mut tmp, depth.max(1) - 1, alpha, beta, 1, nodes)?;
        tmp.undo_move()?;
        trace!(%mv, score, "root move");

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximising => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((mv, score));
            if maximising {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }
    }

    Ok(best)
}

/// Recursive minimax with alpha-beta pruning. `ply` counts half-moves from
/// the root so that nearer mates score higher.
fn minimax(state: &mut GameState, depth: u8, mut alpha: i32, mut beta: i32, ply: i32, nodes: &mut u64) -> Result<i32> {
    let side = state.side_to_move();
    let moves = state.get_legal_moves(side);

    if moves.is_empty() {
        if state.check(side) {
            // Checkmate
            return Ok(match side {
                Colour::White => -(MATE - ply),
                Colour::Black => MATE - ply,
            });
        }
        return Ok(0); // Stalemate
    }

    // Immediate draw conditions
    if state.is_fifty_move_draw() || state.is_insufficient_material() {
        return Ok(0);
    }

    if depth == 0 {
        return Ok(evaluate(state));
    }

    let maximising = side == Colour::White;
    let mut best = if maximising { -INFINITY } else { INFINITY };

    for mv in moves {
        state.make_move(mv, false)?;
        *nodes += 1;
        let score = minimax(state, depth - 1, alpha, beta, ply + 1, nodes);
        state.undo_move()?;
        let score = score?;

        if maximising {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break; // Cutoff
        }
    }

    Ok(best)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
