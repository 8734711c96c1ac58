use crate::error::Result;
use crate::game_state::GameState;

/// Pure perft node count.
/// Counts all legal move sequences of length `depth` from the current state.
/// The state is restored before returning.
pub fn perft(state: &mut GameState, depth: u8) -> Result<u64> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = state.get_legal_moves(state.side_to_move());
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        state.make_move(mv, false)?;
        nodes += perft(state, depth - 1)?;
        state.undo_move()?;
    }
    Ok(nodes)
}

/// Per-root-move breakdown of [`perft`], in move notation.
pub fn perft_divide(state: &mut GameState, depth: u8) -> Result<Vec<(String, u64)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in state.get_legal_moves(state.side_to_move()) {
        state.make_move(mv, false)?;
        let nodes = perft(state, depth - 1)?;
        state.undo_move()?;
        out.push((mv.to_algebraic_notation(), nodes));
    }
    Ok(out)
}
