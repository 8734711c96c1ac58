//! Per-piece move generation.
//!
//! Each piece kind produces its pseudo-legal moves through one dispatch in
//! [`Piece::pseudolegal_moves_into`]; legality is layered on top by
//! [`GameState::retain_legal`].

use crate::attacks::{ALL_DIRECTIONS, DIAGONALS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::game_state::GameState;
use crate::moves::{CastleSide, Move};
use crate::types::*;

impl Piece {
    /// Moves that keep this piece's own king out of check.
    pub fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        state.retain_legal(self.colour, self.pseudolegal_moves(state))
    }

    pub fn pseudolegal_moves(&self, state: &GameState) -> Vec<Move> {
        let mut out = Vec::with_capacity(28);
        self.pseudolegal_moves_into(state, &mut out);
        out
    }

    /// Appends this piece's pseudo-legal moves to `out`. A piece that is not
    /// on the board has none.
    pub fn pseudolegal_moves_into(&self, state: &GameState, out: &mut Vec<Move>) {
        let Some(from) = self.position else {
            return;
        };
        match self.kind {
            PieceKind::Pawn => gen_pawn(state, from, self.colour, out),
            PieceKind::Knight => gen_slider(state, from, self.colour, PieceKind::Knight, &KNIGHT_OFFSETS, 1, out),
            PieceKind::Bishop => gen_slider(state, from, self.colour, PieceKind::Bishop, &DIAGONALS, 7, out),
            PieceKind::Rook => gen_slider(state, from, self.colour, PieceKind::Rook, &ORTHOGONALS, 7, out),
            PieceKind::Queen => gen_slider(state, from, self.colour, PieceKind::Queen, &ALL_DIRECTIONS, 7, out),
            PieceKind::King => {
                gen_slider(state, from, self.colour, PieceKind::King, &ALL_DIRECTIONS, 1, out);
                if self.move_count == 0 {
                    gen_castle(state, from, self.colour, out);
                }
            }
        }
    }
}

fn push_promotions(from: Position, square: Position, out: &mut Vec<Move>) {
    for kind in PieceKind::PROMOTIONS {
        out.push(Move::promotion(from, square, kind));
    }
}

fn gen_pawn(state: &GameState, from: Position, c: Colour, out: &mut Vec<Move>) {
    let board = state.board();
    let dir = c.forward();
    let promo_rank = c.promotion_rank();

    // A pawn standing on its last rank (possible after setup) converts in place.
    if from.rank == promo_rank {
        push_promotions(from, from, out);
        return;
    }

    // forward 1
    if let Some(to) = from.offset(0, dir)
        && board.square_is_empty(to)
    {
        if to.rank == promo_rank {
            push_promotions(from, to, out);
        } else {
            out.push(Move::normal(from, to, PieceKind::Pawn));
        }

        // forward 2 from start
        if from.rank == c.pawn_rank()
            && let Some(to2) = from.offset(0, 2 * dir)
            && board.square_is_empty(to2)
        {
            out.push(Move::normal(from, to2, PieceKind::Pawn));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.colour != c => {
                if to.rank == promo_rank {
                    push_promotions(from, to, out);
                } else {
                    out.push(Move::normal(from, to, PieceKind::Pawn));
                }
            }
            Some(_) => {}
            None => {
                // Only the pawn that double-stepped on the previous ply, which
                // now stands beside us, can be taken en-passant.
                let beside = Position::new(to.file, from.rank);
                if state.en_passant() == Some(to)
                    && board
                        .piece_at(beside)
                        .is_some_and(|pc| pc.kind == PieceKind::Pawn && pc.colour != c)
                {
                    out.push(Move::normal(from, to, PieceKind::Pawn));
                }
            }
        }
    }
}

/// Walks each direction up to `range` squares: stops at the edge, before a
/// friendly piece, and just after an enemy piece. Knights and kings are
/// range-1 walkers.
fn gen_slider(
    state: &GameState,
    from: Position,
    c: Colour,
    kind: PieceKind,
    dirs: &[(i8, i8)],
    range: u8,
    out: &mut Vec<Move>,
) {
    for &(df, dr) in dirs {
        let mut cursor = from.offset(df, dr);
        for _ in 0..range {
            let Some(to) = cursor else {
                break;
            };
            match state.piece_at(to) {
                None => out.push(Move::normal(from, to, kind)),
                Some(pc) if pc.colour != c => {
                    out.push(Move::normal(from, to, kind));
                    break;
                }
                _ => break,
            }
            cursor = to.offset(df, dr);
        }
    }
}

/// Castling candidates for an unmoved king on its home square: the rook of
/// that side is in its corner and unmoved, every square between them is empty,
/// and the king does not start on, pass over or land on an attacked square.
fn gen_castle(state: &GameState, king: Position, c: Colour, out: &mut Vec<Move>) {
    let board = state.board();
    let enemy = c.other();

    if king != Position::new(4, c.home_rank()) {
        return;
    }

    // Can't castle out of check.
    if board.is_square_attacked(king, enemy) {
        return;
    }

    for side in [CastleSide::King, CastleSide::Queen] {
        let dir = side.direction();
        let rook_from = Position::new(side.rook_file(), king.rank);
        let Some(king_to) = king.offset(2 * dir, 0) else {
            continue;
        };
        if king_to == rook_from {
            continue;
        }
        let rook_ready = board.piece_at(rook_from).is_some_and(|pc| {
            pc.kind == PieceKind::Rook && pc.colour == c && pc.move_count == 0
        });
        if !rook_ready {
            continue;
        }

        let (lo, hi) = if dir > 0 {
            (king.file + 1, rook_from.file)
        } else {
            (rook_from.file + 1, king.file)
        };
        let path_clear = (lo..hi).all(|f| board.square_is_empty(Position::new(f, king.rank)));
        if !path_clear {
            continue;
        }

        let transit_safe = [1, 2]
            .iter()
            .all(|&step| !board.is_square_attacked(Position::new(king.file + step * dir, king.rank), enemy));
        if transit_safe {
            out.push(Move::castling(c, side));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
