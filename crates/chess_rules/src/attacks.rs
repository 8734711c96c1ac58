//! Attack detection.
//!
//! A square is attacked by a colour when one of that colour's pieces could
//! move (pseudo-legally) onto it. The scan works backwards from the target
//! square rather than generating the attacker's moves. Castling never attacks.

use crate::board::Board;
use crate::types::*;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

impl Board {
    fn holds(&self, pos: Position, colour: Colour, kinds: &[PieceKind]) -> bool {
        self.piece_at(pos)
            .is_some_and(|pc| pc.colour == colour && kinds.contains(&pc.kind))
    }

    pub fn is_square_attacked(&self, target: Position, by: Colour) -> bool {
        // A pawn of `by` attacks diagonally forward, so look one rank behind.
        for df in [-1, 1] {
            if let Some(from) = target.offset(df, -by.forward())
                && self.holds(from, by, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT_OFFSETS {
            if let Some(from) = target.offset(df, dr)
                && self.holds(from, by, &[PieceKind::Knight])
            {
                return true;
            }
        }

        for (df, dr) in ALL_DIRECTIONS {
            if let Some(from) = target.offset(df, dr)
                && self.holds(from, by, &[PieceKind::King])
            {
                return true;
            }
        }

        self.ray_hits(target, by, &DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
            || self.ray_hits(target, by, &ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
    }

    /// Walks each direction from `target` to the first occupied square and
    /// reports whether it holds one of `kinds` of colour `by`.
    fn ray_hits(&self, target: Position, by: Colour, dirs: &[(i8, i8)], kinds: &[PieceKind]) -> bool {
        for &(df, dr) in dirs {
            let mut cursor = target.offset(df, dr);
            while let Some(pos) = cursor {
                if !self.square_is_empty(pos) {
                    if self.holds(pos, by, kinds) {
                        return true;
                    }
                    break;
                }
                cursor = pos.offset(df, dr);
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
