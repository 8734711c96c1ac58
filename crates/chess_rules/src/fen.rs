//! Forsyth-Edwards Notation.
//!
//! Only the board field is required; side to move defaults to White and the
//! remaining fields to "no rights, no target, 0, 1". The engine tracks
//! castling eligibility through move-counts, so the castling field is mapped
//! onto the kings and corner rooks: a piece without a matching right is loaded
//! as already moved. Without a castling field every piece loads unmoved.

use crate::error::{ChessError, Result};
use crate::game_state::GameState;
use crate::moves::CastleSide;
use crate::types::*;

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}

impl GameState {
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut fields = fen.split_whitespace();
        let board_part = fields.next().ok_or_else(|| invalid("empty string"))?;
        let stm_part = fields.next();
        let castle_part = fields.next();
        let ep_part = fields.next();
        let halfmove_part = fields.next();
        let fullmove_part = fields.next();
        if fields.next().is_some() {
            return Err(invalid("more than six fields"));
        }

        let mut state = GameState::empty();

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
        }
        for (rank, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if !(1..=8).contains(&d) {
                        return Err(invalid(format!("bad empty-square count {ch:?}")));
                    }
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_letter(ch)
                        .ok_or_else(|| invalid(format!("bad piece letter {ch:?}")))?;
                    let colour = if ch.is_ascii_uppercase() {
                        Colour::White
                    } else {
                        Colour::Black
                    };
                    if file >= 8 {
                        return Err(invalid(format!("rank {} has more than 8 files", 8 - rank)));
                    }
                    state.place(Position::new(file, rank as i8), kind, colour);
                    file += 1;
                }
                if file > 8 {
                    return Err(invalid(format!("rank {} has more than 8 files", 8 - rank)));
                }
            }
            if file != 8 {
                return Err(invalid(format!("rank {} has only {file} files", 8 - rank)));
            }
        }

        state.side_to_move = match stm_part {
            None | Some("w") | Some("W") => Colour::White,
            Some("b") | Some("B") => Colour::Black,
            Some(other) => return Err(invalid(format!("bad side to move {other:?}"))),
        };

        if let Some(castling) = castle_part {
            apply_castling_field(&mut state, castling)?;
        }

        state.en_passant = match ep_part {
            None | Some("-") => None,
            Some(coord) => {
                let target = Position::from_coord(coord)
                    .ok_or_else(|| invalid(format!("bad en-passant square {coord:?}")))?;
                // Behind a pawn the opponent just double-stepped.
                let mover = state.side_to_move.other();
                if target.rank != mover.pawn_rank() + mover.forward() {
                    return Err(invalid(format!("en-passant square {coord:?} off the skipped rank")));
                }
                Some(target)
            }
        };

        state.halfmove_clock = parse_counter(halfmove_part, 0, "half-move clock")?;
        state.fullmove_number = parse_counter(fullmove_part, 1, "full-move number")?;
        Ok(state)
    }

    /// Replaces this state with the position described by `fen`. On error the
    /// state is unchanged.
    pub fn load_fen(&mut self, fen: &str) -> Result<()> {
        *self = Self::from_fen(fen)?;
        Ok(())
    }

    /// Six-field FEN of the current position; the exact inverse of
    /// [`GameState::from_fen`] for positions reached through play.
    pub fn generate_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in 0..8 {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Position::new(file, rank)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }

        out.push(' ');
        out.push(self.side_to_move.letter());

        out.push(' ');
        let rights = self.castling_rights();
        if rights.is_empty() {
            out.push('-');
        } else {
            out.push_str(&rights);
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    /// Castling rights still available, in FEN order (`KQkq` subset).
    pub fn castling_rights(&self) -> String {
        let mut rights = String::new();
        for colour in Colour::ALL {
            for side in [CastleSide::King, CastleSide::Queen] {
                if self.has_castling_right(colour, side) {
                    let letter = match side {
                        CastleSide::King => 'K',
                        CastleSide::Queen => 'Q',
                    };
                    rights.push(match colour {
                        Colour::White => letter,
                        Colour::Black => letter.to_ascii_lowercase(),
                    });
                }
            }
        }
        rights
    }

    /// An unmoved king on its home square and an unmoved rook in that corner.
    /// Says nothing about whether castling is playable right now.
    fn has_castling_right(&self, colour: Colour, side: CastleSide) -> bool {
        let home = colour.home_rank();
        let king_ready = self
            .king_position(colour)
            .and_then(|pos| self.piece_at(pos))
            .is_some_and(|k| k.move_count == 0 && k.position == Some(Position::new(4, home)));
        king_ready
            && self
                .piece_at(Position::new(side.rook_file(), home))
                .is_some_and(|r| r.kind == PieceKind::Rook && r.colour == colour && r.move_count == 0)
    }
}

fn apply_castling_field(state: &mut GameState, field: &str) -> Result<()> {
    // [colour][side]
    let mut rights = [[false; 2]; 2];
    if field != "-" {
        for c in field.chars() {
            let (colour, side) = match c {
                'K' => (Colour::White, 0),
                'Q' => (Colour::White, 1),
                'k' => (Colour::Black, 0),
                'q' => (Colour::Black, 1),
                _ => return Err(invalid(format!("bad castling letter {c:?}"))),
            };
            rights[colour.idx()][side] = true;
        }
    }

    for pos in Position::all() {
        let Some(pc) = state.board.get_square_mut(pos).piece_mut() else {
            continue;
        };
        let home = pc.colour.home_rank();
        let colour_rights = rights[pc.colour.idx()];
        let unmoved = match pc.kind {
            PieceKind::King => pos == Position::new(4, home) && (colour_rights[0] || colour_rights[1]),
            PieceKind::Rook if pos.rank == home && pos.file == 7 => colour_rights[0],
            PieceKind::Rook if pos.rank == home && pos.file == 0 => colour_rights[1],
            PieceKind::Rook => false,
            _ => true,
        };
        if !unmoved {
            pc.move_count = 1;
        }
    }
    Ok(())
}

fn parse_counter(field: Option<&str>, default: u32, name: &str) -> Result<u32> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| invalid(format!("bad {name} {text:?}"))),
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
