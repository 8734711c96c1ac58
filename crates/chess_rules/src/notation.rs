//! Move strings exchanged with the presentation and transport layers.
//!
//! The dialect is a simplified algebraic notation:
//!
//! * normal moves are written `<Letter><from><to>`, e.g. `Pe2e4`, `Ng1f3`;
//!   on input the letter may be omitted for pawns and the source square may
//!   be shortened to a file, a rank, or dropped when unambiguous (`e4`, `Nf3`,
//!   `Rad7`);
//! * castling is `O-O` / `O-O-O`;
//! * promotion is `<square>=<Letter>`, optionally prefixed by the pawn's file
//!   (`e8=Q`, `dxe8=N`).
//!
//! `+`, `#` and `x` are accepted on input and ignored.

use std::fmt;

use crate::game_state::GameState;
use crate::moves::{CastleSide, Move};
use crate::types::*;

impl Move {
    pub fn to_algebraic_notation(&self) -> String {
        match *self {
            Move::Normal { from, to, piece } => format!("{}{from}{to}", piece.letter()),
            Move::Castling { side, .. } => side.notation().to_string(),
            Move::Promotion {
                square, promote_to, ..
            } => format!("{square}={}", promote_to.letter()),
        }
    }

    /// Resolves `text` against the legal moves of `colour` in `state`.
    ///
    /// Returns `None` for malformed strings, strings matching no legal move,
    /// and strings matching several legal moves.
    pub fn from_algebraic_notation(state: &GameState, colour: Colour, text: &str) -> Option<Move> {
        from_algebraic_notation(state, colour, text)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic_notation())
    }
}

/// Optional source-square hint: any combination of file and rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Disambiguation {
    file: Option<i8>,
    rank: Option<i8>,
}

impl Disambiguation {
    fn parse(text: &str) -> Option<Self> {
        let mut hint = Disambiguation::default();
        for c in text.chars() {
            if let Some(f) = Position::file_from_char(c)
                && hint.file.is_none()
                && hint.rank.is_none()
            {
                hint.file = Some(f);
            } else if let Some(r) = Position::rank_from_char(c)
                && hint.rank.is_none()
            {
                hint.rank = Some(r);
            } else {
                return None;
            }
        }
        Some(hint)
    }

    fn matches(self, from: Position) -> bool {
        self.file.is_none_or(|f| f == from.file) && self.rank.is_none_or(|r| r == from.rank)
    }
}

pub fn from_algebraic_notation(state: &GameState, colour: Colour, text: &str) -> Option<Move> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '+' | '#' | 'x'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let castle_side = match cleaned.as_str() {
        "O-O" | "0-0" => Some(CastleSide::King),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queen),
        _ => None,
    };
    if let Some(wanted) = castle_side {
        return unique(
            state
                .get_legal_moves(colour)
                .into_iter()
                .filter(|mv| matches!(mv, Move::Castling { side, .. } if *side == wanted)),
        );
    }

    if let Some((left, right)) = cleaned.split_once('=') {
        let mut letters = right.chars();
        let target = letters.next().and_then(PieceKind::from_letter)?;
        if letters.next().is_some() {
            return None;
        }
        let left = left.strip_prefix('P').unwrap_or(left);
        let (hint, square) = split_destination(left)?;
        return resolve_promotion(state, colour, hint, square, target);
    }

    // No piece letter means a pawn is moving.
    let first = cleaned.chars().next()?;
    let (kind, body) = if first.is_ascii_uppercase() {
        (PieceKind::from_letter(first)?, &cleaned[1..])
    } else {
        (PieceKind::Pawn, cleaned.as_str())
    };
    let (hint, to) = split_destination(body)?;

    let found = unique(state.get_legal_moves(colour).into_iter().filter(|mv| {
        matches!(*mv, Move::Normal { from, to: dest, piece } if piece == kind && dest == to && hint.matches(from))
    }));
    if found.is_none() && kind == PieceKind::Pawn && to.rank == colour.promotion_rank() {
        // A pawn reaching the last rank without `=` promotes to a queen.
        return resolve_promotion(state, colour, hint, to, PieceKind::Queen);
    }
    found
}

/// Splits `<hint><square>` into its parts; the square is the last two chars.
fn split_destination(text: &str) -> Option<(Disambiguation, Position)> {
    if !text.is_ascii() || text.len() < 2 {
        return None;
    }
    let (hint, square) = text.split_at(text.len() - 2);
    Some((Disambiguation::parse(hint)?, Position::from_coord(square)?))
}

fn resolve_promotion(
    state: &GameState,
    colour: Colour,
    hint: Disambiguation,
    square: Position,
    target: PieceKind,
) -> Option<Move> {
    unique(state.get_legal_moves(colour).into_iter().filter(|mv| {
        matches!(*mv, Move::Promotion { from, square: sq, promote_to } if sq == square && promote_to == target && hint.matches(from))
    }))
}

/// The only element of `moves`, or `None` if there are zero or several.
fn unique(mut moves: impl Iterator<Item = Move>) -> Option<Move> {
    let first = moves.next()?;
    moves.next().is_none().then_some(first)
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
