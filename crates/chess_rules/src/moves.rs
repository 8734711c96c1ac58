//! Move representation and the per-variant apply/undo logic.
//!
//! A [`Move`] is plain data: it never refers to the state it was generated
//! from, so the same value can be played on any clone of that state. Applying
//! a move returns a [`MoveRecord`] holding everything needed to reverse it.

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, Result};
use crate::game_state::GameState;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    #[serde(rename = "k")]
    King,
    #[serde(rename = "q")]
    Queen,
}

impl CastleSide {
    /// File step from the king towards the rook.
    pub fn direction(self) -> i8 {
        match self {
            CastleSide::King => 1,
            CastleSide::Queen => -1,
        }
    }
    pub fn rook_file(self) -> i8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }
    pub fn notation(self) -> &'static str {
        match self {
            CastleSide::King => "O-O",
            CastleSide::Queen => "O-O-O",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    /// Any relocation of one piece, including captures and en-passant.
    Normal {
        from: Position,
        to: Position,
        piece: PieceKind,
    },
    /// King moves two squares towards the rook; the rook lands on the square
    /// the king passed over. Rook squares are fixed at construction.
    Castling {
        king: Position,
        side: CastleSide,
        rook_from: Position,
        rook_to: Position,
    },
    /// A pawn becomes `promote_to` on `square`. When `from == square` the pawn
    /// already stands on its last rank and is converted in place.
    Promotion {
        from: Position,
        square: Position,
        promote_to: PieceKind,
    },
}

impl Move {
    pub fn normal(from: Position, to: Position, piece: PieceKind) -> Self {
        Move::Normal { from, to, piece }
    }

    /// Castling for `colour`: the king stands on the e-file of its home rank
    /// and the rook in that rank's corner.
    pub fn castling(colour: Colour, side: CastleSide) -> Self {
        let home = colour.home_rank();
        let king = Position::new(4, home);
        Move::Castling {
            king,
            side,
            rook_from: Position::new(side.rook_file(), home),
            rook_to: Position::new(king.file + side.direction(), home),
        }
    }

    pub fn promotion(from: Position, square: Position, promote_to: PieceKind) -> Self {
        Move::Promotion {
            from,
            square,
            promote_to,
        }
    }

    /// Square the moving piece leaves (the king's, for castling).
    pub fn from(&self) -> Position {
        match *self {
            Move::Normal { from, .. } | Move::Promotion { from, .. } => from,
            Move::Castling { king, .. } => king,
        }
    }

    /// Square the moving piece ends on (the king's, for castling).
    pub fn to(&self) -> Position {
        match *self {
            Move::Normal { to, .. } => to,
            Move::Castling { king, side, .. } => Position::new(king.file + 2 * side.direction(), king.rank),
            Move::Promotion { square, .. } => square,
        }
    }

    pub fn is_castling(&self) -> bool {
        matches!(self, Move::Castling { .. })
    }

    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Promotion { .. })
    }

    fn invalid(&self) -> ChessError {
        ChessError::InvalidMove {
            from: self.from(),
            to: self.to(),
        }
    }

    /// Applies the board effect of the move to `state`: piece placement,
    /// captured-piece bookkeeping, en-passant target and half-move clock.
    /// History and side to move are the caller's business.
    ///
    /// Everything that could fail is checked before the first mutation, so an
    /// error leaves `state` exactly as it was.
    pub(crate) fn apply(&self, state: &mut GameState) -> Result<MoveRecord> {
        let prior_en_passant = state.en_passant;
        let prior_halfmove = state.halfmove_clock;

        let record = match *self {
            Move::Normal { from, to, piece } => {
                let capture_sq = self.capture_square(state, from, to, piece)?;
                let mut mover = state.board.pop_piece(from).ok_or_else(|| self.invalid())?;
                let captured = capture_sq.and_then(|sq| state.board.pop_piece(sq).map(|pc| (sq, pc)));
                let before = mover.clone();
                mover.move_count += 1;
                state.board.set_piece(to, mover)?;

                state.en_passant = (piece == PieceKind::Pawn && (to.rank - from.rank).abs() == 2)
                    .then(|| Position::new(from.file, (from.rank + to.rank) / 2));
                state.halfmove_clock = if piece == PieceKind::Pawn || captured.is_some() {
                    0
                } else {
                    state.halfmove_clock.saturating_add(1)
                };
                MoveRecord::new(*self, before, captured, None, prior_en_passant, prior_halfmove)
            }
            Move::Castling {
                king,
                side,
                rook_from,
                rook_to,
            } => {
                let king_to = self.to();
                let (Some(k), Some(r)) = (state.board.piece_at(king), state.board.piece_at(rook_from)) else {
                    return Err(self.invalid());
                };
                if k.kind != PieceKind::King
                    || r.kind != PieceKind::Rook
                    || k.colour != r.colour
                    || *self != Move::castling(k.colour, side)
                    || !king_to.is_valid()
                    || !rook_to.is_valid()
                    || !state.board.square_is_empty(king_to)
                    || !state.board.square_is_empty(rook_to)
                {
                    return Err(self.invalid());
                }

                let mut k = state.board.pop_piece(king).ok_or_else(|| self.invalid())?;
                let mut r = state.board.pop_piece(rook_from).ok_or_else(|| self.invalid())?;
                let (king_before, rook_before) = (k.clone(), r.clone());
                k.move_count += 1;
                r.move_count += 1;
                state.board.set_piece(king_to, k)?;
                state.board.set_piece(rook_to, r)?;

                state.en_passant = None;
                state.halfmove_clock = state.halfmove_clock.saturating_add(1);
                MoveRecord::new(*self, king_before, None, Some(rook_before), prior_en_passant, prior_halfmove)
            }
            Move::Promotion {
                from,
                square,
                promote_to,
            } => {
                let pawn = state.board.piece_at(from).ok_or_else(|| self.invalid())?;
                let colour = pawn.colour;
                if pawn.kind != PieceKind::Pawn
                    || matches!(promote_to, PieceKind::Pawn | PieceKind::King)
                    || !square.is_valid()
                    || square.rank != colour.promotion_rank()
                {
                    return Err(self.invalid());
                }
                let captures = from != square && !state.board.square_is_empty(square);
                if captures && state.board.piece_at(square).is_some_and(|pc| pc.colour == colour) {
                    return Err(self.invalid());
                }

                let pawn = state.board.pop_piece(from).ok_or_else(|| self.invalid())?;
                let captured = if captures {
                    state.board.pop_piece(square).map(|pc| (square, pc))
                } else {
                    None
                };
                let relocated = u32::from(from != square);
                let promoted = Piece {
                    kind: promote_to,
                    colour,
                    position: None,
                    move_count: pawn.move_count + relocated,
                    serial: pawn.serial,
                };
                state.board.set_piece(square, promoted)?;

                state.en_passant = None;
                state.halfmove_clock = 0;
                MoveRecord::new(*self, pawn, captured, None, prior_en_passant, prior_halfmove)
            }
        };

        if let Some((_, pc)) = &record.captured {
            state.captured.push(pc.clone());
        }
        Ok(record)
    }

    /// Validates a normal move against the board and returns the square of the
    /// piece it captures, if any. A pawn moving diagonally onto the empty
    /// en-passant target captures the pawn beside it.
    fn capture_square(&self, state: &GameState, from: Position, to: Position, piece: PieceKind) -> Result<Option<Position>> {
        if !from.is_valid() || !to.is_valid() || from == to {
            return Err(self.invalid());
        }
        let mover = state.board.piece_at(from).ok_or_else(|| self.invalid())?;
        if mover.kind != piece {
            return Err(self.invalid());
        }
        match state.board.piece_at(to) {
            Some(target) if target.colour == mover.colour => Err(self.invalid()),
            Some(_) => Ok(Some(to)),
            None if piece == PieceKind::Pawn && from.file != to.file => {
                let beside = Position::new(to.file, from.rank);
                let is_ep = state.en_passant == Some(to)
                    && state
                        .board
                        .piece_at(beside)
                        .is_some_and(|pc| pc.kind == PieceKind::Pawn && pc.colour != mover.colour);
                if is_ep { Ok(Some(beside)) } else { Err(self.invalid()) }
            }
            None => Ok(None),
        }
    }
}

/// Undo information for one applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    mv: Move,
    /// The moving piece (the king, for castling) as it was before the move.
    mover: Piece,
    /// Captured piece and the square it was taken from.
    captured: Option<(Position, Piece)>,
    /// The castling rook as it was before the move.
    rook: Option<Piece>,
    en_passant: Option<Position>,
    halfmove_clock: u32,
}

impl MoveRecord {
    fn new(
        mv: Move,
        mover: Piece,
        captured: Option<(Position, Piece)>,
        rook: Option<Piece>,
        en_passant: Option<Position>,
        halfmove_clock: u32,
    ) -> Self {
        Self {
            mv,
            mover,
            captured,
            rook,
            en_passant,
            halfmove_clock,
        }
    }

    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Reverses [`Move::apply`]. Pieces go back exactly as they were,
    /// move-counts included.
    pub(crate) fn undo(self, state: &mut GameState) -> Result<Move> {
        let mv = self.mv;
        match mv {
            Move::Normal { from, to, .. } | Move::Promotion { from, square: to, .. } => {
                state.board.pop_piece(to);
                state.board.set_piece(from, self.mover)?;
            }
            Move::Castling { king, rook_from, rook_to, .. } => {
                state.board.pop_piece(mv.to());
                state.board.pop_piece(rook_to);
                state.board.set_piece(king, self.mover)?;
                if let Some(rook) = self.rook {
                    state.board.set_piece(rook_from, rook)?;
                }
            }
        }
        if let Some((sq, piece)) = self.captured {
            state.captured.pop();
            state.board.set_piece(sq, piece)?;
        }
        state.en_passant = self.en_passant;
        state.halfmove_clock = self.halfmove_clock;
        Ok(mv)
    }
}
