use tracing::debug;

use crate::board::{Board, Square};
use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveRecord};
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A game in progress: the board, the moves played so far and whose turn it is.
///
/// Cloning produces a fully independent copy (board, pieces and history), so
/// hypothetical lines can be explored on a clone without touching the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Colour,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) captured: Vec<Piece>,
    /// Square passed over by a pawn double step on the previous ply.
    pub(crate) en_passant: Option<Position>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) next_serial: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::startpos()
    }
}

impl GameState {
    /// Empty board, White to move.
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Colour::White,
            history: Vec::new(),
            captured: Vec::new(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            next_serial: 0,
        }
    }

    pub fn startpos() -> Self {
        let mut state = Self::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for colour in [Colour::Black, Colour::White] {
            for (f, &kind) in back.iter().enumerate() {
                state.place(Position::new(f as i8, colour.home_rank()), kind, colour);
            }
            for f in 0..8 {
                state.place(Position::new(f, colour.pawn_rank()), PieceKind::Pawn, colour);
            }
        }
        state
    }

    /// Puts a fresh piece on `pos` during setup, handing out the next serial
    /// number.
    pub(crate) fn place(&mut self, pos: Position, kind: PieceKind, colour: Colour) {
        let piece = Piece::new(kind, colour, self.next_serial);
        self.next_serial += 1;
        self.board.get_square_mut(pos).put(piece)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    pub fn square_exists(&self, pos: Position) -> bool {
        Board::square_exists(pos)
    }

    pub fn square_is_empty(&self, pos: Position) -> bool {
        self.board.square_is_empty(pos)
    }

    pub fn get_square(&self, pos: Position) -> &Square {
        self.board.get_square(pos)
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.board.piece_at(pos)
    }

    pub fn king_position(&self, colour: Colour) -> Option<Position> {
        self.board.king_position(colour)
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> impl DoubleEndedIterator<Item = Move> + '_ {
        self.history.iter().map(MoveRecord::mv)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(MoveRecord::mv)
    }

    /// Number of half-moves played on this state.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Pieces captured so far, in capture order.
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    pub fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    // =========================================================================
    // Check, checkmate, stalemate
    // =========================================================================

    /// Whether `colour`'s king is attacked. A board without that king counts
    /// as check.
    pub fn check(&self, colour: Colour) -> bool {
        match self.king_position(colour) {
            Some(king) => self.board.is_square_attacked(king, colour.other()),
            None => true,
        }
    }

    pub fn checkmate(&self, colour: Colour) -> bool {
        self.check(colour) && self.get_legal_moves(colour).is_empty()
    }

    /// The side to move has no legal move and is not in check.
    pub fn stalemate(&self) -> bool {
        let side = self.side_to_move;
        !self.check(side) && self.get_legal_moves(side).is_empty()
    }

    /// Fifty-move rule: 100 half-moves without a pawn move or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// only bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_shades = [false; 2];
        for pc in self.board.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => minors += 1,
                PieceKind::Bishop => {
                    minors += 1;
                    if let Some(pos) = pc.position {
                        bishop_shades[usize::from(pos.is_light())] = true;
                    }
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        let only_bishops = self.board.pieces().all(|pc| pc.kind != PieceKind::Knight);
        minors <= 1 || (only_bishops && !(bishop_shades[0] && bishop_shades[1]))
    }

    // =========================================================================
    // Move generation
    // =========================================================================

    /// Every legal move of `colour`, piece by piece in board order.
    pub fn get_legal_moves(&self, colour: Colour) -> Vec<Move> {
        let pseudo = self.get_pseudolegal_moves(colour);
        self.retain_legal(colour, pseudo)
    }

    /// Moves that are geometrically possible for `colour`, ignoring whether
    /// they leave its own king in check.
    pub fn get_pseudolegal_moves(&self, colour: Colour) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        for pc in self.board.pieces_of(colour) {
            pc.pseudolegal_moves_into(self, &mut out);
        }
        out
    }

    /// Legal moves of the piece standing on `pos` (empty for an empty square).
    pub fn piece_moves(&self, pos: Position) -> Vec<Move> {
        if !pos.is_valid() {
            return Vec::new();
        }
        self.piece_at(pos).map(|pc| pc.legal_moves(self)).unwrap_or_default()
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        mv.from().is_valid()
            && self
                .piece_at(mv.from())
                .is_some_and(|pc| pc.colour == self.side_to_move && pc.legal_moves(self).contains(mv))
    }

    /// Keeps the moves after which `colour`'s king is not in check.
    ///
    /// Each candidate is played on one scratch copy of the state, tested and
    /// taken back, so the original is never touched.
    pub(crate) fn retain_legal(&self, colour: Colour, mut moves: Vec<Move>) -> Vec<Move> {
        let mut scratch = self.clone();
        moves.retain(|&mv| {
            let Ok(record) = mv.apply(&mut scratch) else {
                return false;
            };
            let safe = !scratch.check(colour);
            if record.undo(&mut scratch).is_err() {
                scratch = self.clone();
            }
            safe
        });
        moves
    }

    // =========================================================================
    // Making and taking back moves
    // =========================================================================

    /// Plays `mv` for the side to move.
    ///
    /// With `check_legality` the move is first checked against the current
    /// legal moves, which catches moves generated from an outdated state.
    /// On error nothing has changed.
    pub fn make_move(&mut self, mv: Move, check_legality: bool) -> Result<()> {
        if check_legality && !self.is_legal(&mv) {
            return Err(ChessError::InvalidMove {
                from: mv.from(),
                to: mv.to(),
            });
        }
        let record = mv.apply(self)?;
        self.history.push(record);
        if self.side_to_move == Colour::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        debug!(?mv, ply = self.history.len(), "move applied");
        Ok(())
    }

    /// Takes back the last move played and returns it.
    pub fn undo_move(&mut self) -> Result<Move> {
        let record = self.history.pop().ok_or(ChessError::NothingToUndo)?;
        let mv = record.undo(self)?;
        self.side_to_move = self.side_to_move.other();
        if self.side_to_move == Colour::Black {
            self.fullmove_number -= 1;
        }
        debug!(?mv, ply = self.history.len(), "move undone");
        Ok(mv)
    }

    /// Takes back `mv`, which must be the last move played on this state.
    pub fn undo_exact(&mut self, mv: &Move) -> Result<()> {
        if self.last_move().as_ref() != Some(mv) {
            return Err(ChessError::UndoOutOfOrder {
                from: mv.from(),
                to: mv.to(),
            });
        }
        self.undo_move().map(|_| ())
    }
}

#[cfg(test)]
#[path = "game_state_tests.rs"]
mod game_state_tests;
