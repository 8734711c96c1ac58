use crate::error::{ChessError, Result};
use crate::types::*;

/// One square of the board. Its position never changes; only the piece on it
/// does, and it holds at most one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Square {
    position: Position,
    piece: Option<Piece>,
}

impl Square {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            piece: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Takes the piece off the square, clearing its stored position.
    pub fn pop_piece(&mut self) -> Option<Piece> {
        let mut piece = self.piece.take()?;
        piece.position = None;
        Some(piece)
    }

    /// Puts `piece` on the square. Refuses to overwrite: callers pop the
    /// current occupant first.
    pub fn set_piece(&mut self, mut piece: Piece) -> Result<()> {
        if self.piece.is_some() {
            return Err(ChessError::SquareOccupied(self.position));
        }
        piece.position = Some(self.position);
        self.piece = Some(piece);
        Ok(())
    }

    pub(crate) fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    /// Setup-only placement that replaces whatever stood on the square.
    pub(crate) fn put(&mut self, mut piece: Piece) {
        piece.position = Some(self.position);
        self.piece = Some(piece);
    }
}

/// The 64 squares in row-major order, index `rank * 8 + file`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Square; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: std::array::from_fn(|i| Square::new(Position::from_index(i))),
        }
    }

    pub fn square_exists(pos: Position) -> bool {
        pos.is_valid()
    }

    pub fn square_is_empty(&self, pos: Position) -> bool {
        self.get_square(pos).is_empty()
    }

    /// The square at `pos`. Callers validate with [`Board::square_exists`] first;
    /// an off-board position panics.
    pub fn get_square(&self, pos: Position) -> &Square {
        &self.squares[pos.index()]
    }

    pub fn get_square_mut(&mut self, pos: Position) -> &mut Square {
        &mut self.squares[pos.index()]
    }

    pub fn squares(&self) -> &[Square; 64] {
        &self.squares
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.get_square(pos).piece()
    }

    pub fn pop_piece(&mut self, pos: Position) -> Option<Piece> {
        self.get_square_mut(pos).pop_piece()
    }

    pub fn set_piece(&mut self, pos: Position, piece: Piece) -> Result<()> {
        self.get_square_mut(pos).set_piece(piece)
    }

    /// All pieces in storage order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().filter_map(Square::piece)
    }

    pub fn pieces_of(&self, colour: Colour) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |pc| pc.colour == colour)
    }

    pub fn king_position(&self, colour: Colour) -> Option<Position> {
        self.pieces_of(colour)
            .find(|pc| pc.kind == PieceKind::King)
            .and_then(|pc| pc.position)
    }

    /// Text diagram, rank 8 first, `.` for empty squares.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(72);
        for (i, square) in self.squares.iter().enumerate() {
            if i > 0 && i % 8 == 0 {
                out.push('\n');
            }
            out.push(square.piece().map_or('.', Piece::letter));
        }
        out
    }
}
