use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Colour {
    pub const ALL: [Colour; 2] = [Colour::White, Colour::Black];

    pub fn other(self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Colour::White => 0,
            Colour::Black => 1,
        }
    }
    /// FEN side-to-move letter.
    pub fn letter(self) -> char {
        match self {
            Colour::White => 'w',
            Colour::Black => 'b',
        }
    }

    /// Rank delta of a pawn push. Rank 0 is the top row (rank 8), so White
    /// moves towards smaller ranks.
    pub fn forward(self) -> i8 {
        match self {
            Colour::White => -1,
            Colour::Black => 1,
        }
    }
    /// Rank the king and rooks start on.
    pub fn home_rank(self) -> i8 {
        match self {
            Colour::White => 7,
            Colour::Black => 0,
        }
    }
    /// Rank pawns start on (and double-step from).
    pub fn pawn_rank(self) -> i8 {
        match self {
            Colour::White => 6,
            Colour::Black => 1,
        }
    }
    pub fn promotion_rank(self) -> i8 {
        match self {
            Colour::White => 0,
            Colour::Black => 7,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Colour::White => "white",
            Colour::Black => "black",
        })
    }
}

impl FromStr for Colour {
    type Err = ChessError;

    /// Accepts the transport spellings `w`/`b` in either case, or the full word.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Colour::White),
            "b" | "black" => Ok(Colour::Black),
            _ => Err(ChessError::InvalidColour(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// Upper-case letter used by both FEN (White) and move notation.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::letter`].
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A square address: `(file, rank)` with `(0, 0)` the top-left square (a8).
/// File grows to the right, rank grows downward, matching the row-major
/// storage order of the board and the rank order of FEN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub file: i8,
    pub rank: i8,
}

impl Position {
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Like [`Position::new`] but only for on-board coordinates.
    pub fn try_new(file: i8, rank: i8) -> Option<Self> {
        let pos = Self::new(file, rank);
        pos.is_valid().then_some(pos)
    }

    pub fn from_index(idx: usize) -> Self {
        Self::new((idx % 8) as i8, (idx / 8) as i8)
    }

    pub fn index(self) -> usize {
        (self.rank as usize) * 8 + (self.file as usize)
    }

    pub fn is_valid(self) -> bool {
        (0..8).contains(&self.file) && (0..8).contains(&self.rank)
    }

    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        Self::try_new(self.file + df, self.rank + dr)
    }

    /// a8 is light; a square is light when file + rank is even.
    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// All 64 squares in storage order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).map(Position::from_index)
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file as u8) as char
    }
    pub fn rank_char(self) -> char {
        (b'8' - self.rank as u8) as char
    }

    pub fn file_from_char(c: char) -> Option<i8> {
        ('a'..='h').contains(&c).then(|| (c as u8 - b'a') as i8)
    }
    pub fn rank_from_char(c: char) -> Option<i8> {
        ('1'..='8').contains(&c).then(|| (b'8' - c as u8) as i8)
    }

    /// Parses a coordinate such as `e4`.
    pub fn from_coord(c: &str) -> Option<Self> {
        let mut chars = c.chars();
        let file = Self::file_from_char(chars.next()?)?;
        let rank = Self::rank_from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(file, rank))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", self.file_char(), self.rank_char())
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

/// A piece on (or just taken off) the board.
///
/// `position` always equals the position of the square holding the piece and
/// is `None` while the piece is off the board. `serial` only identifies the
/// piece for the presentation layer; the rules never read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
    pub position: Option<Position>,
    /// Number of times the piece has been relocated.
    pub move_count: u32,
    pub serial: u32,
}

impl Piece {
    pub fn new(kind: PieceKind, colour: Colour, serial: u32) -> Self {
        Self {
            kind,
            colour,
            position: None,
            move_count: 0,
            serial,
        }
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn letter(&self) -> char {
        match self.colour {
            Colour::White => self.kind.letter(),
            Colour::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}
