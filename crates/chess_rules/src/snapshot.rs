//! One-colour board snapshots for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::*;

/// A piece as the presentation layer sees it: FEN letter plus the serial
/// number it uses to track the piece across redraws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPiece {
    pub letter: char,
    pub serial: u32,
}

/// The pieces of one colour on an 8x8 grid indexed `[rank][file]`, rank 0
/// being the top row. Squares holding the other colour's pieces are empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub colour: Colour,
    pub cells: [[Option<SnapshotPiece>; 8]; 8],
}

impl BoardSnapshot {
    pub fn get(&self, pos: Position) -> Option<SnapshotPiece> {
        pos.is_valid()
            .then(|| self.cells[pos.rank as usize][pos.file as usize])
            .flatten()
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

impl Board {
    pub fn snapshot(&self, colour: Colour) -> BoardSnapshot {
        let mut cells = [[None; 8]; 8];
        for pc in self.pieces_of(colour) {
            if let Some(pos) = pc.position {
                cells[pos.rank as usize][pos.file as usize] = Some(SnapshotPiece {
                    letter: pc.letter(),
                    serial: pc.serial,
                });
            }
        }
        BoardSnapshot { colour, cells }
    }
}
