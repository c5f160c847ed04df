pub mod color;
pub mod error;
pub mod fen;
pub mod piece;

mod display;

use color::Color;
use common::square::{self, Square};
use error::BoardError;
use piece::Piece;

use crate::chess_position;

/// An 8x8 grid of piece values. Boards are plain arrays, so cloning one is a
/// cheap copy; every simulated move operates on its own clone.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // indexed by [rank][file]
    squares: [[Piece; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [[Piece::Empty; 8]; 8],
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        }
    }

    /// Parses the piece placement field of a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, fen::FenParseError> {
        fen::parse_placement(fen)
    }

    pub fn to_fen_placement(&self) -> String {
        fen::to_placement(self)
    }

    #[inline(always)]
    pub fn get(&self, square: Square) -> Piece {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Overwrites the square, returning whatever was there before.
    #[inline(always)]
    pub fn set(&mut self, square: Square, piece: Piece) -> Piece {
        let cell = &mut self.squares[square.rank() as usize][square.file() as usize];
        std::mem::replace(cell, piece)
    }

    pub fn put(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupied { square });
        }
        self.set(square, piece);
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        match self.set(square, Piece::Empty) {
            Piece::Empty => None,
            piece => Some(piece),
        }
    }

    #[inline(always)]
    pub fn is_occupied(&self, square: Square) -> bool {
        !self.get(square).is_empty()
    }

    /// Every square holding a piece owned by `color`, in file-major scan order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        square::ORDERED
            .iter()
            .map(move |&sq| (sq, self.get(sq)))
            .filter(move |(_, piece)| piece.belongs_to(color))
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(piece::PieceKind::King, color);
        square::ORDERED
            .iter()
            .copied()
            .find(|&sq| self.get(sq) == king)
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.to_fen_placement())
    }
}
