//! Fixed opening moves.
//!
//! For its first few moves the engine develops its knights instead of
//! searching, provided the knights are still at home and the move is legal.

use std::fmt::{Display, Formatter};

use common::square::{B1, B8, C3, C6, F3, F6, G1, G8};
use common::Square;
use log::debug;

use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::Board;
use crate::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookMove(Square, Square);

impl BookMove {
    pub fn new(from: Square, to: Square) -> Self {
        BookMove(from, to)
    }

    pub fn from_square(&self) -> Square {
        self.0
    }

    pub fn to_square(&self) -> Square {
        self.1
    }

    fn matches(&self, chess_move: &ChessMove) -> bool {
        chess_move.from_square() == self.0 && chess_move.to_square() == self.1
    }
}

impl Display for BookMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.0.to_algebraic(), self.1.to_algebraic())
    }
}

pub struct Book {
    white: Vec<BookMove>,
    black: Vec<BookMove>,
}

impl Default for Book {
    fn default() -> Self {
        let mut book = Self::new();
        book.add_move(Color::White, BookMove::new(G1, F3));
        book.add_move(Color::White, BookMove::new(B1, C3));
        book.add_move(Color::Black, BookMove::new(G8, F6));
        book.add_move(Color::Black, BookMove::new(B8, C6));
        book
    }
}

impl Book {
    /// An empty book. Use `Book::default()` for the knight development lines.
    pub fn new() -> Self {
        Self {
            white: vec![],
            black: vec![],
        }
    }

    pub fn add_move(&mut self, color: Color, book_move: BookMove) {
        match color {
            Color::White => self.white.push(book_move),
            Color::Black => self.black.push(book_move),
        }
    }

    pub fn line(&self, color: Color) -> &[BookMove] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Returns the first book move for `color` whose piece is still on its
    /// starting square and which appears in `legal_moves`. The book is only
    /// consulted while `moves_played` is shorter than the line.
    pub fn get_move(
        &self,
        board: &Board,
        color: Color,
        moves_played: usize,
        legal_moves: &[ChessMove],
    ) -> Option<ChessMove> {
        let line = self.line(color);
        if moves_played >= line.len() {
            return None;
        }

        let knight = Piece::new(PieceKind::Knight, color);
        let chess_move = line
            .iter()
            .filter(|book_move| board.get(book_move.from_square()) == knight)
            .find_map(|book_move| {
                legal_moves
                    .iter()
                    .find(|legal| book_move.matches(legal))
                    .copied()
            })?;

        debug!("book move {} for {}", chess_move, color);
        Some(chess_move)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for color in Color::ALL.iter() {
            let moves: Vec<String> = self.line(*color).iter().map(|m| m.to_string()).collect();
            writeln!(f, "{}: {}", color, moves.join(" "))?;
        }
        Ok(())
    }
}
