use std::fmt;

use common::Square;

use super::Board;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let divider = "  +---+---+---+---+---+---+---+---+\n";
        write!(f, "{}", divider)?;
        for rank in (0..8).rev() {
            let cells: Vec<String> = (0..8)
                .map(|file| match self.get(Square::new(file, rank)).to_fen() {
                    '.' => " ".to_string(),
                    c => c.to_string(),
                })
                .collect();
            write!(f, "{} | {} |\n{}", rank + 1, cells.join(" | "), divider)?;
        }
        write!(f, "    a   b   c   d   e   f   g   h")
    }
}

/// Builds a board from an 8x8 grid of FEN characters drawn from white's
/// perspective, with `.` for empty squares.
#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let piece = $crate::board::piece::Piece::from_fen(c)
                    .expect("Invalid character in chess position");
                // The first character is a8, so rows are counted down from the
                // eighth rank.
                let row = i / 8;
                let col = i % 8;
                let rank = (7 - row) as u8;
                board
                    .put($crate::square::Square::new(col as u8, rank), piece)
                    .unwrap();
            }
        }
        board
    }};
}
