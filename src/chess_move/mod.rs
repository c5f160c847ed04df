use core::fmt;

use common::Square;

use crate::board::{error::BoardError, piece::Piece, Board};

/// Outcome attached to a move once the later pipeline stages have looked at
/// the resulting position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ChessMoveEffect {
    None,
    Check,
    Checkmate,
    Stalemate,
}

impl Default for ChessMoveEffect {
    fn default() -> Self {
        ChessMoveEffect::None
    }
}

/// A move from one square to another. The effect and score start out unset
/// and are filled in by the move generator and the searcher respectively.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    from_square: Square,
    to_square: Square,
    effect: ChessMoveEffect,
    score: Option<i32>,
}

impl ChessMove {
    pub fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
            effect: ChessMoveEffect::None,
            score: None,
        }
    }

    /// A placeholder move carrying only an effect, returned when the side to
    /// move has no legal moves at all.
    pub fn sentinel(effect: ChessMoveEffect) -> Self {
        Self {
            effect,
            score: Some(0),
            ..Self::new(Square::default(), Square::default())
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn effect(&self) -> ChessMoveEffect {
        self.effect
    }

    pub fn set_effect(&mut self, effect: ChessMoveEffect) -> &mut Self {
        self.effect = effect;
        self
    }

    pub fn score(&self) -> Option<i32> {
        self.score
    }

    pub fn set_score(&mut self, score: i32) -> &mut Self {
        self.score = Some(score);
        self
    }

    /// True if both moves travel between the same two squares, regardless of
    /// effect or score.
    pub fn same_squares(&self, other: &ChessMove) -> bool {
        self.from_square == other.from_square && self.to_square == other.to_square
    }

    /// Moves the piece on `from_square` to `to_square`, returning whatever
    /// piece was captured (`Piece::Empty` for a quiet move).
    #[must_use = "move application may fail"]
    pub fn apply(&self, board: &mut Board) -> Result<Piece, BoardError> {
        let piece_to_move = board
            .remove(self.from_square)
            .ok_or(BoardError::FromSquareIsEmpty {
                square: self.from_square,
            })?;
        Ok(board.set(self.to_square, piece_to_move))
    }

    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from_square, self.to_square)
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let effect_msg = match self.effect {
            ChessMoveEffect::Check => " (check)",
            ChessMoveEffect::Checkmate => " (checkmate)",
            ChessMoveEffect::Stalemate => " (stalemate)",
            ChessMoveEffect::None => "",
        };
        write!(
            f,
            "move {}{}{}",
            self.from_square, self.to_square, effect_msg
        )
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}", self).fmt(f)
    }
}

#[macro_export]
macro_rules! chess_move {
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::new($from, $to)
    };
}

#[macro_export]
macro_rules! check_move {
    ($chess_move:expr) => {
        *$chess_move.set_effect($crate::chess_move::ChessMoveEffect::Check)
    };
}
