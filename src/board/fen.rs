use common::Square;
use thiserror::Error;

use super::error::BoardError;
use super::piece::Piece;
use super::Board;

#[derive(Error, Debug, PartialEq)]
pub enum FenParseError {
    #[error("Missing piece placement field")]
    MissingPlacement,
    #[error("Invalid piece character: {invalid_character:?}")]
    InvalidPieceCharacter { invalid_character: char },
    #[error("Wrong number of ranks: 8 expected, {rank_count:?} given")]
    InvalidRankCount { rank_count: usize },
    #[error("Rank too long: {invalid_rank:?}")]
    InvalidRankLength { invalid_rank: String },
    #[error("Rank incomplete: {incomplete_rank:?}")]
    IncompleteRank { incomplete_rank: String },
    #[error("Error placing piece: {board_error:?}")]
    ErrorPlacingPiece { board_error: BoardError },
}

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Parses the piece placement field of a FEN string into a board. Any fields
/// after the placement (side to move, clocks) are ignored; the side to move is
/// always supplied separately by the caller.
pub fn parse_placement(fen: &str) -> Result<Board, FenParseError> {
    let placement = fen
        .split_whitespace()
        .next()
        .ok_or(FenParseError::MissingPlacement)?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount {
            rank_count: ranks.len(),
        });
    }

    let mut board = Board::new();

    // FEN lists the eighth rank first
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;

        for c in rank_str.chars() {
            if file >= 8 {
                return Err(FenParseError::InvalidRankLength {
                    invalid_rank: rank_str.to_string(),
                });
            }

            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }

            let piece = Piece::from_fen(c)
                .ok_or(FenParseError::InvalidPieceCharacter { invalid_character: c })?;
            board
                .put(Square::new(file, rank), piece)
                .map_err(|board_error| FenParseError::ErrorPlacingPiece { board_error })?;
            file += 1;
        }

        if file > 8 {
            return Err(FenParseError::InvalidRankLength {
                invalid_rank: rank_str.to_string(),
            });
        }
        if file < 8 {
            return Err(FenParseError::IncompleteRank {
                incomplete_rank: rank_str.to_string(),
            });
        }
    }

    Ok(board)
}

/// Renders the piece placement field of a FEN string.
pub fn to_placement(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(8);

    for rank in (0..8).rev() {
        let mut rank_str = String::new();
        let mut empty_run = 0;

        for file in 0..8 {
            let piece = board.get(Square::new(file, rank));
            if piece.is_empty() {
                empty_run += 1;
                continue;
            }
            if empty_run > 0 {
                rank_str.push_str(&empty_run.to_string());
                empty_run = 0;
            }
            rank_str.push(piece.to_fen());
        }

        if empty_run > 0 {
            rank_str.push_str(&empty_run.to_string());
        }
        ranks.push(rank_str);
    }

    ranks.join("/")
}
