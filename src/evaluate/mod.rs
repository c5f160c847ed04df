use common::Square;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::move_generation::{attacks, generate_valid_moves};

pub use self::evaluation_tables::material_value;
use self::evaluation_tables::bonus_table;

mod evaluation_tables;

// Far larger than any reachable material total, so a forced mate always
// outranks material. The winner's score is `MATE_SCORE` plus the remaining
// search depth, so quicker mates are preferred.
pub const MATE_SCORE: i32 = 1_000_000;

#[derive(Debug, PartialEq)]
pub enum GameEnding {
    Checkmate,
    Stalemate,
}

#[inline(always)]
pub fn player_is_in_check(board: &Board, player: Color) -> bool {
    attacks::is_in_check(board, player)
}

/// Returns the game ending state for `current_turn` if it has no legal moves,
/// otherwise returns None.
pub fn game_ending(board: &Board, current_turn: Color) -> Result<Option<GameEnding>, BoardError> {
    let candidates = generate_valid_moves(board, current_turn)?;
    if !candidates.is_empty() {
        return Ok(None);
    }

    if player_is_in_check(board, current_turn) {
        Ok(Some(GameEnding::Checkmate))
    } else {
        Ok(Some(GameEnding::Stalemate))
    }
}

/// Score of a position in which `current_turn` has no legal moves, with
/// `remaining_depth` plies of search left.
pub fn terminal_score(board: &Board, current_turn: Color, remaining_depth: u8) -> i32 {
    if !player_is_in_check(board, current_turn) {
        return 0;
    }

    let mate = MATE_SCORE + remaining_depth as i32;
    match current_turn {
        Color::White => -mate,
        Color::Black => mate,
    }
}

/// Returns the score of the board from white's perspective: positive values
/// favor white, negative values favor black.
#[cfg_attr(feature = "instrumentation", tracing::instrument(skip_all))]
pub fn score(board: &Board) -> i32 {
    player_material_score(board, Color::White) - player_material_score(board, Color::Black)
}

/// Returns the material score of the board for the given player. The bonus
/// tables incentivize the placement of pieces on specific parts of the board
/// (e.g. knights towards the center, rooks on the seventh rank).
fn player_material_score(board: &Board, color: Color) -> i32 {
    board
        .pieces(color)
        .map(|(square, piece)| piece_score(square, piece, color))
        .sum()
}

fn piece_score(square: Square, piece: Piece, color: Color) -> i32 {
    let kind = match piece.kind() {
        Some(kind) => kind,
        None => return 0,
    };
    material_value(kind) + bonus_table(kind)[bonus_index(square, color)]
}

/// The bonus tables are written from white's side of the board. Black's
/// lookups reflect the rank, so both sides share the same tables.
fn bonus_index(square: Square, color: Color) -> usize {
    let row = match color {
        Color::White => 7 - square.rank(),
        Color::Black => square.rank(),
    };
    (row * 8 + square.file()) as usize
}
