//! Independent validation of a single move against a board.
//!
//! The validator re-derives legality from the board contents and the two
//! endpoints alone, so it can check moves that did not come from our own
//! generator (for example a move submitted by the opponent). It does not
//! consider king safety; see `attacks` for that.

use common::Square;
use log::trace;
use thiserror::Error;

use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::Board;
use crate::chess_move::ChessMove;

#[derive(Error, Debug, PartialEq)]
pub enum MoveError {
    #[error("There is no piece on {square}")]
    FromSquareIsEmpty { square: Square },
    #[error("The {piece:?} on {square} does not belong to {color}")]
    NotOwnPiece {
        piece: Piece,
        square: Square,
        color: Color,
    },
    #[error("The destination {square} holds a friendly piece")]
    FriendlyDestination { square: Square },
    #[error("A {piece:?} cannot move from {from} to {to}")]
    IllegalPattern {
        piece: Piece,
        from: Square,
        to: Square,
    },
    #[error("The path from {from} to {to} is blocked on {blocker}")]
    PathBlocked {
        from: Square,
        to: Square,
        blocker: Square,
    },
}

/// Returns true if `chess_move` obeys the movement rules of the piece on its
/// origin square. Any validation failure, including an empty or enemy-owned
/// origin, yields false.
pub fn is_valid_move(board: &Board, chess_move: &ChessMove, color: Color) -> bool {
    match validate_move(board, chess_move, color) {
        Ok(()) => true,
        Err(error) => {
            trace!("rejected {} for {}: {}", chess_move, color, error);
            false
        }
    }
}

/// Checks `chess_move` for `color` and reports why it fails, if it does.
pub fn validate_move(board: &Board, chess_move: &ChessMove, color: Color) -> Result<(), MoveError> {
    let from = chess_move.from_square();
    let to = chess_move.to_square();

    if board.get(to).belongs_to(color) {
        return Err(MoveError::FriendlyDestination { square: to });
    }

    let piece = board.get(from);
    let kind = piece
        .kind()
        .ok_or(MoveError::FromSquareIsEmpty { square: from })?;
    if !piece.belongs_to(color) {
        return Err(MoveError::NotOwnPiece {
            piece,
            square: from,
            color,
        });
    }

    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    let illegal = MoveError::IllegalPattern { piece, from, to };

    match kind {
        PieceKind::Pawn => validate_pawn(board, from, to, color).ok_or(illegal),
        PieceKind::Knight => {
            match (file_delta.abs(), rank_delta.abs()) {
                (1, 2) | (2, 1) => Ok(()),
                _ => Err(illegal),
            }
        }
        PieceKind::King => {
            if file_delta.abs().max(rank_delta.abs()) == 1 {
                Ok(())
            } else {
                Err(illegal)
            }
        }
        PieceKind::Rook => {
            if is_orthogonal(file_delta, rank_delta) {
                validate_path(board, from, to)
            } else {
                Err(illegal)
            }
        }
        PieceKind::Bishop => {
            if is_diagonal(file_delta, rank_delta) {
                validate_path(board, from, to)
            } else {
                Err(illegal)
            }
        }
        PieceKind::Queen => {
            if is_orthogonal(file_delta, rank_delta) || is_diagonal(file_delta, rank_delta) {
                validate_path(board, from, to)
            } else {
                Err(illegal)
            }
        }
    }
}

fn validate_pawn(board: &Board, from: Square, to: Square, color: Color) -> Option<()> {
    let direction = color.pawn_direction();
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    let destination = board.get(to);

    let single_push = file_delta == 0 && rank_delta == direction && destination.is_empty();
    let double_push = file_delta == 0
        && rank_delta == 2 * direction
        && from.rank() == color.pawn_starting_rank()
        && destination.is_empty()
        && from
            .offset(0, direction)
            .map_or(false, |step| !board.is_occupied(step));
    let capture =
        file_delta.abs() == 1 && rank_delta == direction && destination.is_enemy_of(color);

    if single_push || double_push || capture {
        Some(())
    } else {
        None
    }
}

fn is_orthogonal(file_delta: i8, rank_delta: i8) -> bool {
    (file_delta == 0) != (rank_delta == 0)
}

fn is_diagonal(file_delta: i8, rank_delta: i8) -> bool {
    file_delta != 0 && file_delta.abs() == rank_delta.abs()
}

/// Walks the squares strictly between `from` and `to`. The destination itself
/// is not inspected here.
fn validate_path(board: &Board, from: Square, to: Square) -> Result<(), MoveError> {
    let step_file = (to.file() as i8 - from.file() as i8).signum();
    let step_rank = (to.rank() as i8 - from.rank() as i8).signum();

    let mut current = from.offset(step_file, step_rank);
    while let Some(square) = current {
        if square == to {
            return Ok(());
        }
        if board.is_occupied(square) {
            return Err(MoveError::PathBlocked {
                from,
                to,
                blocker: square,
            });
        }
        current = square.offset(step_file, step_rank);
    }

    Ok(())
}
