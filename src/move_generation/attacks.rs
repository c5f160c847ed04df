//! Attack detection around a king.
//!
//! Rather than generating every enemy move, the detector looks outward from
//! the target square: pawn and knight offsets, adjacent kings, and the eight
//! sliding rays, each ray stopping at the first piece it meets.

use common::Square;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::{Piece, PieceKind};
use crate::board::Board;
use crate::chess_move::ChessMove;

use super::targets::{DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS};

/// True if any piece of `attacker` attacks `square`.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let pawn = Piece::new(PieceKind::Pawn, attacker);
    let knight = Piece::new(PieceKind::Knight, attacker);
    let bishop = Piece::new(PieceKind::Bishop, attacker);
    let rook = Piece::new(PieceKind::Rook, attacker);
    let queen = Piece::new(PieceKind::Queen, attacker);
    let king = Piece::new(PieceKind::King, attacker);

    // an attacking pawn sits one step behind the square, from its own
    // direction of travel
    let pawn_rank_delta = -attacker.pawn_direction();
    let pawn_attack = [-1, 1].iter().any(|&file_delta| {
        square
            .offset(file_delta, pawn_rank_delta)
            .map_or(false, |sq| board.get(sq) == pawn)
    });
    if pawn_attack {
        return true;
    }

    if any_offset_holds(board, square, &KNIGHT_OFFSETS, knight)
        || any_offset_holds(board, square, &KING_OFFSETS, king)
    {
        return true;
    }

    any_ray_hits(board, square, &ORTHOGONAL_DIRECTIONS, rook, queen)
        || any_ray_hits(board, square, &DIAGONAL_DIRECTIONS, bishop, queen)
}

/// True if `color`'s king is attacked on `board`. A side without a king on
/// the board cannot be in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .map_or(false, |king| is_square_attacked(board, king, color.opposite()))
}

/// Plays `chess_move` on a clone of `board` and reports whether the
/// `defending` side's king is attacked afterwards. The original board is left
/// untouched.
pub fn attacks_king(
    board: &Board,
    chess_move: &ChessMove,
    defending: Color,
) -> Result<bool, BoardError> {
    let mut future_board = board.clone();
    chess_move.apply(&mut future_board)?;
    Ok(is_in_check(&future_board, defending))
}

fn any_offset_holds(board: &Board, square: Square, offsets: &[(i8, i8)], piece: Piece) -> bool {
    offsets.iter().any(|&(df, dr)| {
        square
            .offset(df, dr)
            .map_or(false, |sq| board.get(sq) == piece)
    })
}

fn any_ray_hits(
    board: &Board,
    square: Square,
    directions: &[(i8, i8)],
    slider: Piece,
    queen: Piece,
) -> bool {
    for &(df, dr) in directions {
        let mut current = square.offset(df, dr);
        while let Some(sq) = current {
            let piece = board.get(sq);
            if piece == slider || piece == queen {
                return true;
            }
            if !piece.is_empty() {
                // any other piece blocks the ray
                break;
            }
            current = sq.offset(df, dr);
        }
    }
    false
}
