//! Pseudo-legal move targets for a single piece.
//!
//! Targets are generated broadly: sliding pieces emit every square along
//! their rays regardless of what stands in the way. Blocking, friendly
//! destinations and king safety are resolved afterwards by the validator and
//! the attack detector.

use common::Square;
use smallvec::SmallVec;

use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::Board;
use crate::chess_move::ChessMove;

use super::validator::MoveError;

pub type PieceTargets = SmallVec<[ChessMove; 32]>;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-1, -2),
    (1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

pub(crate) const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, -1), (-1, 1), (1, -1)];

/// Generates every pseudo-legal target for the piece standing on `from`.
/// Fails if the square is empty, since no movement rule applies to it.
pub fn generate_piece_targets(board: &Board, from: Square) -> Result<PieceTargets, MoveError> {
    let piece = board.get(from);
    if piece.is_empty() {
        return Err(MoveError::FromSquareIsEmpty { square: from });
    }
    Ok(piece_targets(board, from, piece))
}

pub(crate) fn piece_targets(board: &Board, from: Square, piece: Piece) -> PieceTargets {
    let mut targets = PieceTargets::new();
    let (kind, color) = match (piece.kind(), piece.color()) {
        (Some(kind), Some(color)) => (kind, color),
        _ => return targets,
    };

    match kind {
        PieceKind::Pawn => generate_pawn_targets(&mut targets, board, from, color),
        PieceKind::Knight => generate_offset_targets(&mut targets, from, &KNIGHT_OFFSETS),
        PieceKind::Bishop => generate_ray_targets(&mut targets, from, &DIAGONAL_DIRECTIONS),
        PieceKind::Rook => generate_ray_targets(&mut targets, from, &ORTHOGONAL_DIRECTIONS),
        PieceKind::Queen => {
            generate_ray_targets(&mut targets, from, &ORTHOGONAL_DIRECTIONS);
            generate_ray_targets(&mut targets, from, &DIAGONAL_DIRECTIONS);
        }
        PieceKind::King => generate_offset_targets(&mut targets, from, &KING_OFFSETS),
    }

    targets
}

fn generate_pawn_targets(targets: &mut PieceTargets, board: &Board, from: Square, color: Color) {
    let direction = color.pawn_direction();

    if let Some(single) = from.offset(0, direction) {
        if !board.is_occupied(single) {
            targets.push(ChessMove::new(from, single));

            if from.rank() == color.pawn_starting_rank() {
                if let Some(double) = from.offset(0, 2 * direction) {
                    if !board.is_occupied(double) {
                        targets.push(ChessMove::new(from, double));
                    }
                }
            }
        }
    }

    for &file_delta in &[-1, 1] {
        if let Some(capture) = from.offset(file_delta, direction) {
            if board.get(capture).is_enemy_of(color) {
                targets.push(ChessMove::new(from, capture));
            }
        }
    }
}

fn generate_offset_targets(targets: &mut PieceTargets, from: Square, offsets: &[(i8, i8)]) {
    targets.extend(
        offsets
            .iter()
            .filter_map(|&(df, dr)| from.offset(df, dr))
            .map(|to| ChessMove::new(from, to)),
    );
}

fn generate_ray_targets(targets: &mut PieceTargets, from: Square, directions: &[(i8, i8)]) {
    for &(df, dr) in directions {
        let mut current = from.offset(df, dr);
        while let Some(to) = current {
            targets.push(ChessMove::new(from, to));
            current = to.offset(df, dr);
        }
    }
}
