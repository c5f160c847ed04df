pub mod attacks;
pub mod targets;
pub mod validator;

use smallvec::SmallVec;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::Board;
use crate::chess_move::{ChessMove, ChessMoveEffect};

pub use validator::{is_valid_move, validate_move, MoveError};

pub type ChessMoveList = SmallVec<[ChessMove; 64]>;

/// Collects every legal move for `color`, in board scan order (file-major,
/// a1 through h8). Each candidate from the target generator must pass the
/// validator and must not leave the mover's own king attacked. Moves that
/// attack the opposing king are marked with `ChessMoveEffect::Check`.
///
/// An empty result means `color` has no legal moves; whether that is
/// checkmate or stalemate is for the caller to decide.
#[cfg_attr(feature = "instrumentation", tracing::instrument(skip_all))]
pub fn generate_valid_moves(board: &Board, color: Color) -> Result<ChessMoveList, BoardError> {
    let mut moves = ChessMoveList::new();

    for (from, piece) in board.pieces(color) {
        for candidate in targets::piece_targets(board, from, piece) {
            if !is_valid_move(board, &candidate, color) {
                continue;
            }
            if attacks::attacks_king(board, &candidate, color)? {
                continue;
            }

            let mut legal_move = candidate;
            if attacks::attacks_king(board, &candidate, color.opposite())? {
                legal_move.set_effect(ChessMoveEffect::Check);
            }
            moves.push(legal_move);
        }
    }

    Ok(moves)
}
