//! Weaker search configurations: exhaustive minimax without pruning, and a
//! one-ply greedy pass. Both use the same evaluator and terminal scoring as
//! the alpha-beta searcher.

use log::debug;

use crate::board::color::Color;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::evaluate;
use crate::move_generation::{generate_valid_moves, ChessMoveList};

use super::SearchError;

/// Full-width minimax to `depth` plies. Returns the first move with the best
/// score for `color`, scored.
pub fn minimax_search(board: &Board, color: Color, depth: u8) -> Result<ChessMove, SearchError> {
    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    let candidates = generate_valid_moves(board, color)?;
    let maximizing = color.maximize_score();
    let mut best: Option<(ChessMove, i32)> = None;

    for candidate in candidates.iter() {
        let mut child = board.clone();
        candidate.apply(&mut child)?;
        let score = minimax(&child, depth - 1, !maximizing)?;

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((*candidate, score));
        }
    }

    let (mut best_move, best_score) = best.ok_or(SearchError::NoAvailableMoves)?;
    best_move.set_score(best_score);
    debug!("minimax depth {} picked {} (score {})", depth, best_move, best_score);
    Ok(best_move)
}

pub(crate) fn minimax(board: &Board, depth: u8, maximizing: bool) -> Result<i32, SearchError> {
    if depth == 0 {
        return Ok(evaluate::score(board));
    }

    let current_turn = if maximizing { Color::White } else { Color::Black };
    let candidates = generate_valid_moves(board, current_turn)?;
    if candidates.is_empty() {
        return Ok(evaluate::terminal_score(board, current_turn, depth));
    }

    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    for chess_move in candidates.iter() {
        let mut child = board.clone();
        chess_move.apply(&mut child)?;
        let score = minimax(&child, depth - 1, !maximizing)?;
        best_score = if maximizing {
            best_score.max(score)
        } else {
            best_score.min(score)
        };
    }

    Ok(best_score)
}

/// Scores every legal move one ply deep and returns all moves sharing the
/// best score, in generation order. The caller picks among them.
pub fn greedy_candidates(board: &Board, color: Color) -> Result<ChessMoveList, SearchError> {
    let candidates = generate_valid_moves(board, color)?;
    if candidates.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }

    let opponent = color.opposite();
    let mut scored = Vec::with_capacity(candidates.len());
    for candidate in candidates.iter() {
        let mut child = board.clone();
        candidate.apply(&mut child)?;
        let score = if generate_valid_moves(&child, opponent)?.is_empty() {
            evaluate::terminal_score(&child, opponent, 0)
        } else {
            evaluate::score(&child)
        };
        scored.push((*candidate, score));
    }

    let best_score = if color.maximize_score() {
        scored.iter().map(|(_, score)| *score).max()
    } else {
        scored.iter().map(|(_, score)| *score).min()
    }
    .ok_or(SearchError::NoAvailableMoves)?;

    Ok(scored
        .into_iter()
        .filter(|(_, score)| *score == best_score)
        .map(|(mut chess_move, score)| *chess_move.set_score(score))
        .collect())
}
