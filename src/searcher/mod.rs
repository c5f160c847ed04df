//! Depth-limited minimax search with alpha-beta pruning.
//!
//! Scores are always from white's perspective: white maximizes, black
//! minimizes. Every ply clones the board and plays the move on the clone, so
//! no frame ever mutates a board that another live frame still reads.
//!
//! The root search can be bounded by a node count or wall-clock budget. The
//! budget is only consulted between root moves: the first root move is always
//! searched in full, and once the budget runs out the best move found so far
//! is returned.

use std::cmp::{max, min};
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use thiserror::Error;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::evaluate;
use crate::move_generation::generate_valid_moves;

mod reduced;

pub use reduced::{greedy_candidates, minimax_search};

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("board error: {error}")]
    BoardError { error: BoardError },
}

impl From<BoardError> for SearchError {
    fn from(error: BoardError) -> Self {
        SearchError::BoardError { error }
    }
}

pub struct Searcher {
    search_depth: u8,
    node_budget: Option<usize>,
    time_budget: Option<Duration>,
    searched_position_count: usize,
    termination_count: usize,
    budget_exhausted: bool,
    last_search_duration: Option<Duration>,
}

impl Searcher {
    pub fn new(depth: u8) -> Self {
        Self {
            search_depth: depth,
            node_budget: None,
            time_budget: None,
            searched_position_count: 0,
            termination_count: 0,
            budget_exhausted: false,
            last_search_duration: None,
        }
    }

    /// Stops starting new root moves once this many positions have been
    /// searched.
    pub fn with_node_budget(mut self, node_budget: Option<usize>) -> Self {
        self.node_budget = node_budget;
        self
    }

    /// Stops starting new root moves once this much time has elapsed.
    pub fn with_time_budget(mut self, time_budget: Option<Duration>) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    pub fn reset_stats(&mut self) {
        self.searched_position_count = 0;
        self.termination_count = 0;
        self.budget_exhausted = false;
        self.last_search_duration = None;
    }

    pub fn searched_position_count(&self) -> usize {
        self.searched_position_count
    }

    pub fn termination_count(&self) -> usize {
        self.termination_count
    }

    /// True if the last search was cut short by its node or time budget.
    pub fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.last_search_duration
    }

    /// Finds the best move for `color`. Ties go to the move generated first.
    pub fn search(&mut self, board: &Board, color: Color) -> Result<ChessMove, SearchError> {
        self.search_avoiding(board, color, &[])
    }

    /// Like `search`, but among moves tied for the best score, prefers one
    /// that does not repeat a move in `recent_moves`.
    #[cfg_attr(feature = "instrumentation", tracing::instrument(skip_all))]
    pub fn search_avoiding(
        &mut self,
        board: &Board,
        color: Color,
        recent_moves: &[ChessMove],
    ) -> Result<ChessMove, SearchError> {
        if self.search_depth < 1 {
            return Err(SearchError::DepthTooLow);
        }

        self.reset_stats();
        let start = Instant::now();

        let candidates = generate_valid_moves(board, color)?;
        if candidates.is_empty() {
            return Err(SearchError::NoAvailableMoves);
        }

        let maximizing = color.maximize_score();
        let mut best: Option<(ChessMove, i32)> = None;

        for (i, candidate) in candidates.iter().enumerate() {
            if i > 0 && self.out_of_budget(start) {
                warn!(
                    "search budget exhausted after {} of {} root moves",
                    i,
                    candidates.len()
                );
                self.budget_exhausted = true;
                break;
            }

            let mut child = board.clone();
            candidate.apply(&mut child)?;

            // Keep the window one point wider than the best score so far, so
            // a move that ties it comes back with its exact score.
            let (alpha, beta) = match best {
                None => (i32::MIN, i32::MAX),
                Some((_, best_score)) if maximizing => (best_score.saturating_sub(1), i32::MAX),
                Some((_, best_score)) => (i32::MIN, best_score.saturating_add(1)),
            };
            let score = self.alpha_beta(&child, self.search_depth - 1, alpha, beta, !maximizing)?;
            trace!("root move {} scored {}", candidate, score);

            let replace = match &best {
                None => true,
                Some((current, best_score)) => {
                    let improves = if maximizing {
                        score > *best_score
                    } else {
                        score < *best_score
                    };
                    let breaks_repetition = score == *best_score
                        && is_repetition(current, recent_moves)
                        && !is_repetition(candidate, recent_moves);
                    improves || breaks_repetition
                }
            };
            if replace {
                best = Some((*candidate, score));
            }
        }

        let duration = start.elapsed();
        self.last_search_duration = Some(duration);

        let (mut best_move, best_score) = best.ok_or(SearchError::NoAvailableMoves)?;
        best_move.set_score(best_score);
        debug!(
            "alpha-beta depth {} picked {} (score {}) after {} positions, {} cutoffs, {:?}",
            self.search_depth,
            best_move,
            best_score,
            self.searched_position_count,
            self.termination_count,
            duration
        );

        Ok(best_move)
    }

    /// Scores `board` with `depth` plies left. `maximizing` is true when white
    /// is to move.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        self.searched_position_count += 1;

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
            let score = self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing)?;

            if maximizing {
                best_score = max(best_score, score);
                alpha = max(alpha, score);
            } else {
                best_score = min(best_score, score);
                beta = min(beta, score);
            }

            if beta <= alpha {
                self.termination_count += 1;
                break;
            }
        }

        Ok(best_score)
    }

    fn out_of_budget(&self, start: Instant) -> bool {
        let nodes_spent = self
            .node_budget
            .map_or(false, |budget| self.searched_position_count >= budget);
        let time_spent = self
            .time_budget
            .map_or(false, |budget| start.elapsed() >= budget);
        nodes_spent || time_spent
    }
}

fn is_repetition(chess_move: &ChessMove, recent_moves: &[ChessMove]) -> bool {
    recent_moves.iter().any(|recent| recent.same_squares(chess_move))
}
