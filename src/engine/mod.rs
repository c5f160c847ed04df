//! Move selection for one side of a game.
//!
//! `Engine` is the entry point a host talks to. It owns the per-game session
//! state (how many moves it has played, which moves it chose recently) and
//! turns a board into a single finalized move.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::Board;
use crate::book::Book;
use crate::chess_move::{ChessMove, ChessMoveEffect};
use crate::evaluate;
use crate::move_generation::{attacks, generate_valid_moves, is_valid_move, ChessMoveList};
use crate::searcher::{greedy_candidates, minimax_search, SearchError, Searcher};

/// How the engine picks among legal moves once the book has nothing to say.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Uniformly random legal move.
    Random,
    /// One ply of evaluation, random among the best.
    Greedy,
    /// Full-width minimax without pruning.
    Minimax,
    /// Minimax with alpha-beta pruning.
    AlphaBeta,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha-beta",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown strategy: {0}")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Strategy::Random),
            "greedy" => Ok(Strategy::Greedy),
            "minimax" => Ok(Strategy::Minimax),
            "alpha-beta" => Ok(Strategy::AlphaBeta),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub strategy: Strategy,
    pub use_opening_book: bool,
    /// Number of recently chosen moves remembered for breaking score ties.
    pub history_length: usize,
    pub node_budget: Option<usize>,
    pub time_budget: Option<Duration>,
    /// Seed for the random strategies. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            strategy: Strategy::AlphaBeta,
            use_opening_book: true,
            history_length: 8,
            node_budget: None,
            time_budget: None,
            seed: None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("no {color} king on the board")]
    MissingKing { color: Color },
    #[error("board error: {error}")]
    BoardError { error: BoardError },
    #[error("search error: {error}")]
    SearchError { error: SearchError },
}

impl From<BoardError> for EngineError {
    fn from(error: BoardError) -> Self {
        EngineError::BoardError { error }
    }
}

impl From<SearchError> for EngineError {
    fn from(error: SearchError) -> Self {
        EngineError::SearchError { error }
    }
}

/// Search performance statistics
#[derive(Debug, Clone)]
pub struct SearchStats {
    pub positions_searched: usize,
    pub cutoffs: usize,
    pub depth: u8,
    pub budget_exhausted: bool,
    pub last_search_duration: Option<Duration>,
}

pub struct Engine {
    config: EngineConfig,
    searcher: Searcher,
    book: Book,
    moves_played: usize,
    recent_moves: VecDeque<ChessMove>,
    rng: StdRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine from `config`. A search depth of 0 is raised to 1,
    /// since the engine must always be able to produce a move.
    pub fn with_config(mut config: EngineConfig) -> Self {
        if config.search_depth == 0 {
            warn!("search depth 0 is not searchable, using 1");
            config.search_depth = 1;
        }
        let searcher = Searcher::new(config.search_depth)
            .with_node_budget(config.node_budget)
            .with_time_budget(config.time_budget);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            recent_moves: VecDeque::with_capacity(config.history_length),
            config,
            searcher,
            book: Book::default(),
            moves_played: 0,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn recent_moves(&self) -> impl Iterator<Item = &ChessMove> {
        self.recent_moves.iter()
    }

    /// Forgets everything about the previous game.
    pub fn new_game(&mut self) {
        self.moves_played = 0;
        self.recent_moves.clear();
    }

    /// Statistics of the last alpha-beta search. Other strategies clear them.
    pub fn search_stats(&self) -> SearchStats {
        SearchStats {
            positions_searched: self.searcher.searched_position_count(),
            cutoffs: self.searcher.termination_count(),
            depth: self.searcher.search_depth(),
            budget_exhausted: self.searcher.budget_exhausted(),
            last_search_duration: self.searcher.last_search_duration(),
        }
    }

    /// Picks a move for `color`.
    ///
    /// If `color` has no legal moves, the result is a sentinel move flagged
    /// `Checkmate` (when in check) or `Stalemate`; its squares carry no
    /// meaning. Otherwise the chosen move is flagged `Check`, `Checkmate` or
    /// `Stalemate` according to the opponent's situation after it is played.
    ///
    /// Fails only if either king is missing from the board.
    #[cfg_attr(feature = "instrumentation", tracing::instrument(skip_all))]
    pub fn choose_move(&mut self, board: &Board, color: Color) -> Result<ChessMove, EngineError> {
        for king_color in Color::ALL.iter() {
            if board.find_king(*king_color).is_none() {
                return Err(EngineError::MissingKing { color: *king_color });
            }
        }

        let legal_moves = generate_valid_moves(board, color)?;
        if legal_moves.is_empty() {
            let effect = if evaluate::player_is_in_check(board, color) {
                ChessMoveEffect::Checkmate
            } else {
                ChessMoveEffect::Stalemate
            };
            info!("{} has no legal moves ({:?})", color, effect);
            return Ok(ChessMove::sentinel(effect));
        }

        let chosen = match self.book_move(board, color, &legal_moves) {
            Some(book_move) => book_move,
            None => self.search(board, color, &legal_moves)?,
        };
        let chosen = finalize(board, chosen, color)?;

        self.remember(chosen);
        info!("{} plays {} (score {:?})", color, chosen, chosen.score());
        Ok(chosen)
    }

    /// True if `chess_move` follows its piece's movement rules for `color`
    /// and does not leave `color`'s own king attacked.
    pub fn validate_move(&self, board: &Board, chess_move: &ChessMove, color: Color) -> bool {
        if !is_valid_move(board, chess_move, color) {
            return false;
        }
        matches!(attacks::attacks_king(board, chess_move, color), Ok(false))
    }

    fn book_move(
        &self,
        board: &Board,
        color: Color,
        legal_moves: &ChessMoveList,
    ) -> Option<ChessMove> {
        if !self.config.use_opening_book {
            return None;
        }
        self.book
            .get_move(board, color, self.moves_played, legal_moves)
    }

    fn search(
        &mut self,
        board: &Board,
        color: Color,
        legal_moves: &ChessMoveList,
    ) -> Result<ChessMove, EngineError> {
        debug!("searching with {} strategy", self.config.strategy);
        if self.config.strategy != Strategy::AlphaBeta {
            self.searcher.reset_stats();
        }
        let chess_move = match self.config.strategy {
            Strategy::Random => {
                let mut chess_move = *legal_moves
                    .choose(&mut self.rng)
                    .ok_or(SearchError::NoAvailableMoves)?;
                let mut child = board.clone();
                chess_move.apply(&mut child)?;
                *chess_move.set_score(evaluate::score(&child))
            }
            Strategy::Greedy => {
                let candidates = greedy_candidates(board, color)?;
                *candidates
                    .choose(&mut self.rng)
                    .ok_or(SearchError::NoAvailableMoves)?
            }
            Strategy::Minimax => minimax_search(board, color, self.config.search_depth)?,
            Strategy::AlphaBeta => {
                let recent_moves = self.recent_moves.make_contiguous();
                self.searcher.search_avoiding(board, color, recent_moves)?
            }
        };
        Ok(chess_move)
    }

    fn remember(&mut self, chess_move: ChessMove) {
        self.moves_played += 1;
        if self.config.history_length == 0 {
            return;
        }
        while self.recent_moves.len() >= self.config.history_length {
            self.recent_moves.pop_front();
        }
        self.recent_moves.push_back(chess_move);
    }
}

/// Plays `chess_move` on a copy of `board` and upgrades its effect if the
/// opponent is left without a legal reply.
fn finalize(board: &Board, mut chess_move: ChessMove, color: Color) -> Result<ChessMove, EngineError> {
    let mut child = board.clone();
    chess_move.apply(&mut child)?;

    let opponent = color.opposite();
    if generate_valid_moves(&child, opponent)?.is_empty() {
        let effect = match chess_move.effect() {
            ChessMoveEffect::Check | ChessMoveEffect::Checkmate => ChessMoveEffect::Checkmate,
            _ => ChessMoveEffect::Stalemate,
        };
        chess_move.set_effect(effect);
    }

    Ok(chess_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::Piece;
    use crate::{chess_move, chess_position};
    use common::square::*;

    fn deterministic(strategy: Strategy) -> EngineConfig {
        EngineConfig {
            strategy,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_mate_in_1_white() {
        let board = chess_position! {
            .Q......
            ........
            ........
            ........
            ........
            ........
            k.K.....
            ........
        };
        let mut engine = Engine::new();

        let chess_move = engine.choose_move(&board, Color::White).unwrap();
        let valid_checkmates = [(B8, B2), (B8, A8), (B8, A7)];
        assert!(
            valid_checkmates
                .iter()
                .any(|&(from, to)| chess_move.from_square() == from && chess_move.to_square() == to),
            "{} does not lead to checkmate",
            chess_move
        );
        assert_eq!(ChessMoveEffect::Checkmate, chess_move.effect());
    }

    #[test]
    fn test_missing_king_is_an_error() {
        let board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            R.......
        };
        let mut engine = Engine::new();
        assert_eq!(
            Err(EngineError::MissingKing {
                color: Color::White
            }),
            engine.choose_move(&board, Color::White)
        );
    }

    #[test]
    fn test_stalemate_sentinel() {
        let board = chess_position! {
            k.......
            ........
            .Q......
            ........
            ........
            ........
            ........
            ..K.....
        };
        let mut engine = Engine::new();
        let chess_move = engine.choose_move(&board, Color::Black).unwrap();
        assert_eq!(ChessMoveEffect::Stalemate, chess_move.effect());
        assert_eq!(0, engine.moves_played());
    }

    #[test]
    fn test_checkmate_sentinel() {
        let board = chess_position! {
            .......k
            ......Q.
            .....K..
            ........
            ........
            ........
            ........
            ........
        };
        let mut engine = Engine::new();
        let chess_move = engine.choose_move(&board, Color::Black).unwrap();
        assert_eq!(ChessMoveEffect::Checkmate, chess_move.effect());
    }

    #[test]
    fn test_opening_book_develops_knights() {
        let mut board = Board::starting_position();
        let mut engine = Engine::new();

        let first = engine.choose_move(&board, Color::White).unwrap();
        assert_eq!(chess_move!(G1, F3), first);
        first.apply(&mut board).unwrap();

        let second = engine.choose_move(&board, Color::White).unwrap();
        assert_eq!(chess_move!(B1, C3), second);
        assert_eq!(2, engine.moves_played());

        engine.new_game();
        assert_eq!(0, engine.moves_played());
        assert_eq!(0, engine.recent_moves().count());
    }

    #[test]
    fn test_opening_book_can_be_disabled() {
        let board = Board::starting_position();
        let mut engine = Engine::with_config(EngineConfig {
            use_opening_book: false,
            search_depth: 2,
            ..Default::default()
        });

        let chess_move = engine.choose_move(&board, Color::White).unwrap();
        assert!(chess_move.score().is_some());
        assert!(engine.search_stats().positions_searched > 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ....K..R
        };
        let mut engine = Engine::with_config(EngineConfig {
            history_length: 2,
            search_depth: 1,
            ..Default::default()
        });

        for _ in 0..4 {
            engine.choose_move(&board, Color::White).unwrap();
        }
        assert_eq!(4, engine.moves_played());
        assert_eq!(2, engine.recent_moves().count());
    }

    #[test]
    fn test_repeated_position_varies_tied_moves() {
        let board = chess_position! {
            ........
            ...R....
            ........
            k.......
            ........
            ........
            ........
            ......K.
        };
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: 1,
            ..Default::default()
        });

        let first = engine.choose_move(&board, Color::White).unwrap();
        let second = engine.choose_move(&board, Color::White).unwrap();
        assert!(!first.same_squares(&second));
        assert_eq!(first.score(), second.score());
    }

    #[test]
    fn test_every_strategy_returns_a_legal_move() {
        let board = chess_position! {
            r...k..r
            ppp..ppp
            ..n.....
            ...qp...
            ...P....
            ..N..N..
            PPP..PPP
            R..QK..R
        };
        let legal = generate_valid_moves(&board, Color::White).unwrap();

        for strategy in [
            Strategy::Random,
            Strategy::Greedy,
            Strategy::Minimax,
            Strategy::AlphaBeta,
        ]
        .iter()
        {
            let mut engine = Engine::with_config(EngineConfig {
                search_depth: 2,
                ..deterministic(*strategy)
            });
            let chess_move = engine.choose_move(&board, Color::White).unwrap();
            assert!(
                legal.iter().any(|m| m.same_squares(&chess_move)),
                "{} returned illegal {}",
                strategy,
                chess_move
            );
            assert!(chess_move.score().is_some());
        }
    }

    #[test]
    fn test_greedy_takes_hanging_queen() {
        let board = chess_position! {
            ....k...
            ........
            ........
            ...q....
            ........
            ..N.....
            ........
            ....K...
        };
        let mut engine = Engine::with_config(deterministic(Strategy::Greedy));
        let chess_move = engine.choose_move(&board, Color::White).unwrap();
        assert!(chess_move.same_squares(&chess_move!(C3, D5)));
    }

    #[test]
    fn test_validate_move() {
        let board = chess_position! {
            ....r..k
            ........
            ........
            ........
            ........
            ........
            ....B...
            ....K...
        };
        let engine = Engine::new();

        // The bishop is pinned.
        assert!(!engine.validate_move(&board, &chess_move!(E2, D3), Color::White));
        assert!(engine.validate_move(&board, &chess_move!(E1, D1), Color::White));
        // Not white's piece.
        assert!(!engine.validate_move(&board, &chess_move!(E8, E7), Color::White));
        // Empty origin.
        assert!(!engine.validate_move(&board, &chess_move!(A1, A2), Color::White));
        assert_eq!(Piece::WhiteBishop, board.get(E2));
    }

    #[test]
    fn test_depth_zero_is_raised_to_one() {
        let board = Board::starting_position();
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: 0,
            use_opening_book: false,
            ..Default::default()
        });
        assert_eq!(1, engine.config().search_depth);

        let chess_move = engine.choose_move(&board, Color::White).unwrap();
        let legal = generate_valid_moves(&board, Color::White).unwrap();
        assert!(legal.iter().any(|m| m.same_squares(&chess_move)));
        assert_eq!(1, engine.search_stats().depth);
    }

    #[test]
    fn test_other_strategies_clear_search_stats() {
        let board = Board::starting_position();
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: 2,
            use_opening_book: false,
            ..Default::default()
        });
        engine.choose_move(&board, Color::White).unwrap();
        assert!(engine.search_stats().positions_searched > 0);
        assert!(engine.search_stats().last_search_duration.is_some());

        engine.config.strategy = Strategy::Minimax;
        engine.choose_move(&board, Color::White).unwrap();
        let stats = engine.search_stats();
        assert_eq!(0, stats.positions_searched);
        assert_eq!(0, stats.cutoffs);
        assert!(stats.last_search_duration.is_none());
    }

    #[test]
    fn test_strategy_round_trip() {
        for strategy in ["random", "greedy", "minimax", "alpha-beta"].iter() {
            let parsed: Strategy = strategy.parse().unwrap();
            assert_eq!(*strategy, parsed.to_string());
        }
        assert!("alphabeta".parse::<Strategy>().is_err());
    }
}
