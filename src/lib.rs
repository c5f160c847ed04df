//! A small chess move-selection engine.
//!
//! Given a board and the side to move, [`engine::Engine`] returns one move:
//! from a short opening book, or from a depth-limited alpha-beta search over
//! legal moves scored by material and piece-square tables. Castling, en
//! passant, promotion and draw detection are not modeled.

pub mod board;
pub mod book;
pub mod chess_move;
pub mod engine;
pub mod evaluate;
pub mod move_generation;
pub mod searcher;

pub use common::square;
