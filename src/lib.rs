//! Tic-tac-toe game state and a perfect-play opponent.
//!
//! The crate is split into a 3x3 board model that knows how to place marks and detect
//! finished games, and a minimax search with alpha-beta pruning that picks the best
//! reply for either side. A small session type ties both together with the turn and
//! side bookkeeping a front end needs; rendering and input are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use ttt_engine::board::{BoardState, Mark, Outcome};
//! use ttt_engine::search::SearchEngine;
//!
//! // X to move on an empty board
//! let mut board = BoardState::new(Mark::X);
//! let engine = SearchEngine::builder().build();
//!
//! // Play the engine against itself until the game ends
//! while board.evaluate_terminal() == Outcome::InProgress {
//!     let mark = board.turn();
//!     let cell = engine.best_move(&mut board, mark);
//!     board.place(cell.row, cell.col, mark).unwrap();
//!     board.advance_turn();
//! }
//!
//! // Perfect play from both sides always ends in a draw
//! assert_eq!(board.evaluate_terminal(), Outcome::Draw);
//! ```

/// The 3x3 board, its marks and terminal-state detection.
pub mod board;
/// Errors returned by the board and the game session.
pub mod error;
/// A human-versus-engine session with turn and side bookkeeping.
pub mod game;
/// Traits and implementations for random number generation.
pub mod random;
/// Minimax search with alpha-beta pruning.
pub mod search;
/// The `MoveStrategy` trait and the random and minimax opponents.
pub mod strategy;

pub use board::{BoardState, Mark, Outcome, Position};
pub use error::{GameError, IllegalMove};
pub use game::{Game, GameBuilder, GameConfig};
pub use search::{SearchEngine, SearchReport};
pub use strategy::{MinimaxStrategy, MoveStrategy, RandomStrategy, Strategy};
