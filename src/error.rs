use crate::board::{Mark, Outcome};
use thiserror::Error;

/// A placement the board refuses to make.
///
/// Rejected placements leave the board untouched, so callers can simply drop the input
/// and wait for another one.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum IllegalMove {
    #[error("cell ({row}, {col}) is outside the 3x3 board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already taken by {mark}")]
    Occupied { row: usize, col: usize, mark: Mark },

    #[error("an empty mark cannot be placed")]
    EmptyMark,
}

/// Errors returned by a [`Game`](crate::game::Game) session.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameError {
    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),

    #[error("it is {0}'s turn")]
    NotYourTurn(Mark),

    #[error("the game is already over: {0}")]
    GameOver(Outcome),
}

/// Convenience result type for board and game operations.
pub type Result<T, E = GameError> = std::result::Result<T, E>;
