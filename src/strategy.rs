use crate::board::{BoardState, Mark, Position};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::search::SearchEngine;
use tracing::debug;

/// How an opponent decides on its next cell.
pub trait MoveStrategy {
    /// Picks an empty cell for `self_mark`. The live board is never modified.
    ///
    /// # Panics
    ///
    /// Implementations panic when the game is already over.
    fn choose_move(&mut self, board: &BoardState, self_mark: Mark) -> Position;
}

/// Plays a uniformly random empty cell.
#[derive(Debug, Default, Clone)]
pub struct RandomStrategy<K: RandomGenerator = StandardRandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomStrategy<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }
}

impl<K: RandomGenerator> MoveStrategy for RandomStrategy<K> {
    fn choose_move(&mut self, board: &BoardState, self_mark: Mark) -> Position {
        let outcome = board.evaluate_terminal();
        if outcome.is_terminal() {
            panic!("BUG: choosing a move in a finished position ({outcome})");
        }
        let cells = board.empty_cells();
        let Some(&cell) = self.random.choose(&cells) else {
            panic!("BUG: no empty cell on a board that is not terminal");
        };
        debug!(mark = %self_mark, %cell, "random move");
        cell
    }
}

/// Plays the move found by a [`SearchEngine`].
#[derive(Debug, Default, Clone)]
pub struct MinimaxStrategy {
    engine: SearchEngine,
}

impl MinimaxStrategy {
    pub fn new(engine: SearchEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

impl MoveStrategy for MinimaxStrategy {
    fn choose_move(&mut self, board: &BoardState, self_mark: Mark) -> Position {
        let mut scratch = board.clone();
        self.engine.best_move(&mut scratch, self_mark)
    }
}

/// Either opponent, chosen at runtime.
#[derive(Debug, Clone)]
pub enum Strategy<K: RandomGenerator = StandardRandomGenerator> {
    Random(RandomStrategy<K>),
    Minimax(MinimaxStrategy),
}

impl<K: RandomGenerator> Default for Strategy<K> {
    /// A full-depth minimax opponent.
    fn default() -> Self {
        Strategy::Minimax(MinimaxStrategy::default())
    }
}

impl<K: RandomGenerator> Strategy<K> {
    pub fn random(random: K) -> Self {
        Strategy::Random(RandomStrategy::new(random))
    }

    pub fn minimax(engine: SearchEngine) -> Self {
        Strategy::Minimax(MinimaxStrategy::new(engine))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random(_) => "random",
            Strategy::Minimax(_) => "minimax",
        }
    }
}

impl<K: RandomGenerator> MoveStrategy for Strategy<K> {
    fn choose_move(&mut self, board: &BoardState, self_mark: Mark) -> Position {
        match self {
            Strategy::Random(s) => s.choose_move(board, self_mark),
            Strategy::Minimax(s) => s.choose_move(board, self_mark),
        }
    }
}
