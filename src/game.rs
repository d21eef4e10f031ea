use crate::board::{BoardState, Mark, Outcome, Position};
use crate::error::{GameError, Result};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::strategy::{MoveStrategy, Strategy};
use std::time::Duration;
use tracing::{debug, info};

/// Pause before the engine answers a human move.
pub const DEFAULT_ENGINE_DELAY: Duration = Duration::from_millis(500);
/// How long a finished game stays on screen before the next one starts.
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(3);

/// Pacing hints for front ends. The session itself never sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub engine_delay: Duration,
    pub restart_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine_delay: DEFAULT_ENGINE_DELAY,
            restart_delay: DEFAULT_RESTART_DELAY,
        }
    }
}

/// One human against one engine opponent.
///
/// Unless pinned by the builder, each new game flips a coin for the human's mark and
/// another for who moves first.
pub struct Game<S: MoveStrategy = Strategy, K: RandomGenerator = StandardRandomGenerator> {
    board: BoardState,
    human: Mark,
    strategy: S,
    random: K,
    config: GameConfig,
    fixed_human: Option<Mark>,
    fixed_first: Option<Mark>,
    outcome: Outcome,
}

/// A builder for creating instances of `Game`.
pub struct GameBuilder<S: MoveStrategy, K: RandomGenerator> {
    strategy: S,
    random: K,
    config: GameConfig,
    human: Option<Mark>,
    first: Option<Mark>,
}

impl<S: MoveStrategy, K: RandomGenerator> GameBuilder<S, K> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            random: K::default(),
            config: GameConfig::default(),
            human: None,
            first: None,
        }
    }

    /// Sets the generator used for side assignment.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random = rg;
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Always gives the human `mark`. [`Mark::Empty`] restores the coin flip.
    pub fn with_human_mark(mut self, mark: Mark) -> Self {
        self.human = (!mark.is_empty()).then_some(mark);
        self
    }

    /// Always lets `mark` move first. [`Mark::Empty`] restores the coin flip.
    pub fn with_first_turn(mut self, mark: Mark) -> Self {
        self.first = (!mark.is_empty()).then_some(mark);
        self
    }

    pub fn build(self) -> Game<S, K> {
        let mut game = Game {
            board: BoardState::default(),
            human: Mark::X,
            strategy: self.strategy,
            random: self.random,
            config: self.config,
            fixed_human: self.human,
            fixed_first: self.first,
            outcome: Outcome::InProgress,
        };
        game.restart();
        game
    }
}

impl<S: MoveStrategy, K: RandomGenerator> Game<S, K> {
    /// Returns a new builder for `Game`.
    pub fn builder(strategy: S) -> GameBuilder<S, K> {
        GameBuilder::new(strategy)
    }

    /// Throws the current board away and starts a fresh game.
    pub fn restart(&mut self) {
        self.human = match self.fixed_human {
            Some(mark) => mark,
            None => self.flip_mark(),
        };
        let first = match self.fixed_first {
            Some(mark) => mark,
            None => self.flip_mark(),
        };
        self.board = BoardState::new(first);
        self.outcome = Outcome::InProgress;
        info!(human = %self.human, engine = %self.engine_mark(), first = %first, "new game");
    }

    /// Plays the human's mark at `(row, col)` and hands the turn to the engine.
    pub fn human_move(&mut self, row: usize, col: usize) -> Result<Outcome> {
        self.check_turn(self.human)?;
        self.board.place(row, col, self.human)?;
        debug!(mark = %self.human, row, col, "human move");
        Ok(self.finish_move())
    }

    /// Asks the strategy for a cell, plays it, and hands the turn back to the human.
    pub fn engine_move(&mut self) -> Result<Position> {
        let engine = self.engine_mark();
        self.check_turn(engine)?;
        let cell = self.strategy.choose_move(&self.board, engine);
        self.board.place(cell.row, cell.col, engine)?;
        debug!(mark = %engine, %cell, "engine move");
        self.finish_move();
        Ok(cell)
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn human_mark(&self) -> Mark {
        self.human
    }

    pub fn engine_mark(&self) -> Mark {
        self.human.opponent().unwrap_or(Mark::O)
    }

    pub fn is_engine_turn(&self) -> bool {
        !self.is_over() && self.board.turn() == self.engine_mark()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    fn check_turn(&self, mark: Mark) -> Result<()> {
        if self.is_over() {
            return Err(GameError::GameOver(self.outcome));
        }
        if self.board.turn() != mark {
            return Err(GameError::NotYourTurn(self.board.turn()));
        }
        Ok(())
    }

    fn finish_move(&mut self) -> Outcome {
        self.board.advance_turn();
        self.outcome = self.board.evaluate_terminal();
        if self.outcome.is_terminal() {
            info!(outcome = %self.outcome, "game over");
        }
        self.outcome
    }

    fn flip_mark(&mut self) -> Mark {
        if self.random.coin_flip() { Mark::O } else { Mark::X }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{BoardState, Mark, Outcome, Position};
    use crate::error::{GameError, IllegalMove};
    use crate::game::{Game, GameConfig};
    use crate::random::SeededRandomGenerator;
    use crate::strategy::{MinimaxStrategy, MoveStrategy, Strategy};
    use std::collections::HashSet;
    use std::time::Duration;

    type TestGame = Game<Strategy<SeededRandomGenerator>, SeededRandomGenerator>;

    fn minimax_game(human: Mark, first: Mark) -> TestGame {
        Game::builder(Strategy::default())
            .with_random_generator(SeededRandomGenerator::default())
            .with_human_mark(human)
            .with_first_turn(first)
            .build()
    }

    #[test]
    fn test1_engine_answers_human() {
        // arrange
        let mut game = minimax_game(Mark::X, Mark::X);

        // act
        let outcome = game.human_move(0, 0).unwrap();
        let reply = game.engine_move().unwrap();

        // assert
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(reply, Position::new(1, 1));
        assert_eq!(game.board().cell(1, 1), Some(Mark::O));
        assert_eq!(game.board().turn(), Mark::X);
        assert!(!game.is_engine_turn());
    }

    #[test]
    fn test2_turn_order_is_enforced() {
        let mut game = minimax_game(Mark::O, Mark::X);
        assert!(game.is_engine_turn());
        assert_eq!(game.human_move(0, 0), Err(GameError::NotYourTurn(Mark::X)));

        game.engine_move().unwrap();
        assert_eq!(game.engine_move(), Err(GameError::NotYourTurn(Mark::O)));
    }

    #[test]
    fn test3_illegal_move_keeps_turn() {
        // arrange
        let mut game = minimax_game(Mark::X, Mark::O);
        let taken = game.engine_move().unwrap();
        let before = game.board().clone();

        // act
        let occupied = game.human_move(taken.row, taken.col);
        let outside = game.human_move(5, 1);

        // assert
        assert_eq!(
            occupied,
            Err(GameError::IllegalMove(IllegalMove::Occupied {
                row: taken.row,
                col: taken.col,
                mark: Mark::O
            }))
        );
        assert_eq!(outside, Err(GameError::IllegalMove(IllegalMove::OutOfBounds { row: 5, col: 1 })));
        assert_eq!(game.board(), &before);
        assert_eq!(game.board().turn(), Mark::X);
    }

    #[test]
    fn test4_finished_game_rejects_moves() {
        let mut game: TestGame = Game::builder(Strategy::random(SeededRandomGenerator::new(5)))
            .with_random_generator(SeededRandomGenerator::default())
            .with_human_mark(Mark::X)
            .with_first_turn(Mark::X)
            .build();

        // the human goes for the top row and takes whatever the random engine leaves
        let mut result = Outcome::InProgress;
        while !game.is_over() {
            let target = [(0, 0), (0, 1), (0, 2)]
                .into_iter()
                .find(|&(r, c)| game.board().cell(r, c) == Some(Mark::Empty))
                .or_else(|| game.board().empty_cells().first().map(|p| (p.row, p.col)));
            let Some((r, c)) = target else { break };
            result = game.human_move(r, c).unwrap();
            if !game.is_over() {
                game.engine_move().unwrap();
                result = game.outcome();
            }
        }

        assert!(result.is_terminal());
        assert_eq!(game.outcome(), result);
        assert_eq!(game.human_move(0, 0), Err(GameError::GameOver(result)));
        assert!(matches!(game.engine_move(), Err(GameError::GameOver(_))));
    }

    #[test]
    fn test5_perfect_engine_draws_perfect_human() {
        let helper = MinimaxStrategy::default();
        for first in [Mark::X, Mark::O] {
            let mut game = minimax_game(Mark::X, first);
            while !game.is_over() {
                if game.is_engine_turn() {
                    game.engine_move().unwrap();
                } else {
                    let mut scratch = game.board().clone();
                    let p = helper.engine().best_move(&mut scratch, Mark::X);
                    game.human_move(p.row, p.col).unwrap();
                }
            }
            assert_eq!(game.outcome(), Outcome::Draw);
        }
    }

    #[test]
    fn test6_restart_flips_sides() {
        let mut game: TestGame = Game::builder(Strategy::default())
            .with_random_generator(SeededRandomGenerator::new(9))
            .build();

        let mut humans = HashSet::new();
        let mut firsts = HashSet::new();
        for _ in 0..64 {
            game.restart();
            assert_eq!(game.board().empty_cells().len(), 9);
            assert_eq!(game.outcome(), Outcome::InProgress);
            assert_ne!(game.human_mark(), game.engine_mark());
            humans.insert(game.human_mark());
            firsts.insert(game.board().turn());
        }
        assert_eq!(humans.len(), 2);
        assert_eq!(firsts.len(), 2);
    }

    /// Always plays the first empty cell.
    struct FirstEmpty;

    impl MoveStrategy for FirstEmpty {
        fn choose_move(&mut self, board: &BoardState, _self_mark: Mark) -> Position {
            board.empty_cells()[0]
        }
    }

    #[test]
    fn test8_human_win_ends_the_game() {
        // arrange
        let mut game: Game<FirstEmpty, SeededRandomGenerator> = Game::builder(FirstEmpty)
            .with_human_mark(Mark::X)
            .with_first_turn(Mark::X)
            .build();

        // act: X takes column 0 while O fills row 0 from the left
        for (row, col) in [(0, 0), (1, 0)] {
            assert_eq!(game.human_move(row, col), Ok(Outcome::InProgress));
            game.engine_move().unwrap();
        }
        let result = game.human_move(2, 0);

        // assert
        assert_eq!(result, Ok(Outcome::Win(Mark::X)));
        assert_eq!(game.outcome(), Outcome::Win(Mark::X));
        assert!(game.is_over());
        assert!(!game.is_engine_turn());
        assert_eq!(game.engine_move(), Err(GameError::GameOver(Outcome::Win(Mark::X))));
    }

    #[test]
    fn test7_config_defaults() {
        let game = minimax_game(Mark::O, Mark::O);
        assert_eq!(game.config().engine_delay, Duration::from_millis(500));
        assert_eq!(game.config().restart_delay, Duration::from_secs(3));
        assert_eq!(game.strategy().name(), "minimax");

        let fast = GameConfig {
            engine_delay: Duration::ZERO,
            restart_delay: Duration::ZERO,
        };
        let game: TestGame = Game::builder(Strategy::default()).with_config(fast).build();
        assert_eq!(game.config(), &fast);
    }
}
