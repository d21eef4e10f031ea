use crate::board::{BoardState, Mark, Outcome, Position};
use tracing::{debug, trace};

/// Score of a position won by the searching side.
pub const WIN_SCORE: i32 = 1;
/// Score of a drawn position, and of any non-terminal position at the depth cutoff.
pub const DRAW_SCORE: i32 = 0;
/// Score of a position won by the opponent.
pub const LOSS_SCORE: i32 = -1;

/// Depth-limited minimax with alpha-beta pruning.
///
/// Scores are always taken from the perspective of the mark passed in as "self" at the
/// root: maximizing plies place that mark, minimizing plies place the opponent's. The
/// board's own turn field is never consulted or changed.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    max_depth: Option<u32>,
}

/// A builder for creating instances of `SearchEngine`.
#[derive(Debug, Clone, Default)]
pub struct SearchEngineBuilder {
    max_depth: Option<u32>,
}

impl SearchEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the search to `plies` moves, counting the root move. Clamped to at least 1.
    pub fn with_max_depth(mut self, plies: u32) -> Self {
        self.max_depth = Some(plies.max(1));
        self
    }

    /// Searches every line to the end of the game. This is the default.
    pub fn with_full_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.max_depth)
    }
}

/// Result of a root search.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SearchReport {
    /// The chosen cell. Ties go to the first cell in row-major order.
    pub best_move: Position,
    /// Minimax value of `best_move` for the searching side.
    pub score: i32,
    /// Positions visited below the root.
    pub nodes: u64,
}

impl SearchEngine {
    /// Returns a new builder for `SearchEngine`.
    pub fn builder() -> SearchEngineBuilder {
        SearchEngineBuilder::new()
    }

    /// `None` searches to the end of the game.
    pub fn new(max_depth: Option<u32>) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    /// Picks the best cell for `self_mark`, assuming the opponent also plays perfectly.
    ///
    /// The board is used as scratch space for place/undo pairs and is handed back in
    /// exactly the state it came in. Committing the move is up to the caller.
    ///
    /// # Panics
    ///
    /// Panics if the position is already won or drawn, or if `self_mark` is
    /// [`Mark::Empty`].
    pub fn best_move(&self, board: &mut BoardState, self_mark: Mark) -> Position {
        self.analyze(board, self_mark).best_move
    }

    /// The minimax value of the position for `self_mark`, who is about to move.
    pub fn evaluate(&self, board: &mut BoardState, self_mark: Mark) -> i32 {
        self.analyze(board, self_mark).score
    }

    /// Runs the root search and reports the chosen move, its value and the work done.
    pub fn analyze(&self, board: &mut BoardState, self_mark: Mark) -> SearchReport {
        let outcome = board.evaluate_terminal();
        if outcome.is_terminal() {
            panic!("BUG: searching a finished position ({outcome})");
        }

        let mut searcher = Searcher::new(board, self_mark);

        // completing a line now beats any win that is only forced later
        if let Some(best_move) = searcher.immediate_win() {
            debug!(mark = %self_mark, %best_move, "winning move");
            return SearchReport {
                best_move,
                score: WIN_SCORE,
                nodes: searcher.nodes,
            };
        }

        let child_depth = self.max_depth.map(|d| d.saturating_sub(1));
        let mut best: Option<(Position, i32)> = None;
        let mut alpha = i32::MIN;

        for cell in searcher.board.empty_cells() {
            let score = searcher.explore(cell, self_mark, child_depth, alpha, i32::MAX, false);
            trace!(%cell, score, "root move scored");
            // strictly greater: the earliest cell keeps ties
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((cell, score));
            }
            alpha = alpha.max(score);
        }

        let Some((best_move, score)) = best else {
            panic!("BUG: no empty cell on a board that is not terminal");
        };

        debug!(
            mark = %self_mark,
            %best_move,
            score,
            nodes = searcher.nodes,
            "search finished"
        );

        SearchReport {
            best_move,
            score,
            nodes: searcher.nodes,
        }
    }

    /// Scores the position after a hypothetical move, from `self_mark`'s point of view.
    ///
    /// `maximizing` says whose ply comes next: `true` places `self_mark`, `false` places
    /// its opponent. A finished position is scored before the depth is looked at; a
    /// position reached with `depth == Some(0)` scores as a draw. `None` never cuts off.
    pub fn search(
        &self,
        board: &mut BoardState,
        self_mark: Mark,
        depth: Option<u32>,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        Searcher::new(board, self_mark).minimax(depth, alpha, beta, maximizing)
    }
}

/// One search over a borrowed board. Every `place` is matched by an `undo` before
/// control leaves `explore`.
struct Searcher<'a> {
    board: &'a mut BoardState,
    me: Mark,
    opponent: Mark,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    fn new(board: &'a mut BoardState, me: Mark) -> Self {
        let Some(opponent) = me.opponent() else {
            panic!("BUG: the searching side cannot be empty");
        };
        Self {
            board,
            me,
            opponent,
            nodes: 0,
        }
    }

    /// The first empty cell, in row-major order, that completes a line for `me`.
    fn immediate_win(&mut self) -> Option<Position> {
        self.board.empty_cells().into_iter().find(|cell| {
            if let Err(e) = self.board.place(cell.row, cell.col, self.me) {
                panic!("BUG: search tried an illegal move: {e}");
            }
            self.nodes += 1;
            let won = self.board.evaluate_terminal() == Outcome::Win(self.me);
            self.board.undo(cell.row, cell.col);
            won
        })
    }

    fn explore(
        &mut self,
        cell: Position,
        mark: Mark,
        depth: Option<u32>,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        if let Err(e) = self.board.place(cell.row, cell.col, mark) {
            panic!("BUG: search tried an illegal move: {e}");
        }
        let score = self.minimax(depth, alpha, beta, maximizing);
        self.board.undo(cell.row, cell.col);
        score
    }

    fn minimax(&mut self, depth: Option<u32>, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes += 1;

        match self.board.evaluate_terminal() {
            Outcome::Win(mark) if mark == self.me => return WIN_SCORE,
            Outcome::Win(_) => return LOSS_SCORE,
            Outcome::Draw => return DRAW_SCORE,
            Outcome::InProgress => {}
        }

        if depth == Some(0) {
            return DRAW_SCORE;
        }
        let next_depth = depth.map(|d| d - 1);

        if maximizing {
            let mut max_eval = i32::MIN;
            for cell in self.board.empty_cells() {
                let eval = self.explore(cell, self.me, next_depth, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for cell in self.board.empty_cells() {
                let eval = self.explore(cell, self.opponent, next_depth, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}
