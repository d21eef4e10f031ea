use crate::error::IllegalMove;
use std::fmt;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// All eight lines that win the game: three rows, three columns, then both diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
    [Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)],
    [Position::new(2, 0), Position::new(2, 1), Position::new(2, 2)],
    [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
    [Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
    [Position::new(0, 2), Position::new(1, 2), Position::new(2, 2)],
    [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)],
    [Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)],
];

/// The content of a single cell.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mark {
    /// Nobody has played here yet.
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    /// Returns the other side, or `None` for [`Mark::Empty`].
    pub const fn opponent(self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Mark::Empty => ".",
            Mark::X => "X",
            Mark::O => "O",
        };
        f.write_str(symbol)
    }
}

/// A cell coordinate, `row` and `col` both in `0..3`.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Represents the possible outcomes of a position.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Outcome {
    /// The game is still ongoing.
    InProgress,
    /// The given mark completed a line.
    Win(Mark),
    /// The board is full and nobody completed a line.
    Draw,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => f.write_str("in progress"),
            Outcome::Win(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// The 3x3 grid plus whose real move is next.
///
/// Placement and turn advancement are separate operations: [`BoardState::place`] and
/// [`BoardState::undo`] only touch the grid, which lets the search engine explore
/// hypothetical moves without disturbing the live turn.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct BoardState {
    grid: [[Mark; BOARD_SIZE]; BOARD_SIZE],
    turn: Mark,
}

impl Default for BoardState {
    /// Creates an empty board with 'X' to move.
    fn default() -> Self {
        BoardState::new(Mark::X)
    }
}

impl BoardState {
    /// Creates an empty board where `turn` moves first.
    ///
    /// # Panics
    ///
    /// Panics if `turn` is [`Mark::Empty`].
    pub fn new(turn: Mark) -> Self {
        assert!(!turn.is_empty(), "BUG: the side to move cannot be empty");
        Self {
            grid: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
            turn,
        }
    }

    /// Returns the mark whose real move is next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Hands the move to the other side.
    pub fn advance_turn(&mut self) {
        if let Some(next) = self.turn.opponent() {
            self.turn = next;
        }
    }

    /// Returns the mark at `(row, col)`, or `None` if the coordinate is off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Puts `mark` into an empty cell. The turn is left as it is.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), IllegalMove> {
        if mark.is_empty() {
            return Err(IllegalMove::EmptyMark);
        }
        match self.cell(row, col) {
            None => Err(IllegalMove::OutOfBounds { row, col }),
            Some(Mark::Empty) => {
                self.grid[row][col] = mark;
                Ok(())
            }
            Some(taken) => Err(IllegalMove::Occupied {
                row,
                col,
                mark: taken,
            }),
        }
    }

    /// Clears a cell again. Only meant for backtracking after [`BoardState::place`].
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is off the board.
    pub fn undo(&mut self, row: usize, col: usize) {
        self.grid[row][col] = Mark::Empty;
    }

    /// Returns the first line held entirely by one mark, together with that mark.
    pub fn winning_line(&self) -> Option<(Mark, [Position; 3])> {
        WINNING_LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|p| self.grid[p.row][p.col]);
            (!a.is_empty() && a == b && a == c).then_some((a, *line))
        })
    }

    /// Classifies the position. All eight lines are checked before a full board counts as a draw.
    pub fn evaluate_terminal(&self) -> Outcome {
        if let Some((mark, _)) = self.winning_line() {
            return Outcome::Win(mark);
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Returns the unoccupied cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        all_positions()
            .filter(|p| self.grid[p.row][p.col].is_empty())
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.grid.iter().flatten().all(|m| !m.is_empty())
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.grid.iter().flatten().filter(|&&m| m == mark).count()
    }
}

fn all_positions() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, mark) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{mark}")?;
            }
        }
        Ok(())
    }
}
