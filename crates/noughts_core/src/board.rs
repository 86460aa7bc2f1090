//! Board representation and line-based win/draw detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// The eight winning triples: rows, columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A participant's symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Mark {
    /// Nought (player one, moves first).
    O,
    /// Cross (player two).
    X,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::O => Mark::X,
            Mark::X => Mark::O,
        }
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Unoccupied cell.
    #[default]
    Empty,
    /// Cell holding a mark.
    Marked(Mark),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Number of addressable cells.
    pub const CELLS: usize = 9;

    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a full set of cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Returns the state of the cell at `index` (0-8).
    pub fn mark_at(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Overwrites the cell at `index`.
    ///
    /// No occupancy check is made; the engine relies on this to place and
    /// retract provisional marks.
    pub fn set_mark_at(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        self.cells[index] == Cell::Empty
    }

    /// Returns a copy of every cell, independent of later mutation.
    pub fn snapshot(&self) -> [Cell; 9] {
        self.cells
    }

    /// Overwrites the whole board from a prior snapshot.
    pub fn restore(&mut self, cells: [Cell; 9]) {
        self.cells = cells;
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Counts occurrences of `mark` among the three cells of `LINES[line]`.
    pub fn count_marks(&self, mark: Mark, line: usize) -> usize {
        LINES[line]
            .iter()
            .filter(|&&i| self.cells[i] == Cell::Marked(mark))
            .count()
    }

    /// Checks whether `mark` fills any winning line.
    pub fn has_win(&self, mark: Mark) -> bool {
        (0..LINES.len()).any(|line| self.count_marks(mark, line) == 3)
    }

    /// Checks if the board is full (all cells occupied).
    ///
    /// A full board with no winner indicates a draw.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Returns the mark holding a complete line, if any.
    #[instrument(level = "trace", skip(self))]
    pub fn winner(&self) -> Option<Mark> {
        [Mark::O, Mark::X]
            .into_iter()
            .find(|&mark| self.has_win(mark))
    }

    /// Iterates over the indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
    }
}

impl fmt::Display for Board {
    /// Renders the grid with 1-based numbers in empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Marked(mark) => write!(f, "{mark}")?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
