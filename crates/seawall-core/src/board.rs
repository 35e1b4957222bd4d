//! Game board representation and outcome queries.
//!
//! This module contains:
//! - The `Mark` symbol players stamp into cells
//! - The square `Board` grid, replaced wholesale on every move
//! - Win detection, full-board detection, and expansion with recentering

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size must be at least 1, got {0}")]
    InvalidSize(usize),

    #[error("cannot expand a {from}x{from} board to {to}x{to}")]
    InvalidExpansion { from: usize, to: usize },
}

/// A symbol stamped into a cell.
///
/// The Rat fights for the land, the Octopus for the sea. Cells hold
/// `Option<Mark>`, with `None` for an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Rat,
    Octopus,
}

impl Mark {
    /// Both symbols
    pub const ALL: [Mark; 2] = [Mark::Rat, Mark::Octopus];

    /// The opposing symbol
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::Rat => Mark::Octopus,
            Mark::Octopus => Mark::Rat,
        }
    }

    /// Single-letter form used in rendered boards
    pub fn letter(&self) -> char {
        match self {
            Mark::Rat => 'R',
            Mark::Octopus => 'O',
        }
    }

    /// Display name for this character
    pub fn display_name(&self) -> &'static str {
        match self {
            Mark::Rat => "Rat",
            Mark::Octopus => "Octopus",
        }
    }
}

/// A square grid of cells.
///
/// Boards are value snapshots: applying a move produces a new board and
/// leaves the input untouched, which is what keeps the move history
/// usable for undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// Create an empty `size` x `size` board.
    ///
    /// Any positive size is accepted here; the session layer restricts
    /// play to the odd progression 3, 5, 7, 9.
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether (row, col) lies on the board
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// The cell at (row, col), or `None` when empty or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells[row * self.size + col]
    }

    /// Whether (row, col) is on the board and unoccupied
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.in_bounds(row, col) && self.get(row, col).is_none()
    }

    /// A copy of this board with `mark` placed at (row, col).
    ///
    /// Callers validate through `is_open` first; an occupied or
    /// out-of-bounds target returns the board unchanged.
    pub fn with_move(&self, row: usize, col: usize, mark: Mark) -> Board {
        let mut next = self.clone();
        if next.is_open(row, col) {
            next.cells[row * next.size + col] = Some(mark);
        }
        next
    }

    /// Whether `mark` has `win_length` consecutive cells in any row,
    /// column, or diagonal.
    ///
    /// Scans the whole board at every legal offset rather than assuming
    /// anything about where the last move landed. O(N² · L) with N ≤ 9.
    pub fn has_win(&self, mark: Mark, win_length: usize) -> bool {
        if win_length == 0 || win_length > self.size {
            return false;
        }
        let size = self.size;
        let target = Some(mark);

        // Rows
        for row in 0..size {
            for col in 0..=size - win_length {
                if (0..win_length).all(|i| self.get(row, col + i) == target) {
                    return true;
                }
            }
        }

        // Columns
        for col in 0..size {
            for row in 0..=size - win_length {
                if (0..win_length).all(|i| self.get(row + i, col) == target) {
                    return true;
                }
            }
        }

        // Diagonal, top-left to bottom-right
        for row in 0..=size - win_length {
            for col in 0..=size - win_length {
                if (0..win_length).all(|i| self.get(row + i, col + i) == target) {
                    return true;
                }
            }
        }

        // Diagonal, top-right to bottom-left
        for row in 0..=size - win_length {
            for col in win_length - 1..size {
                if (0..win_length).all(|i| self.get(row + i, col - i) == target) {
                    return true;
                }
            }
        }

        false
    }

    /// Whether every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Number of unoccupied cells
    pub fn open_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// A new `new_size` board with this board's contents centered.
    ///
    /// Cells outside the old footprint are empty. The centering offset is
    /// `(new_size - old_size) / 2`.
    pub fn expanded(&self, new_size: usize) -> Result<Board, BoardError> {
        if new_size <= self.size {
            return Err(BoardError::InvalidExpansion {
                from: self.size,
                to: new_size,
            });
        }
        let offset = (new_size - self.size) / 2;
        let mut next = Board::empty(new_size)?;
        for row in 0..self.size {
            for col in 0..self.size {
                next.cells[(row + offset) * new_size + (col + offset)] = self.get(row, col);
            }
        }
        Ok(next)
    }

    /// One row of cells, for rendering
    pub fn row(&self, row: usize) -> &[Option<Mark>] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }
}
