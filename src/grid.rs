// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Cell;

/// Error conditions which may occur when constructing a [Grid] from rows of cells.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// Represents the static topology of a rectangular search area:
/// its dimensions and which cells can't be entered.
///
/// Search state is never stored in the grid, so a single grid
/// may be shared by any number of concurrent [searches](crate::search).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
}

impl Grid {
    /// Creates a grid with the given dimensions and no walls.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            walls: vec![false; rows * cols],
        }
    }

    /// Creates a grid where every cell is a wall.
    pub fn filled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            walls: vec![true; rows * cols],
        }
    }

    /// Creates a grid from a row-major wall mask (`true` marks a wall).
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_walls(walls: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let cols = walls.first().map(|row| row.len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        if let Some((row, got)) = walls
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(GridError::NonRectangular {
                row,
                expected: cols,
                got,
            });
        }

        Ok(Self {
            rows: walls.len(),
            cols,
            walls: walls.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of cells in the grid.
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Checks whether the cell lies within the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Returns true if the cell is a wall. Cells outside the grid are not walls,
    /// but are never [contained](Grid::contains) either.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.index(cell).map(|i| self.walls[i]).unwrap_or(false)
    }

    /// Marks or unmarks a cell as a wall. Cells outside the grid are ignored.
    pub fn set_wall(&mut self, cell: Cell, wall: bool) {
        if let Some(i) = self.index(cell) {
            self.walls[i] = wall;
        }
    }

    /// Returns the number of cells which are not walls.
    pub fn open_count(&self) -> usize {
        self.walls.iter().filter(|&&w| !w).count()
    }

    /// Returns an iterator over all cells, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell { row, col }))
    }

    /// Returns the orthogonal neighbors of a cell which lie within the grid,
    /// in row-major order: up, left, right, down. Walls are included.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let Cell { row, col } = cell;
        let up = (row > 0).then(|| Cell::new(row - 1, col));
        let left = (col > 0).then(|| Cell::new(row, col - 1));
        let right = (col + 1 < self.cols).then(|| Cell::new(row, col + 1));
        let down = (row + 1 < self.rows).then(|| Cell::new(row + 1, col));
        [up, left, right, down].into_iter().flatten()
    }

    /// Converts a cell into its row-major position, or `None` if the cell lies outside the grid.
    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    /// Converts a row-major position back into a cell.
    pub(crate) fn cell(&self, index: usize) -> Cell {
        debug_assert!(index < self.len());
        Cell {
            row: index / self.cols,
            col: index % self.cols,
        }
    }
}
