// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Cell, Grid};

/// Presentation state of a [Cell] announced by an [Event].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// The cell's distance from the start has been finalized.
    Visited,

    /// The cell lies on the shortest path from the start to the end.
    Path,
}

/// A single step of a search, in a form suitable for progressive display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event {
    pub cell: Cell,
    pub state: CellState,
}

/// Per-search state of every cell of a [Grid], together with the order
/// in which cells were finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    rows: usize,
    cols: usize,
    start: Cell,
    end: Cell,
    pub(super) distances: Vec<Option<usize>>,
    pub(super) visited: Vec<bool>,
    pub(super) previous: Vec<Option<usize>>,
    pub(super) order: Vec<Cell>,
}

impl SearchResult {
    /// Creates the initial state: every cell unvisited, without predecessors,
    /// and infinitely far away - except for `start`, which is at distance zero.
    pub(super) fn new(grid: &Grid, start: Cell, end: Cell) -> Self {
        let mut distances = vec![None; grid.len()];
        if let Some(i) = grid.index(start) {
            distances[i] = Some(0);
        }

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            start,
            end,
            distances,
            visited: vec![false; grid.len()],
            previous: vec![None; grid.len()],
            order: Vec::default(),
        }
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    /// Returns all finalized cells, in the order they were finalized.
    /// Their distances never decrease along the slice.
    pub fn visited_in_order(&self) -> &[Cell] {
        &self.order
    }

    /// Returns true if the end cell was finalized.
    pub fn reached_end(&self) -> bool {
        self.is_visited(self.end)
    }

    /// Returns the number of moves from the start to the given cell,
    /// or `None` if no route to the cell has been discovered.
    ///
    /// The distance is final only if the cell [is visited](SearchResult::is_visited).
    pub fn distance(&self, cell: Cell) -> Option<usize> {
        self.index(cell).and_then(|i| self.distances[i])
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.index(cell).map(|i| self.visited[i]).unwrap_or(false)
    }

    /// Returns the predecessor of a cell on the best known route from the start.
    pub fn previous(&self, cell: Cell) -> Option<Cell> {
        self.index(cell)
            .and_then(|i| self.previous[i])
            .map(|i| self.cell(i))
    }

    /// Follows predecessors from `target` back to the start, and returns
    /// the encountered cells in travel order (start first, `target` last).
    ///
    /// If no route to `target` was discovered, returns `[target]`. Use
    /// [path_to](SearchResult::path_to) to tell such cases apart from `target == start`.
    pub fn reconstruct_path(&self, target: Cell) -> Vec<Cell> {
        let mut path = vec![target];
        let mut last = self.index(target);

        while let Some(nd) = last.and_then(|i| self.previous[i]) {
            path.push(self.cell(nd));
            last = Some(nd);
        }

        path.reverse();
        return path;
    }

    /// Returns the shortest path from the start to a finalized `target`,
    /// or `None` if `target` wasn't finalized.
    pub fn path_to(&self, target: Cell) -> Option<Vec<Cell>> {
        if self.is_visited(target) {
            Some(self.reconstruct_path(target))
        } else {
            None
        }
    }

    /// Returns the shortest path from the start to the end, if the end was reached.
    pub fn shortest_path(&self) -> Option<Vec<Cell>> {
        self.path_to(self.end)
    }

    /// Returns an iterator of [Events](Event) replaying the search: first every
    /// finalized cell as [CellState::Visited], then (if the end was reached)
    /// every cell of the shortest path as [CellState::Path].
    pub fn events(&self) -> impl Iterator<Item = Event> + '_ {
        let visited = self.order.iter().map(|&cell| Event {
            cell,
            state: CellState::Visited,
        });

        let path = self
            .shortest_path()
            .unwrap_or_default()
            .into_iter()
            .map(|cell| Event {
                cell,
                state: CellState::Path,
            });

        visited.chain(path)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.row < self.rows && cell.col < self.cols {
            Some(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    fn cell(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }
}
