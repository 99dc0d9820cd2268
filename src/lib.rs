// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Uniform-cost shortest-path search over rectangular grids.
//!
//! A [Grid] describes static topology: its shape and which cells are walls.
//! [search] runs [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! with unit edge costs between orthogonally adjacent open cells, and returns a
//! [SearchResult] with the order in which cells were finalized and the means to
//! reconstruct the shortest path.
//!
//! Grids can be built by hand, parsed from [ASCII art](crate::ascii), or
//! rasterized from road geometry exported by [Overpass](crate::roads).
//!
//! # Example
//!
//! ```
//! let parsed = gridpath::ascii::parse(
//!     "S..\n\
//!      ###.\n\
//!      E..\n",
//! ).expect("valid grid");
//! let start = parsed.start.unwrap();
//! let end = parsed.end.unwrap();
//!
//! let result = gridpath::search(&parsed.grid, start, end).expect("endpoints within grid");
//! let path = result.path_to(end).expect("end is reachable");
//!
//! assert_eq!(path.len(), 7);
//! assert_eq!(path.first(), Some(&start));
//! assert_eq!(path.last(), Some(&end));
//! ```

pub mod ascii;
mod dijkstra;
mod distance;
mod grid;
pub mod roads;

pub use dijkstra::{
    search, search_with_step_limit, CellState, Dijkstra, Event, SearchError, SearchResult,
    DEFAULT_STEP_LIMIT,
};
pub use distance::{earth_distance, manhattan_distance};
pub use grid::{Grid, GridError};

/// Address of a single element of a [Grid].
///
/// Rows grow downwards and columns grow to the right; `(0, 0)` is the top-left cell.
/// Cells are ordered row-major, which is also the order used to break ties
/// between equally distant cells during [search].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
