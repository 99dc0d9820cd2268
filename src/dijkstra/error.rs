// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Cell;

/// Recommended number of allowed cell finalizations in
/// [search_with_step_limit](crate::search_with_step_limit)
/// before [SearchError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur during [search](crate::search) or
/// [search_with_step_limit](crate::search_with_step_limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end cell lies outside of the grid.
    OutOfBounds(Cell),

    /// Search has finalized more cells than allowed.
    /// Either the cells are really far apart, or the end is unreachable.
    ///
    /// Concluding that the end is unreachable requires finalizing every cell
    /// reachable from the start, which on large rasterized maps takes a while.
    StepLimitExceeded,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds(cell) => write!(f, "cell outside of grid: {}", cell),
            Self::StepLimitExceeded => write!(f, "step limit exceeded"),
        }
    }
}

impl std::error::Error for SearchError {}
