// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod result;
mod search;

pub use error::{SearchError, DEFAULT_STEP_LIMIT};
pub use result::{CellState, Event, SearchResult};
pub use search::{search, search_with_step_limit, Dijkstra};
