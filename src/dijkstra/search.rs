// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use log::{debug, warn};

use super::{SearchError, SearchResult};
use crate::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueItem {
    at: usize,
    distance: usize,
    sequence: u64,
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as closer and earlier-discovered cells are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        (other.distance, other.sequence).cmp(&(self.distance, self.sequence))
    }
}

/// Step-by-step [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// over a [Grid] with unit costs between orthogonally adjacent open cells.
///
/// Every call to [next](Iterator::next) finalizes exactly one cell and returns it.
/// Iteration stops after the end cell is finalized, or when no unvisited cell
/// is reachable from the start. Callers wanting to cancel a search or display
/// its progress may simply stop iterating and inspect [Dijkstra::result].
///
/// Among cells at equal distance, the one discovered first is finalized first;
/// cells discovered in the same step are finalized in row-major order.
#[derive(Debug, Clone)]
pub struct Dijkstra<'a> {
    grid: &'a Grid,
    end: usize,
    queue: BinaryHeap<QueueItem>,
    sequence: u64,
    result: SearchResult,
    finished: bool,
}

impl<'a> Dijkstra<'a> {
    /// Prepares a search from `start` to `end`. Both cells must lie within the grid.
    ///
    /// A start cell marked as a wall is still finalized, but walls are
    /// never entered from neighboring cells.
    pub fn new(grid: &'a Grid, start: Cell, end: Cell) -> Result<Self, SearchError> {
        let start_idx = grid.index(start).ok_or(SearchError::OutOfBounds(start))?;
        let end_idx = grid.index(end).ok_or(SearchError::OutOfBounds(end))?;

        if grid.is_wall(start) {
            warn!("search starts from a wall at {}", start);
        }

        let mut queue = BinaryHeap::default();
        queue.push(QueueItem {
            at: start_idx,
            distance: 0,
            sequence: 0,
        });

        Ok(Self {
            grid,
            end: end_idx,
            queue,
            sequence: 1,
            result: SearchResult::new(grid, start, end),
            finished: false,
        })
    }

    /// Returns the state of the search so far.
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    /// Returns true if no more cells will be finalized.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Runs the search to completion.
    pub fn finish(mut self) -> SearchResult {
        while self.next().is_some() {}
        self.result
    }

    fn relax(&mut self, item: QueueItem) {
        let neighbor_distance = item.distance + 1;

        for neighbor in self.grid.neighbors(self.grid.cell(item.at)) {
            if self.grid.is_wall(neighbor) {
                continue;
            }

            let Some(neighbor_idx) = self.grid.index(neighbor) else {
                continue;
            };
            if self.result.visited[neighbor_idx] {
                continue;
            }

            // Check if this is the shortest way to the neighbor
            let known = self.result.distances[neighbor_idx].unwrap_or(usize::MAX);
            if neighbor_distance >= known {
                continue;
            }

            self.result.distances[neighbor_idx] = Some(neighbor_distance);
            self.result.previous[neighbor_idx] = Some(item.at);
            self.queue.push(QueueItem {
                at: neighbor_idx,
                distance: neighbor_distance,
                sequence: self.sequence,
            });
            self.sequence += 1;
        }
    }
}

impl Iterator for Dijkstra<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.finished {
            return None;
        }

        while let Some(item) = self.queue.pop() {
            // Queue may contain stale entries for cells whose distance was later improved.
            if self.result.visited[item.at] {
                continue;
            }

            self.result.visited[item.at] = true;
            let cell = self.grid.cell(item.at);
            self.result.order.push(cell);

            if item.at == self.end {
                self.finished = true;
            } else {
                self.relax(item);
            }
            return Some(cell);
        }

        // Every remaining cell is infinitely far away
        self.finished = true;
        None
    }
}

/// Runs [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// from `start` until `end` is finalized, or until every cell reachable from `start` is.
///
/// An unreachable `end` is not an error; check [SearchResult::reached_end].
pub fn search(grid: &Grid, start: Cell, end: Cell) -> Result<SearchResult, SearchError> {
    let result = Dijkstra::new(grid, start, end)?.finish();
    debug!(
        "search {} -> {}: visited {} cells, end reached: {}",
        start,
        end,
        result.visited_in_order().len(),
        result.reached_end(),
    );
    Ok(result)
}

/// Like [search], but gives up with [SearchError::StepLimitExceeded] once more than
/// `step_limit` cells (not counting the end) have been finalized. The recommended
/// value is [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn search_with_step_limit(
    grid: &Grid,
    start: Cell,
    end: Cell,
    step_limit: usize,
) -> Result<SearchResult, SearchError> {
    let mut dijkstra = Dijkstra::new(grid, start, end)?;
    let mut steps: usize = 0;

    while let Some(cell) = dijkstra.next() {
        if cell == end {
            break;
        }

        steps += 1;
        if steps > step_limit {
            return Err(SearchError::StepLimitExceeded);
        }
    }

    Ok(dijkstra.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ascii, manhattan_distance, CellState, Event, DEFAULT_STEP_LIMIT};

    macro_rules! cells {
        ($(($r:expr, $c:expr)),* $(,)?) => {
            vec![$(Cell::new($r, $c)),*]
        };
    }

    fn assert_valid_path(g: &Grid, path: &[Cell]) {
        for pair in path.windows(2) {
            assert_eq!(
                manhattan_distance(pair[0], pair[1]),
                1,
                "{} and {} are not adjacent",
                pair[0],
                pair[1],
            );
            assert!(!g.is_wall(pair[1]), "path enters a wall at {}", pair[1]);
        }
    }

    #[test]
    fn open_3x3() {
        let g = Grid::new(3, 3);
        let r = search(&g, Cell::new(0, 0), Cell::new(2, 2)).unwrap();

        assert!(r.reached_end());
        assert_eq!(
            r.visited_in_order(),
            cells![(0, 0), (0, 1), (1, 0), (0, 2), (1, 1), (2, 0), (1, 2), (2, 1), (2, 2)],
        );

        let path = r.reconstruct_path(Cell::new(2, 2));
        assert_eq!(path.len(), 5);
        assert_eq!(path, cells![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]);
        assert_valid_path(&g, &path);
        assert_eq!(r.distance(Cell::new(2, 2)), Some(4));
    }

    #[test]
    fn middle_row_walled() {
        let g = ascii::parse("...\n###\n...").unwrap().grid;
        let r = search(&g, Cell::new(0, 0), Cell::new(2, 2)).unwrap();

        assert!(!r.reached_end());
        assert_eq!(r.visited_in_order(), cells![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(r.distance(Cell::new(2, 2)), None);
        assert_eq!(r.reconstruct_path(Cell::new(2, 2)), cells![(2, 2)]);
        assert_eq!(r.path_to(Cell::new(2, 2)), None);
        assert_eq!(r.shortest_path(), None);
    }

    #[test]
    fn enclosed_end() {
        let parsed = ascii::parse(
            ".......\n\
             ..###..\n\
             S.#E#..\n\
             ..###..\n\
             .......",
        )
        .unwrap();
        let r = search(&parsed.grid, parsed.start.unwrap(), parsed.end.unwrap()).unwrap();

        assert!(!r.reached_end());
        assert!(!r.visited_in_order().contains(&parsed.end.unwrap()));
        // Everything except the walls and the enclosed end is reachable
        assert_eq!(r.visited_in_order().len(), parsed.grid.open_count() - 1);
    }

    #[test]
    fn manhattan_without_walls() {
        let g = Grid::new(6, 9);
        for (start, end) in [
            (Cell::new(0, 0), Cell::new(5, 8)),
            (Cell::new(5, 8), Cell::new(0, 0)),
            (Cell::new(3, 2), Cell::new(1, 7)),
            (Cell::new(4, 4), Cell::new(4, 0)),
        ] {
            let r = search(&g, start, end).unwrap();
            let path = r.shortest_path().unwrap();
            assert_eq!(path.len() - 1, manhattan_distance(start, end));
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert_valid_path(&g, &path);
        }
    }

    #[test]
    fn detour_around_walls() {
        let parsed = ascii::parse(
            ".....\n\
             .###.\n\
             .#S..\n\
             .#.#.\n\
             ...#E",
        )
        .unwrap();
        let r = search(&parsed.grid, parsed.start.unwrap(), parsed.end.unwrap()).unwrap();

        assert_eq!(
            r.visited_in_order(),
            cells![(2, 2), (2, 3), (3, 2), (2, 4), (4, 2), (1, 4), (3, 4), (4, 1), (0, 4), (4, 4)],
        );
        assert_eq!(
            r.shortest_path().unwrap(),
            cells![(2, 2), (2, 3), (2, 4), (3, 4), (4, 4)],
        );
    }

    #[test]
    fn finalization_order_is_monotonic() {
        let parsed = ascii::parse(
            "S....#....\n\
             .##..#.##.\n\
             ..#.....#.\n\
             #.####.##.\n\
             ......#..E",
        )
        .unwrap();
        let r = search(&parsed.grid, parsed.start.unwrap(), parsed.end.unwrap()).unwrap();

        let distances = r
            .visited_in_order()
            .iter()
            .map(|&c| r.distance(c).unwrap())
            .collect::<Vec<_>>();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        // Every finalized cell other than the start has a finalized predecessor one step closer
        for &c in &r.visited_in_order()[1..] {
            let p = r.previous(c).unwrap();
            assert!(r.is_visited(p));
            assert_eq!(r.distance(p).unwrap() + 1, r.distance(c).unwrap());
        }

        assert_valid_path(&parsed.grid, &r.shortest_path().unwrap());
    }

    #[test]
    fn start_is_end() {
        let g = Grid::new(2, 2);
        let r = search(&g, Cell::new(1, 1), Cell::new(1, 1)).unwrap();

        assert_eq!(r.visited_in_order(), cells![(1, 1)]);
        assert_eq!(r.reconstruct_path(Cell::new(1, 1)), cells![(1, 1)]);
        assert_eq!(r.path_to(Cell::new(1, 1)), Some(cells![(1, 1)]));
    }

    #[test]
    fn path_to_start() {
        let g = Grid::new(3, 3);
        let r = search(&g, Cell::new(1, 1), Cell::new(2, 2)).unwrap();
        assert_eq!(r.reconstruct_path(Cell::new(1, 1)), cells![(1, 1)]);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let parsed = ascii::parse("S.#..\n..#..\n....E").unwrap();
        let (start, end) = (parsed.start.unwrap(), parsed.end.unwrap());

        let a = search(&parsed.grid, start, end).unwrap();
        let b = search(&parsed.grid, start, end).unwrap();

        assert_eq!(a.visited_in_order(), b.visited_in_order());
        assert_eq!(a.shortest_path(), b.shortest_path());
        assert_eq!(a, b);
    }

    #[test]
    fn walled_start_is_still_visited() {
        let mut g = Grid::new(1, 3);
        g.set_wall(Cell::new(0, 0), true);

        let r = search(&g, Cell::new(0, 0), Cell::new(0, 2)).unwrap();
        assert_eq!(r.shortest_path().unwrap(), cells![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn walled_end_is_unreachable() {
        let mut g = Grid::new(1, 3);
        g.set_wall(Cell::new(0, 2), true);

        let r = search(&g, Cell::new(0, 0), Cell::new(0, 2)).unwrap();
        assert!(!r.reached_end());
        assert_eq!(r.visited_in_order(), cells![(0, 0), (0, 1)]);
    }

    #[test]
    fn out_of_bounds() {
        let g = Grid::new(3, 3);
        assert_eq!(
            search(&g, Cell::new(3, 0), Cell::new(0, 0)).unwrap_err(),
            SearchError::OutOfBounds(Cell::new(3, 0)),
        );
        assert_eq!(
            search(&g, Cell::new(0, 0), Cell::new(0, 3)).unwrap_err(),
            SearchError::OutOfBounds(Cell::new(0, 3)),
        );
        assert_eq!(
            search(&Grid::default(), Cell::new(0, 0), Cell::new(0, 0)).unwrap_err(),
            SearchError::OutOfBounds(Cell::new(0, 0)),
        );
    }

    #[test]
    fn step_limit() {
        let g = Grid::new(10, 10);
        let (start, end) = (Cell::new(0, 0), Cell::new(9, 9));

        assert_eq!(
            search_with_step_limit(&g, start, end, 10).unwrap_err(),
            SearchError::StepLimitExceeded,
        );

        // All cells but the end need to be finalized before reaching the far corner
        let r = search_with_step_limit(&g, start, end, 99).unwrap();
        assert_eq!(r, search(&g, start, end).unwrap());

        let r = search_with_step_limit(&g, start, end, DEFAULT_STEP_LIMIT).unwrap();
        assert!(r.reached_end());
    }

    #[test]
    fn stepper_matches_search() {
        let parsed = ascii::parse("S...#\n.##.#\n...#E\n#....").unwrap();
        let (start, end) = (parsed.start.unwrap(), parsed.end.unwrap());

        let mut dijkstra = Dijkstra::new(&parsed.grid, start, end).unwrap();
        assert_eq!(dijkstra.next(), Some(start));
        assert_eq!(dijkstra.result().visited_in_order(), &[start]);
        assert!(!dijkstra.is_finished());

        let mut stepped = vec![start];
        stepped.extend(&mut dijkstra);
        assert!(dijkstra.is_finished());
        assert_eq!(dijkstra.next(), None);

        let r = search(&parsed.grid, start, end).unwrap();
        assert_eq!(stepped, r.visited_in_order());
        assert_eq!(stepped.last(), Some(&end));
    }

    #[test]
    fn events() {
        let g = Grid::new(1, 3);
        let r = search(&g, Cell::new(0, 0), Cell::new(0, 2)).unwrap();

        let visited = |row, col| Event {
            cell: Cell::new(row, col),
            state: CellState::Visited,
        };
        let path = |row, col| Event {
            cell: Cell::new(row, col),
            state: CellState::Path,
        };

        assert_eq!(
            r.events().collect::<Vec<_>>(),
            vec![
                visited(0, 0),
                visited(0, 1),
                visited(0, 2),
                path(0, 0),
                path(0, 1),
                path(0, 2),
            ],
        );
    }

    #[test]
    fn events_without_path() {
        let mut g = Grid::new(1, 3);
        g.set_wall(Cell::new(0, 1), true);

        let r = search(&g, Cell::new(0, 0), Cell::new(0, 2)).unwrap();
        assert!(r.events().all(|e| e.state == CellState::Visited));
        assert_eq!(r.events().count(), 1);
    }
}
