// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::debug;

use super::Error;
use crate::{earth_distance, Cell, Grid};

/// A [Grid] laid over a geographic bounding box, where only cells
/// crossed by roads are open.
///
/// The bounding box is divided into equally sized cells in plate carrée
/// projection; row 0 lies at the northern edge and column 0 at the western edge.
/// Initially, every cell is a wall.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadGrid {
    grid: Grid,
    bbox: [f32; 4],
}

impl RoadGrid {
    /// Creates a road grid over a bounding box: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat).
    pub fn new(bbox: [f32; 4], rows: usize, cols: usize) -> Result<Self, Error> {
        let [left, bottom, right, top] = bbox;
        if bbox.iter().any(|x| !x.is_finite()) || left >= right || bottom >= top {
            return Err(Error::InvalidBbox(bbox));
        }
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid { rows, cols });
        }

        Ok(Self {
            grid: Grid::filled(rows, cols),
            bbox,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn bbox(&self) -> [f32; 4] {
        self.bbox
    }

    /// Returns the cell containing the provided position, or `None`
    /// if the position lies outside of the bounding box.
    pub fn cell_at(&self, lat: f32, lon: f32) -> Option<Cell> {
        let [left, bottom, right, top] = self.bbox;
        if !(bottom..=top).contains(&lat) || !(left..=right).contains(&lon) {
            return None;
        }

        // Positions on the southern and eastern edges belong to the last row/column
        let (row, col) = self.position(lat, lon);
        Some(Cell::new(
            (row.floor() as usize).min(self.grid.rows() - 1),
            (col.floor() as usize).min(self.grid.cols() - 1),
        ))
    }

    /// Returns the `(lat, lon)` position of the center of a cell,
    /// or `None` if the cell lies outside of the grid.
    pub fn cell_center(&self, cell: Cell) -> Option<(f32, f32)> {
        if !self.grid.contains(cell) {
            return None;
        }

        let [left, _, _, top] = self.bbox;
        let (cell_height, cell_width) = self.cell_size();
        Some((
            (top as f64 - (cell.row as f64 + 0.5) * cell_height) as f32,
            (left as f64 + (cell.col as f64 + 0.5) * cell_width) as f32,
        ))
    }

    /// Finds the open cell whose center is closest to the given position.
    /// Returns `None` if there are no open cells.
    ///
    /// This function requires computing the distance to every open cell,
    /// and may be slow for large grids.
    pub fn nearest_open_cell(&self, lat: f32, lon: f32) -> Option<Cell> {
        self.grid
            .cells()
            .filter(|&cell| !self.grid.is_wall(cell))
            .filter_map(|cell| {
                let (c_lat, c_lon) = self.cell_center(cell)?;
                Some((earth_distance(lat, lon, c_lat, c_lon), cell))
            })
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, cell)| cell)
    }

    /// Opens every cell crossed by a polyline of `(lat, lon)` points.
    ///
    /// Consecutive opened cells always share an edge, so a rasterized road
    /// can be followed with orthogonal moves only. Segments touching a point
    /// which isn't a valid position on Earth are skipped.
    pub fn add_polyline(&mut self, points: &[(f32, f32)]) {
        for pair in points.windows(2) {
            let (lat0, lon0) = pair[0];
            let (lat1, lon1) = pair[1];

            if !is_valid_position(lat0, lon0) || !is_valid_position(lat1, lon1) {
                debug!(
                    "skipping road segment ({}, {}) -> ({}, {}): invalid position",
                    lat0, lon0, lat1, lon1,
                );
                continue;
            }

            let clipped = self.clip(self.position(lat0, lon0), self.position(lat1, lon1));
            if let Some((from, to)) = clipped {
                self.add_segment(from, to);
            }
        }
    }

    /// Clips a segment between two fractional (row, column) positions to the grid
    /// using the [Liang–Barsky algorithm](https://en.wikipedia.org/wiki/Liang%E2%80%93Barsky_algorithm),
    /// and returns the cells at both ends of the clipped segment.
    /// Returns `None` if the segment doesn't cross the grid.
    fn clip(&self, (r0, c0): (f64, f64), (r1, c1): (f64, f64)) -> Option<(Cell, Cell)> {
        let rows = self.grid.rows() as f64;
        let cols = self.grid.cols() as f64;
        let (dr, dc) = (r1 - r0, c1 - c0);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;

        for (p, q) in [(-dc, c0), (dc, cols - c0), (-dr, r0), (dr, rows - r0)] {
            if p == 0.0 {
                // Parallel to this edge - either fully inside or fully outside
                if q < 0.0 {
                    return None;
                }
                continue;
            }

            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }

            if t0 > t1 {
                return None;
            }
        }

        let to_cell = |t: f64| {
            let row = (r0 + t * dr).floor().clamp(0.0, rows - 1.0) as usize;
            let col = (c0 + t * dc).floor().clamp(0.0, cols - 1.0) as usize;
            Cell::new(row, col)
        };
        Some((to_cell(t0), to_cell(t1)))
    }

    /// Opens cells along a 4-connected line between two cells of the grid,
    /// using a variant of [Bresenham's line algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm).
    fn add_segment(&mut self, from: Cell, to: Cell) {
        let (r0, c0) = (from.row as i64, from.col as i64);
        let (r1, c1) = (to.row as i64, to.col as i64);

        let dc = (c1 - c0).abs();
        let dr = -(r1 - r0).abs();
        let step_c = if c0 < c1 { 1 } else { -1 };
        let step_r = if r0 < r1 { 1 } else { -1 };
        let mut err = dc + dr;
        let (mut r, mut c) = (r0, c0);

        loop {
            self.grid.set_wall(Cell::new(r as usize, c as usize), false);

            if r == r1 && c == c1 {
                break;
            }

            let e2 = 2 * err;
            if r == r1 || (c != c1 && e2 - dr > dc - e2) {
                err += dr;
                c += step_c;
            } else {
                err += dc;
                r += step_r;
            }
        }
    }

    /// Returns the fractional (row, column) of a position, without clamping to the grid.
    fn position(&self, lat: f32, lon: f32) -> (f64, f64) {
        let [left, _, _, top] = self.bbox;
        let (cell_height, cell_width) = self.cell_size();
        (
            (top as f64 - lat as f64) / cell_height,
            (lon as f64 - left as f64) / cell_width,
        )
    }

    /// Returns the (height, width) of a single cell, in degrees.
    fn cell_size(&self) -> (f64, f64) {
        let [left, bottom, right, top] = self.bbox.map(f64::from);
        (
            (top - bottom) / self.grid.rows() as f64,
            (right - left) / self.grid.cols() as f64,
        )
    }
}

fn is_valid_position(lat: f32, lon: f32) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}
