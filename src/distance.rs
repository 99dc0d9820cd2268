// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Cell;

/// Mean radius of Earth, in kilometers.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS: f64 = 6371.0088;

/// Returns the number of orthogonal moves between two cells, ignoring walls.
///
/// This is a lower bound on the length of any path found by [search](crate::search),
/// and equals it when no walls are in the way.
pub fn manhattan_distance(a: Cell, b: Cell) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in kilometers.
pub fn earth_distance(lat1: f32, lon1: f32, lat2: f32, lon2: f32) -> f32 {
    let [lat1, lon1, lat2, lon2] = [lat1, lon1, lat2, lon2].map(|x| (x as f64).to_radians());

    let h = haversin(lat2 - lat1) + lat1.cos() * lat2.cos() * haversin(lon2 - lon1);
    (2.0 * EARTH_RADIUS * h.sqrt().asin()) as f32
}

#[inline]
fn haversin(theta: f64) -> f64 {
    let s = (theta * 0.5).sin();
    s * s
}
