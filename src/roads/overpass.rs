// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::debug;
use serde::Deserialize;

/// Response of an [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API)
/// query in the [JSON output format](https://wiki.openstreetmap.org/wiki/Overpass_API/Output_Formats#JSON),
/// e.g. `[out:json]; way["highway"](around:1000,48.8566,2.3522); out geom;`.
///
/// Only the fields needed to recover road geometry are parsed.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub(super) struct Response {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single OSM element. Only ways carry `geometry` with `out geom`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(super) struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: i64,

    /// Positions of the way's nodes. Nodes outside of a query's bounding box
    /// are represented as `null`.
    #[serde(default)]
    pub geometry: Vec<Option<Point>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub(super) struct Point {
    pub lat: f32,
    pub lon: f32,
}

impl Response {
    /// Returns all polylines (as `(lat, lon)` pairs) with at least 2 points.
    /// Ways with missing nodes are split into multiple polylines at the gaps.
    pub(super) fn polylines(&self) -> impl Iterator<Item = Vec<(f32, f32)>> + '_ {
        self.elements
            .iter()
            .filter(|e| {
                let is_way = e.type_ == "way";
                if !is_way {
                    debug!("skipping {} {}: not a way", e.type_, e.id);
                }
                is_way
            })
            .flat_map(|e| {
                let polylines = e
                    .geometry
                    .split(|pt| pt.is_none())
                    .filter(|part| part.len() >= 2)
                    .map(|part| part.iter().flatten().map(|pt| (pt.lat, pt.lon)).collect())
                    .collect::<Vec<Vec<_>>>();

                if polylines.is_empty() {
                    debug!("skipping way {}: no geometry", e.id);
                }
                polylines
            })
    }
}
