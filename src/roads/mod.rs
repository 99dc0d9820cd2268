// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Building search [Grids](crate::Grid) from real-world road geometry.
//!
//! Roads are read from [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API)
//! JSON responses produced with `out geom`, and rasterized onto a [RoadGrid]
//! covering a bounding box. Fetching the data is left to the caller.

use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;

mod overpass;
mod raster;

pub use raster::RoadGrid;

/// Error conditions which may occur when loading roads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid bounding box: {0:?}")]
    InvalidBbox([f32; 4]),

    #[error("grid must have at least one cell, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
}

/// Format of the input road data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// Uncompressed Overpass JSON
    #[default]
    Json,

    /// Overpass JSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    JsonGz,

    /// Overpass JSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    JsonBz2,
}

/// Controls for rasterizing road data into a [RoadGrid].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Area covered by the grid. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat).
    pub bbox: [f32; 4],

    /// Number of cells along the latitude axis.
    pub rows: usize,

    /// Number of cells along the longitude axis.
    pub cols: usize,
}

/// Parse roads from a reader into a new [RoadGrid] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn load_from_io<R: io::Read>(options: &Options, reader: R) -> Result<RoadGrid, Error> {
    let response: overpass::Response = match options.file_format {
        FileFormat::Json => serde_json::from_reader(io::BufReader::new(reader))?,

        FileFormat::JsonGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            serde_json::from_reader(io::BufReader::new(d))?
        }

        FileFormat::JsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            serde_json::from_reader(io::BufReader::new(d))?
        }
    };

    rasterize(options, &response)
}

/// Parse roads from a file at the provided path into a new [RoadGrid] as per the provided [Options].
pub fn load_from_file<P: AsRef<Path>>(options: &Options, path: P) -> Result<RoadGrid, Error> {
    let f = File::open(path)?;
    load_from_io(options, f)
}

/// Parse roads from an in-memory buffer into a new [RoadGrid] as per the provided [Options].
pub fn load_from_buffer(options: &Options, data: &[u8]) -> Result<RoadGrid, Error> {
    if options.file_format == FileFormat::Json {
        // Fast path is available for in-memory JSON data
        let response: overpass::Response = serde_json::from_slice(data)?;
        rasterize(options, &response)
    } else {
        load_from_io(options, io::Cursor::new(data))
    }
}

fn rasterize(options: &Options, response: &overpass::Response) -> Result<RoadGrid, Error> {
    let mut g = RoadGrid::new(options.bbox, options.rows, options.cols)?;

    let mut roads: usize = 0;
    for polyline in response.polylines() {
        g.add_polyline(&polyline);
        roads += 1;
    }

    debug!(
        "rasterized {} road polylines, {} of {} cells open",
        roads,
        g.grid().open_count(),
        g.grid().len(),
    );
    Ok(g)
}
