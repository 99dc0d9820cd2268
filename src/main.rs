use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use gridpath::{ascii, roads, Cell};

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("{0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("{0}: {1}")]
    Grid(PathBuf, #[source] ascii::Error),

    #[error("{0}: {1}")]
    Roads(PathBuf, #[source] roads::Error),
}

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find a path in a text grid with `S` and `E` markers, and draw the search
    Grid {
        /// The path to the grid file
        grid_file: PathBuf,
    },

    /// Find a path over roads from an Overpass JSON file, and print it as GeoJSON
    #[command(allow_negative_numbers = true)]
    Roads {
        /// The path to the Overpass JSON file
        roads_file: PathBuf,

        /// Latitude of the start point
        start_lat: f32,

        /// Longitude of the start point
        start_lon: f32,

        /// Latitude of the end point
        end_lat: f32,

        /// Longitude of the end point
        end_lon: f32,

        /// Area to rasterize: min lon, min lat, max lon, max lat
        #[arg(long, num_args = 4, required = true)]
        bbox: Vec<f32>,

        /// Number of grid rows
        #[arg(long, default_value_t = 200)]
        rows: usize,

        /// Number of grid columns
        #[arg(long, default_value_t = 200)]
        cols: usize,

        /// Format of the roads file
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    JsonGz,
    JsonBz2,
}

impl From<Format> for roads::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => Self::Json,
            Format::JsonGz => Self::JsonGz,
            Format::JsonBz2 => Self::JsonBz2,
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Grid { grid_file } => run_grid(&grid_file),
        Command::Roads {
            roads_file,
            start_lat,
            start_lon,
            end_lat,
            end_lon,
            bbox,
            rows,
            cols,
            format,
        } => {
            let options = roads::Options {
                file_format: format.into(),
                bbox: [bbox[0], bbox[1], bbox[2], bbox[3]],
                rows,
                cols,
            };
            run_roads(&roads_file, &options, (start_lat, start_lon), (end_lat, end_lon))
        }
    }
}

fn run_grid(path: &Path) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let parsed = ascii::parse(&text).map_err(|e| LoadError::Grid(path.to_path_buf(), e))?;

    let start = parsed.start.ok_or("grid has no start (S) marker")?;
    let end = parsed.end.ok_or("grid has no end (E) marker")?;

    let result = gridpath::search(&parsed.grid, start, end)?;
    print!("{}", ascii::render(&parsed.grid, &result));

    match result.shortest_path() {
        Some(path) => println!(
            "visited {} cells, path of {} moves",
            result.visited_in_order().len(),
            path.len() - 1,
        ),
        None => println!(
            "visited {} cells, no path",
            result.visited_in_order().len()
        ),
    }

    Ok(())
}

fn run_roads(
    path: &Path,
    options: &roads::Options,
    (start_lat, start_lon): (f32, f32),
    (end_lat, end_lon): (f32, f32),
) -> Result<(), Box<dyn Error>> {
    let g = roads::load_from_file(options, path)
        .map_err(|e| LoadError::Roads(path.to_path_buf(), e))?;

    let start = g
        .nearest_open_cell(start_lat, start_lon)
        .ok_or("no road corresponding to the given start position")?;

    let end = g
        .nearest_open_cell(end_lat, end_lon)
        .ok_or("no road corresponding to the given end position")?;

    let result =
        gridpath::search_with_step_limit(g.grid(), start, end, gridpath::DEFAULT_STEP_LIMIT)?;
    let route = result.shortest_path().unwrap_or_default();

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut positions = route
        .iter()
        .filter_map(|&cell: &Cell| g.cell_center(cell))
        .peekable();
    while let Some((lat, lon)) = positions.next() {
        let suffix = if positions.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", lon, lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}
