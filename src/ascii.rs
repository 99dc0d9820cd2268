// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Plain-text representation of grids and search results.
//!
//! Input grids use one character per cell:
//!
//! | Char | Meaning    |
//! |------|------------|
//! | `.`  | open cell  |
//! | `#`  | wall       |
//! | `S`  | start cell |
//! | `E`  | end cell   |
//!
//! [render] additionally uses `o` for visited cells and `*` for cells on the shortest path.

use crate::{Cell, Grid, GridError, SearchResult};

/// Error conditions which may occur when [parsing](parse) a text grid.
/// Lines and columns are counted from 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("{line}:{column}: unexpected character {ch:?}")]
    UnexpectedChar {
        line: usize,
        column: usize,
        ch: char,
    },

    #[error("{line}:{column}: duplicate {ch:?} marker")]
    DuplicateMarker {
        line: usize,
        column: usize,
        ch: char,
    },
}

/// A [Grid] parsed from text, together with the optional start and end markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    pub grid: Grid,
    pub start: Option<Cell>,
    pub end: Option<Cell>,
}

/// Parses a grid from text. Leading and trailing empty lines are ignored;
/// row 0 is the first non-empty line.
pub fn parse(text: &str) -> Result<AsciiGrid, Error> {
    let mut lines = text.lines().map(str::trim_end).collect::<Vec<_>>();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let skipped = lines.iter().take_while(|l| l.is_empty()).count();

    let mut start = None;
    let mut end = None;
    let mut walls = Vec::with_capacity(lines.len() - skipped);

    for (row, line) in lines[skipped..].iter().enumerate() {
        let mut row_walls = Vec::with_capacity(line.len());

        for (col, ch) in line.chars().enumerate() {
            let marker = match ch {
                '.' | '#' => None,
                'S' => Some(&mut start),
                'E' => Some(&mut end),
                _ => {
                    return Err(Error::UnexpectedChar {
                        line: skipped + row + 1,
                        column: col + 1,
                        ch,
                    })
                }
            };

            if let Some(marker) = marker {
                if marker.is_some() {
                    return Err(Error::DuplicateMarker {
                        line: skipped + row + 1,
                        column: col + 1,
                        ch,
                    });
                }
                *marker = Some(Cell::new(row, col));
            }

            row_walls.push(ch == '#');
        }

        walls.push(row_walls);
    }

    Ok(AsciiGrid {
        grid: Grid::from_walls(walls)?,
        start,
        end,
    })
}

/// Draws a [SearchResult] over its [Grid]. Every line, including the last one,
/// is terminated with `\n`.
pub fn render(grid: &Grid, result: &SearchResult) -> String {
    let path = result.shortest_path().unwrap_or_default();
    let mut out = String::with_capacity(grid.len() + grid.rows());

    for cell in grid.cells() {
        let ch = if cell == result.start() {
            'S'
        } else if cell == result.end() {
            'E'
        } else if grid.is_wall(cell) {
            '#'
        } else if path.contains(&cell) {
            '*'
        } else if result.is_visited(cell) {
            'o'
        } else {
            '.'
        };
        out.push(ch);

        if cell.col + 1 == grid.cols() {
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search;

    #[test]
    fn parse_markers() {
        let parsed = parse("S.#\n..#\n.E.\n\n").unwrap();

        assert_eq!(parsed.grid.rows(), 3);
        assert_eq!(parsed.grid.cols(), 3);
        assert_eq!(parsed.start, Some(Cell::new(0, 0)));
        assert_eq!(parsed.end, Some(Cell::new(2, 1)));
        assert!(parsed.grid.is_wall(Cell::new(0, 2)));
        assert!(parsed.grid.is_wall(Cell::new(1, 2)));
        assert!(!parsed.grid.is_wall(Cell::new(2, 1)));
        assert_eq!(parsed.grid.open_count(), 7);
    }

    #[test]
    fn parse_without_markers() {
        let parsed = parse("..\r\n#.\r\n").unwrap();
        assert_eq!(parsed.start, None);
        assert_eq!(parsed.end, None);
        assert_eq!(parsed.grid.open_count(), 3);
    }

    #[test]
    fn parse_leading_empty_lines() {
        let parsed = parse("\n\n..\nS#\n").unwrap();
        assert_eq!(parsed.grid.rows(), 2);
        assert_eq!(parsed.start, Some(Cell::new(1, 0)));
        assert!(parsed.grid.is_wall(Cell::new(1, 1)));

        // Reported lines still refer to the input text
        assert_eq!(
            parse("\n..\n.x\n"),
            Err(Error::UnexpectedChar {
                line: 3,
                column: 2,
                ch: 'x'
            }),
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse("..\n.x\n"),
            Err(Error::UnexpectedChar {
                line: 2,
                column: 2,
                ch: 'x'
            }),
        );
        assert_eq!(
            parse("S.\n.S\n"),
            Err(Error::DuplicateMarker {
                line: 2,
                column: 2,
                ch: 'S'
            }),
        );
        assert_eq!(
            parse("...\n..\n"),
            Err(Error::Grid(GridError::NonRectangular {
                row: 1,
                expected: 3,
                got: 2
            })),
        );
        assert_eq!(parse("\n\n"), Err(Error::Grid(GridError::Empty)));
    }

    #[test]
    fn error_messages() {
        let err = parse("..\n.x\n").unwrap_err();
        assert_eq!(err.to_string(), "2:2: unexpected character 'x'");

        let err = parse("..\n.\n").unwrap_err();
        assert_eq!(err.to_string(), "row 1 has 1 cells, expected 2");
    }

    #[test]
    fn render_found_path() {
        let parsed = parse(
            "S..#.\n\
             .#...\n\
             ...#E\n",
        )
        .unwrap();
        let r = search(&parsed.grid, parsed.start.unwrap(), parsed.end.unwrap()).unwrap();

        assert_eq!(
            render(&parsed.grid, &r),
            "S**#o\n\
             o#***\n\
             ooo#E\n",
        );
    }

    #[test]
    fn render_unreachable() {
        let parsed = parse("S.#E\n").unwrap();
        let r = search(&parsed.grid, parsed.start.unwrap(), parsed.end.unwrap()).unwrap();

        assert_eq!(render(&parsed.grid, &r), "So#E\n");
    }
}
