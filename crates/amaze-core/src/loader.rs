//! Maze files: text parsing and start/target derivation.
//!
//! A maze file holds one row per line, `0` for an open cell and `1` for a
//! wall. Whitespace inside a line is ignored, trailing blank lines are
//! dropped, and rows shorter than the widest row are padded with walls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::geom::Point;
use crate::grid::{MazeGrid, Tile};

/// Errors raised while turning text into a solvable maze.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The input contains no rows.
    #[error("maze is empty")]
    Empty,
    /// A character other than `0`, `1` or whitespace was found.
    #[error("invalid cell {ch:?} at {pos}, expected '0' or '1'")]
    InvalidCell { ch: char, pos: Point },
    /// No open cell on the top row or left column.
    #[error("no open cell on the top row or left column to start from")]
    NoStart,
    /// No open cell on the bottom row or right column away from the top row
    /// and left column.
    #[error("no open cell on the bottom row or right column to reach")]
    NoTarget,
    /// An explicit start is outside the maze or on a wall.
    #[error("start {0} is not an open cell of the maze")]
    InvalidStart(Point),
    /// An explicit target is outside the maze or on a wall.
    #[error("target {0} is not an open cell of the maze")]
    InvalidTarget(Point),
    #[error("cannot read maze file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The start and target cells of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoints {
    pub start: Point,
    pub target: Point,
}

/// Parse maze text into a grid.
pub fn parse(text: &str) -> Result<MazeGrid, GridError> {
    let mut rows: Vec<Vec<Tile>> = Vec::new();
    for (y, line) in text.lines().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for ch in line.chars().filter(|c| !c.is_whitespace()) {
            let tile = Tile::from_digit(ch).ok_or(GridError::InvalidCell {
                ch,
                pos: Point::new(row.len() as i32, y as i32),
            })?;
            row.push(tile);
        }
        rows.push(row);
    }
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(GridError::Empty);
    }
    let grid = MazeGrid::from_rows(&rows);
    debug!(
        "parsed maze {}x{} with {} open cells",
        grid.width(),
        grid.height(),
        grid.count(Tile::Open)
    );
    Ok(grid)
}

/// Read and parse a maze file.
pub fn load(path: impl AsRef<Path>) -> Result<MazeGrid, GridError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GridError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Derive the endpoints of a maze.
///
/// The start is the first open cell, in row-major order, on the top row or
/// the left column. The target is the first open cell, in row-major order,
/// on the bottom row or the right column that is not also on the top row or
/// the left column. A corner touching both edges is only ever a start.
pub fn find_endpoints(grid: &MazeGrid) -> Result<Endpoints, GridError> {
    let start = find_start(grid, None)?;
    let target = find_target(grid, Some(start))?;
    debug!("derived endpoints start={start} target={target}");
    Ok(Endpoints { start, target })
}

/// The first open cell on the top row or left column, skipping `exclude`.
pub fn find_start(grid: &MazeGrid, exclude: Option<Point>) -> Result<Point, GridError> {
    let bounds = grid.bounds();
    first_open(grid, exclude, |p| bounds.on_leading_edge(p)).ok_or(GridError::NoStart)
}

/// The first open cell on the bottom row or right column that is not on the
/// top row or left column, skipping `exclude`.
pub fn find_target(grid: &MazeGrid, exclude: Option<Point>) -> Result<Point, GridError> {
    let bounds = grid.bounds();
    first_open(grid, exclude, |p| {
        bounds.on_trailing_edge(p) && !bounds.on_leading_edge(p)
    })
    .ok_or(GridError::NoTarget)
}

fn first_open(
    grid: &MazeGrid,
    exclude: Option<Point>,
    on_edge: impl Fn(Point) -> bool,
) -> Option<Point> {
    grid.iter()
        .find(|&(p, tile)| tile.is_open() && Some(p) != exclude && on_edge(p))
        .map(|(p, _)| p)
}

/// Check explicit endpoints against the grid.
pub fn validate_endpoints(grid: &MazeGrid, endpoints: Endpoints) -> Result<Endpoints, GridError> {
    if !grid.is_open(endpoints.start) {
        return Err(GridError::InvalidStart(endpoints.start));
    }
    if !grid.is_open(endpoints.target) {
        return Err(GridError::InvalidTarget(endpoints.target));
    }
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_maze() {
        let g = parse("000\n101\n000\n").unwrap();
        assert_eq!(g.size(), Point::new(3, 3));
        assert_eq!(g.at(Point::new(1, 1)), Some(Tile::Wall));
        assert_eq!(g.at(Point::new(1, 0)), Some(Tile::Open));
        assert_eq!(g.count(Tile::Wall), 2);
    }

    #[test]
    fn parse_ignores_inner_whitespace_and_crlf() {
        let g = parse("0 1 0\r\n0 0 0\r\n\r\n\n").unwrap();
        assert_eq!(g.size(), Point::new(3, 2));
        assert_eq!(g.at(Point::new(1, 0)), Some(Tile::Wall));
    }

    #[test]
    fn parse_pads_ragged_rows() {
        let g = parse("0000\n00\n0000").unwrap();
        assert_eq!(g.size(), Point::new(4, 3));
        assert_eq!(g.at(Point::new(2, 1)), Some(Tile::Wall));
        assert_eq!(g.at(Point::new(3, 1)), Some(Tile::Wall));
    }

    #[test]
    fn parse_rejects_foreign_characters() {
        let err = parse("000\n0x0\n").unwrap_err();
        match err {
            GridError::InvalidCell { ch, pos } => {
                assert_eq!(ch, 'x');
                assert_eq!(pos, Point::new(1, 1));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(parse(""), Err(GridError::Empty)));
        assert!(matches!(parse("\n\n  \n"), Err(GridError::Empty)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load("/definitely/not/here.maze").unwrap_err();
        assert!(matches!(err, GridError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.maze"));
    }

    #[test]
    fn endpoints_on_open_grid() {
        let g = parse("000\n000\n000").unwrap();
        let e = find_endpoints(&g).unwrap();
        assert_eq!(e.start, Point::new(0, 0));
        assert_eq!(e.target, Point::new(2, 1));
    }

    #[test]
    fn corners_on_both_edges_are_never_targets() {
        // (2, 0) and (0, 2) touch the trailing edge but also the leading one.
        let g = parse("100\n111\n011").unwrap();
        assert_eq!(find_start(&g, None).unwrap(), Point::new(1, 0));
        assert!(matches!(find_target(&g, None), Err(GridError::NoTarget)));

        let g = parse("00\n11").unwrap();
        assert!(matches!(find_endpoints(&g), Err(GridError::NoTarget)));
    }

    #[test]
    fn single_endpoint_search_skips_excluded_cell() {
        let g = parse("000\n000\n000").unwrap();
        assert_eq!(find_target(&g, Some(Point::new(2, 1))).unwrap(), Point::new(1, 2));
        assert_eq!(find_start(&g, Some(Point::new(0, 0))).unwrap(), Point::new(1, 0));

        // No open leading cell, but the target alone can still be found.
        let g = parse("111\n101\n100").unwrap();
        assert!(matches!(find_start(&g, None), Err(GridError::NoStart)));
        assert_eq!(find_target(&g, None).unwrap(), Point::new(1, 2));
    }

    #[test]
    fn endpoints_walled_border() {
        let g = parse("11011\n10001\n11101\n11101").unwrap();
        let e = find_endpoints(&g).unwrap();
        assert_eq!(e.start, Point::new(2, 0));
        assert_eq!(e.target, Point::new(3, 3));
    }

    #[test]
    fn endpoints_start_from_left_column() {
        let g = parse("111\n001\n100").unwrap();
        let e = find_endpoints(&g).unwrap();
        assert_eq!(e.start, Point::new(0, 1));
        assert_eq!(e.target, Point::new(1, 2));
    }

    #[test]
    fn endpoints_missing() {
        let g = parse("111\n101\n111").unwrap();
        assert!(matches!(find_endpoints(&g), Err(GridError::NoStart)));

        let g = parse("0").unwrap();
        assert!(matches!(find_endpoints(&g), Err(GridError::NoTarget)));
    }

    #[test]
    fn validate_explicit_endpoints() {
        let g = parse("000\n010\n000").unwrap();
        let ok = Endpoints {
            start: Point::new(0, 0),
            target: Point::new(2, 2),
        };
        assert_eq!(validate_endpoints(&g, ok).unwrap(), ok);

        let wall = Endpoints {
            start: Point::new(1, 1),
            target: Point::new(2, 2),
        };
        assert!(matches!(
            validate_endpoints(&g, wall),
            Err(GridError::InvalidStart(p)) if p == Point::new(1, 1)
        ));

        let outside = Endpoints {
            start: Point::new(0, 0),
            target: Point::new(3, 0),
        };
        assert!(matches!(
            validate_endpoints(&g, outside),
            Err(GridError::InvalidTarget(_))
        ));
    }
}
