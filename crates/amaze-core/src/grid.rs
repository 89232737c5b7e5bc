//! The maze grid: a rectangle of [`Tile`] values.
//!
//! [`MazeGrid`] owns its cells in a flat row-major buffer. Reads outside the
//! bounds return `None`, which callers treat like a wall.

use crate::geom::{Point, Range};

/// A single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Passable cell, written `0` in maze files.
    #[default]
    Open,
    /// Blocked cell, written `1` in maze files.
    Wall,
}

impl Tile {
    /// Map a maze-file digit to a tile.
    pub const fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Self::Open),
            '1' => Some(Self::Wall),
            _ => None,
        }
    }

    /// The maze-file digit for this tile.
    pub const fn digit(self) -> char {
        match self {
            Self::Open => '0',
            Self::Wall => '1',
        }
    }

    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A 2D grid of [`Tile`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeGrid {
    tiles: Vec<Tile>,
    bounds: Range,
}

impl MazeGrid {
    /// Create a new grid filled with `tile`.
    pub fn new(width: i32, height: i32, tile: Tile) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            tiles: vec![tile; bounds.len()],
            bounds,
        }
    }

    /// Build a grid from rows of tiles. Short rows are padded with walls up
    /// to the longest row.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as i32;
        let mut grid = Self::new(width, rows.len() as i32, Tile::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                grid.set(Point::new(x as i32, y as i32), tile);
            }
        }
        grid
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Whether `p` is inside the grid and open.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_open)
    }

    /// Set the tile at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    /// Count how many tiles equal `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }

    /// Render the grid back into maze-file text, one row per line.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height() as usize);
        for (p, tile) in self.iter() {
            out.push(tile.digit());
            if p.x == self.bounds.max.x - 1 {
                out.push('\n');
            }
        }
        out
    }
}
