//! Cell buffer for the terminal: [`Color`], [`Style`], [`Cell`],
//! [`Screen`], and the [`Frame`] diff sent to the driver.

use amaze_core::{Point, Range};

// ---------------------------------------------------------------------------
// Color / Style / Cell
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB). `Color::DEFAULT` leaves
/// the terminal's own colour in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// High byte set, so no [`Color::from_rgb`] value (black included) equals it.
    pub const DEFAULT: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Foreground, background and boldness of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Style {
    #[inline]
    pub const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::DEFAULT,
            bold: false,
        }
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A styled character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A fixed-size rectangle of [`Cell`]s that a model draws into.
#[derive(Clone, Debug)]
pub struct Screen {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
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
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Read the cell at `p`; blank outside the bounds.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside the bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` starting at `p`, clipped at the right edge.
    pub fn print(&mut self, p: Point, text: &str, style: Style) {
        for (dx, ch) in text.chars().enumerate() {
            self.set(p.shift(dx as i32, 0), Cell::new(ch, style));
        }
    }

    /// Mark every cell as unknown so the next diff repaints everything.
    pub fn invalidate(&mut self) {
        self.fill(Cell::new('\0', Style::default()));
    }

    /// Copy all cells from a same-sized screen.
    pub fn copy_from(&mut self, other: &Screen) {
        if self.bounds == other.bounds {
            self.cells.copy_from_slice(&other.cells);
        }
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// One row as plain text.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width())
            .map(|x| self.at(Point::new(x, y)).ch)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The set of cell changes between two screens.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
}

/// Compute the difference between two same-sized screens.
pub fn compute_frame(prev: &Screen, curr: &Screen) -> Frame {
    let cells = curr
        .iter()
        .filter(|&(p, cell)| prev.at(p) != cell)
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame { cells }
}
