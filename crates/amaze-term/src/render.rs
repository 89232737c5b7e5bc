//! Classifying maze cells for display, and the plain-text rendering used by
//! `--print`.

use std::collections::HashSet;

use amaze_core::{Endpoints, MazeGrid, Point};
use amaze_search::{Maze, Status};

use crate::config::Glyphs;

/// What a cell shows, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Start,
    Target,
    Path,
    /// The cell the next step will expand.
    Current,
    Wall,
    Frontier,
    Settled,
    Open,
}

impl Glyphs {
    pub fn glyph(&self, kind: CellKind) -> char {
        match kind {
            CellKind::Start => self.start,
            CellKind::Target => self.target,
            CellKind::Path => self.path,
            CellKind::Current => self.current,
            CellKind::Wall => self.wall,
            CellKind::Frontier => self.frontier,
            CellKind::Settled => self.settled,
            CellKind::Open => self.open,
        }
    }
}

/// A snapshot of a (possibly absent) search laid over the grid.
pub struct Overlay<'a> {
    grid: &'a MazeGrid,
    endpoints: Endpoints,
    maze: Option<&'a Maze>,
    path: HashSet<Point>,
}

impl<'a> Overlay<'a> {
    pub fn new(grid: &'a MazeGrid, endpoints: Endpoints, maze: Option<&'a Maze>) -> Self {
        let path = maze
            .map(|m| m.solution().iter().copied().collect())
            .unwrap_or_default();
        Self {
            grid,
            endpoints,
            maze,
            path,
        }
    }

    pub fn kind(&self, p: Point) -> CellKind {
        if p == self.endpoints.start {
            return CellKind::Start;
        }
        if p == self.endpoints.target {
            return CellKind::Target;
        }
        if self.path.contains(&p) {
            return CellKind::Path;
        }
        if !self.grid.is_open(p) {
            return CellKind::Wall;
        }
        let Some(maze) = self.maze else {
            return CellKind::Open;
        };
        if !maze.is_finished() && maze.current() == p {
            return CellKind::Current;
        }
        match maze.nodes().status(p) {
            Status::Frontier => CellKind::Frontier,
            Status::Settled => CellKind::Settled,
            Status::Unvisited => CellKind::Open,
        }
    }
}

/// Render the grid as glyph text, one line per row, with the search state of
/// `maze` (if any) overlaid.
pub fn render_text(
    grid: &MazeGrid,
    endpoints: Endpoints,
    maze: Option<&Maze>,
    glyphs: &Glyphs,
) -> String {
    let overlay = Overlay::new(grid, endpoints, maze);
    let mut out = String::with_capacity(grid.bounds().len() + grid.height() as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(glyphs.glyph(overlay.kind(Point::new(x, y))));
        }
        out.push('\n');
    }
    out
}
