//! Random maze generation.
//!
//! [`MazeGen`] carves a perfect maze with an iterative recursive backtracker
//! over the odd cells of the grid, then optionally knocks out a fraction of
//! interior walls to create loops. The generated maze always has exactly one
//! opening on the top border and one on the bottom border, so
//! [`find_endpoints`](crate::loader::find_endpoints) succeeds on it.

use log::debug;
use rand::Rng;

use crate::geom::Point;
use crate::grid::{MazeGrid, Tile};

/// The smallest maze side that can hold a carved corridor.
pub const MIN_SIDE: i32 = 3;

/// Maze generator driven by a random number generator.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Carve a perfect maze of the given size (each side at least
    /// [`MIN_SIDE`]).
    pub fn backtracker(&mut self, width: i32, height: i32) -> MazeGrid {
        let width = width.max(MIN_SIDE);
        let height = height.max(MIN_SIDE);
        let mut grid = MazeGrid::new(width, height, Tile::Wall);

        let first = Point::new(1, 1);
        grid.set(first, Tile::Open);
        let mut stack = vec![first];
        let mut options = Vec::with_capacity(4);

        while let Some(&cur) = stack.last() {
            options.clear();
            for (dx, dy) in [(0, -2), (0, 2), (-2, 0), (2, 0)] {
                let next = cur.shift(dx, dy);
                if is_room(width, height, next) && grid.at(next) == Some(Tile::Wall) {
                    options.push(next);
                }
            }
            if options.is_empty() {
                stack.pop();
                continue;
            }
            let next = options[self.rng.random_range(0..options.len())];
            let between = Point::new((cur.x + next.x) / 2, (cur.y + next.y) / 2);
            grid.set(between, Tile::Open);
            grid.set(next, Tile::Open);
            stack.push(next);
        }

        // Entrance above the first room, exit below the last one.
        let last = Point::new(last_room(width), last_room(height));
        grid.set(Point::new(first.x, 0), Tile::Open);
        for y in last.y..height {
            grid.set(Point::new(last.x, y), Tile::Open);
        }

        debug!(
            "generated {}x{} maze with {} open cells",
            width,
            height,
            grid.count(Tile::Open)
        );
        grid
    }

    /// Open each interior wall that separates two open cells with
    /// probability `fraction`, turning a perfect maze into one with loops.
    ///
    /// Returns the number of walls removed.
    pub fn add_loops(&mut self, grid: &mut MazeGrid, fraction: f64) -> usize {
        let fraction = fraction.clamp(0.0, 1.0);
        let (w, h) = (grid.width(), grid.height());
        let candidates: Vec<Point> = grid
            .iter()
            .filter(|&(p, tile)| {
                tile == Tile::Wall && p.x > 0 && p.y > 0 && p.x < w - 1 && p.y < h - 1
            })
            .map(|(p, _)| p)
            .filter(|&p| {
                let horizontal = grid.is_open(p.shift(-1, 0)) && grid.is_open(p.shift(1, 0));
                let vertical = grid.is_open(p.shift(0, -1)) && grid.is_open(p.shift(0, 1));
                horizontal != vertical
            })
            .collect();

        let mut removed = 0;
        for p in candidates {
            if self.rng.random_bool(fraction) {
                grid.set(p, Tile::Open);
                removed += 1;
            }
        }
        removed
    }
}

/// Whether `p` is one of the odd "room" cells strictly inside the border.
fn is_room(width: i32, height: i32, p: Point) -> bool {
    p.x > 0 && p.y > 0 && p.x < width - 1 && p.y < height - 1 && p.x % 2 == 1 && p.y % 2 == 1
}

/// Coordinate of the last odd room along an axis of length `n`.
fn last_room(n: i32) -> i32 {
    if n % 2 == 1 { n - 2 } else { n - 3 }
}
