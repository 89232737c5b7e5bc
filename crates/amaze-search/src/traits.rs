use amaze_core::{MazeGrid, Point};

/// Neighbour enumeration for the search.
///
/// Implementations decide which cells are passable and in bounds. The order
/// in which neighbours are appended is the order in which the search
/// discovers them, which matters for tie-breaking.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Open orthogonal neighbours, in the order up, down, left, right.
impl Pather for MazeGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_open(n)));
    }
}
