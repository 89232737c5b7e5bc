//! Incremental best-first search over maze grids.
//!
//! The search is A* with unit step costs and a Manhattan heuristic, built
//! from three parts:
//!
//! - a [`NodeStore`] that creates per-cell [`Node`] records lazily, the first
//!   time the search reaches a cell;
//! - a [`Frontier`] of discovered cells, scanned linearly to pick the next
//!   cell by lowest `f_cost`, then lowest `h_cost`, then lowest `g_cost`;
//! - a [`Maze`] that expands one node per [`Maze::step`] and reconstructs
//!   the path once the target is selected.
//!
//! ```
//! use amaze_core::{Point, loader};
//! use amaze_search::{Maze, SolveResult};
//!
//! let grid = loader::parse("000\n101\n000").unwrap();
//! let mut maze = Maze::new(Point::new(0, 0), Point::new(2, 2));
//! let result = maze.solve(&grid);
//! assert_eq!(result.path().map(<[Point]>::len), Some(4));
//! assert!(matches!(result, SolveResult::Solved(_)));
//! ```

mod distance;
mod engine;
mod frontier;
mod node;
mod path;
mod store;
mod traits;

pub use distance::manhattan;
pub use engine::{Maze, NullObserver, SearchStats, SolveResult, Step, StepObserver, solve};
pub use frontier::Frontier;
pub use node::{Cost, Node, Status};
pub use path::reconstruct;
pub use store::NodeStore;
pub use traits::Pather;
