//! **amaze-core**: maze grid types shared by the solver and its front end.
//!
//! This crate provides geometry primitives, the open/wall [`MazeGrid`], the
//! text loader that turns maze files into grids (including start and target
//! derivation), and a seeded random maze generator.

pub mod geom;
pub mod grid;
pub mod loader;
pub mod mapgen;

pub use geom::{Point, Range};
pub use grid::{MazeGrid, Tile};
pub use loader::{
    Endpoints, GridError, find_endpoints, find_start, find_target, validate_endpoints,
};
pub use mapgen::MazeGen;
