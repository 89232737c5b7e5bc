//! **amaze-term**: terminal front end for the maze solver.
//!
//! This crate provides a small Elm-architecture application loop, a cell
//! buffer with frame diffing, a crossterm driver, and the [`SolverView`]
//! model that animates an [`amaze_search::Maze`] one expansion per tick.

pub mod app;
pub mod cli;
pub mod config;
pub mod driver;
pub mod logging;
pub mod messages;
pub mod render;
pub mod screen;
pub mod view;

use std::io::Write;

use amaze_core::{Endpoints, MazeGrid};
use amaze_search::{Maze, SolveResult};
use anyhow::Result;
use log::{info, warn};

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use cli::Cli;
pub use config::{Glyphs, ViewConfig};
pub use driver::CrosstermDriver;
pub use messages::{Key, Msg};
pub use render::render_text;
pub use screen::{Cell, Color, Screen, Style};
pub use view::SolverView;

/// Solve without the interactive view and write the maze with the result to
/// `out`.
pub fn print_solution<W: Write>(
    grid: &MazeGrid,
    endpoints: Endpoints,
    glyphs: &Glyphs,
    out: &mut W,
) -> Result<SolveResult> {
    let mut maze = Maze::new(endpoints.start, endpoints.target);
    let result = maze.solve(grid);
    out.write_all(render_text(grid, endpoints, Some(&maze), glyphs).as_bytes())?;
    let stats = maze.stats();
    match &result {
        SolveResult::Solved(path) => writeln!(
            out,
            "path: {} steps, {} nodes expanded",
            path.len(),
            stats.expanded
        )?,
        SolveResult::NoSolution => {
            writeln!(out, "no path, {} nodes expanded", stats.expanded)?
        }
    }
    Ok(result)
}

/// Run the program described by `cli`.
pub fn run(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        logging::init(path, cli.verbose)?;
    }
    let grid = cli.load_grid()?;
    let endpoints = cli.endpoints(&grid)?;
    let config = cli.view_config()?;
    info!("start {} target {}", endpoints.start, endpoints.target);

    if cli.print {
        let stdout = std::io::stdout();
        print_solution(&grid, endpoints, &config.glyphs, &mut stdout.lock())?;
        return Ok(());
    }

    let model = SolverView::new(grid, endpoints, config);
    let min = model.min_size();
    let (width, height) = match crossterm::terminal::size() {
        Ok((w, h)) => (i32::from(w).max(min.x), i32::from(h).max(min.y)),
        Err(e) => {
            warn!("cannot query terminal size: {e}");
            (min.x, min.y)
        }
    };
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width,
        height,
    });
    app.run()
}
