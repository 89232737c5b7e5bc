use std::path::PathBuf;

use amaze_core::mapgen::MIN_SIDE;
use amaze_core::{
    Endpoints, MazeGen, MazeGrid, Point, find_start, find_target, loader, validate_endpoints,
};
use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{MAX_DELAY_MS, ViewConfig};

#[derive(Parser, Debug)]
#[command(name = "amaze")]
#[command(author, version, about)]
#[command(long_about = "Watch a best-first search find its way through a maze.\n\n\
    A maze file holds one row per line, 0 for open cells and 1 for walls.\n\n\
    Examples:\n  \
    amaze maze.txt                  Solve interactively\n  \
    amaze maze.txt --print          Print the solved maze and exit\n  \
    amaze --generate 41x21 --seed 7 Solve a generated maze")]
#[command(group(ArgGroup::new("source").required(true).args(["file", "generate"])))]
pub struct Cli {
    /// Maze file to solve
    pub file: Option<PathBuf>,

    /// Generate a random maze of WIDTHxHEIGHT instead of reading a file
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub generate: Option<Point>,

    /// Seed for --generate
    #[arg(long, requires = "generate")]
    pub seed: Option<u64>,

    /// Share of inner walls to knock out in a generated maze (0.0 to 1.0)
    #[arg(long, value_name = "SHARE", requires = "generate")]
    pub loops: Option<f64>,

    /// Start cell instead of the derived one
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub start: Option<Point>,

    /// Target cell instead of the derived one
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub target: Option<Point>,

    /// Solve without the interactive view and print the result
    #[arg(long)]
    pub print: bool,

    /// YAML file with viewer settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Milliseconds between animation steps (overrides the config file)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Solve in one go instead of animating
    #[arg(long)]
    pub no_animate: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Read the maze file or generate a maze.
    pub fn load_grid(&self) -> Result<MazeGrid> {
        if let Some(size) = self.generate {
            let seed = self.seed.unwrap_or_else(rand::random);
            info!("generating {}x{} maze with seed {seed}", size.x, size.y);
            let mut mapgen = MazeGen::new(StdRng::seed_from_u64(seed));
            let mut grid = mapgen.backtracker(size.x, size.y);
            if let Some(share) = self.loops {
                let removed = mapgen.add_loops(&mut grid, share);
                info!("removed {removed} walls");
            }
            return Ok(grid);
        }
        let path = self.file.as_deref().context("No maze file given")?;
        let grid = loader::load(path)?;
        info!(
            "loaded {}x{} maze from {}",
            grid.width(),
            grid.height(),
            path.display()
        );
        Ok(grid)
    }

    /// Resolve the endpoints. An explicit `--start` / `--target` is used as
    /// given; a missing one is derived from the border, never landing on the
    /// other endpoint.
    pub fn endpoints(&self, grid: &MazeGrid) -> Result<Endpoints> {
        let start = match self.start {
            Some(start) => start,
            None => find_start(grid, self.target)?,
        };
        let target = match self.target {
            Some(target) => target,
            None => find_target(grid, Some(start))?,
        };
        Ok(validate_endpoints(grid, Endpoints { start, target })?)
    }

    /// The config file (if any) with command line overrides applied.
    pub fn view_config(&self) -> Result<ViewConfig> {
        let mut config = match &self.config {
            Some(path) => ViewConfig::load(path)?,
            None => ViewConfig::default(),
        };
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms.min(MAX_DELAY_MS);
        }
        if self.no_animate {
            config.animate = false;
        }
        Ok(config)
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `41x21`.
pub fn parse_size(s: &str) -> Result<Point, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: i32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let h: i32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    if w < MIN_SIDE || h < MIN_SIDE {
        return Err(format!("each side must be at least {MIN_SIDE}"));
    }
    Ok(Point::new(w, h))
}

/// Parse `X,Y`, e.g. `0,3`.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: i32 = x.trim().parse().map_err(|_| format!("bad x '{x}'"))?;
    let y: i32 = y.trim().parse().map_err(|_| format!("bad y '{y}'"))?;
    if x < 0 || y < 0 {
        return Err("coordinates must not be negative".to_string());
    }
    Ok(Point::new(x, y))
}
