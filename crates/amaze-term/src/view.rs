//! The interactive solver: a [`Model`] that owns the grid and at most one
//! running search.

use std::fmt;

use amaze_core::{Endpoints, MazeGrid, Point};
use amaze_search::{Maze, SolveResult, Step};
use log::{debug, info};

use crate::app::{Effect, Model};
use crate::config::{MAX_DELAY_MS, ViewConfig};
use crate::messages::{Key, Msg};
use crate::render::{CellKind, Overlay};
use crate::screen::{Cell, Color, Screen, Style};

/// Delay change per `+` / `-` press, in milliseconds.
const DELAY_STEP_MS: u64 = 10;

const HELP: &str = "enter solve  space pause  s step  a animate  +/- speed  r reset  q quit";

/// Where the viewer is in its solve cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No search yet.
    Ready,
    /// Animating, one expansion per tick.
    Running,
    /// A search exists but ticks are ignored.
    Paused,
    /// The search finished.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Ready => "ready",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Done => "done",
        })
    }
}

pub struct SolverView {
    grid: MazeGrid,
    endpoints: Endpoints,
    config: ViewConfig,
    maze: Option<Maze>,
    phase: Phase,
}

impl SolverView {
    pub fn new(grid: MazeGrid, endpoints: Endpoints, config: ViewConfig) -> Self {
        Self {
            grid,
            endpoints,
            config,
            maze: None,
            phase: Phase::Ready,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Width and height needed to show the grid plus the status lines.
    pub fn min_size(&self) -> Point {
        Point::new(
            self.grid.width().max(HELP.len() as i32),
            self.grid.height() + 3,
        )
    }

    fn tick(&self) -> Option<Effect> {
        Some(Effect::Tick(self.config.delay()))
    }

    /// Build a fresh search, dropping any previous one.
    fn begin(&mut self) {
        debug!(
            "new search {} -> {}",
            self.endpoints.start, self.endpoints.target
        );
        self.maze = Some(Maze::new(self.endpoints.start, self.endpoints.target));
    }

    fn start(&mut self) -> Option<Effect> {
        self.begin();
        if self.config.animate {
            self.phase = Phase::Running;
            return self.tick();
        }
        let maze = self.maze.as_mut()?;
        let result = maze.solve(&self.grid);
        self.finish(&result);
        None
    }

    /// Expand one node. Returns true once the search is over.
    fn advance(&mut self) -> bool {
        let Some(maze) = self.maze.as_mut() else {
            return true;
        };
        match maze.step(&self.grid) {
            Step::Expanded(_) => false,
            Step::Finished(result) => {
                self.finish(&result);
                true
            }
        }
    }

    fn finish(&mut self, result: &SolveResult) {
        self.phase = Phase::Done;
        let expanded = self.maze.as_ref().map_or(0, |m| m.stats().expanded);
        match result {
            SolveResult::Solved(path) => {
                info!("path of {} steps, {expanded} nodes expanded", path.len())
            }
            SolveResult::NoSolution => info!("no path, {expanded} nodes expanded"),
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Enter => {
                if matches!(self.phase, Phase::Ready | Phase::Done) {
                    return self.start();
                }
            }
            Key::Space => match self.phase {
                Phase::Ready | Phase::Done => return self.start(),
                Phase::Running => self.phase = Phase::Paused,
                Phase::Paused => {
                    self.phase = Phase::Running;
                    return self.tick();
                }
            },
            Key::Char('s') => {
                if matches!(self.phase, Phase::Ready | Phase::Done) {
                    self.begin();
                    self.phase = Phase::Paused;
                }
                if self.phase == Phase::Paused {
                    self.advance();
                }
            }
            Key::Char('a') => {
                self.config.animate = !self.config.animate;
            }
            Key::Char('+') | Key::Char('=') => {
                self.config.delay_ms = self.config.delay_ms.saturating_sub(DELAY_STEP_MS);
            }
            Key::Char('-') => {
                self.config.delay_ms = (self.config.delay_ms + DELAY_STEP_MS).min(MAX_DELAY_MS);
            }
            Key::Char('r') => {
                // Dropping the maze cancels any running animation.
                self.maze = None;
                self.phase = Phase::Ready;
            }
            Key::Char(_) => {}
        }
        None
    }

    fn status_line(&self) -> String {
        let mut line = self.phase.to_string();
        if let Some(maze) = &self.maze {
            let stats = maze.stats();
            line.push_str(&format!(
                "  expanded {}  frontier {}",
                stats.expanded,
                maze.frontier().len()
            ));
            match maze.outcome() {
                Some(SolveResult::Solved(path)) => line.push_str(&format!("  path {}", path.len())),
                Some(SolveResult::NoSolution) => line.push_str("  no path"),
                None => {}
            }
        }
        let animate = if self.config.animate { "on" } else { "off" };
        line.push_str(&format!(
            "  delay {}ms  animate {animate}",
            self.config.delay_ms
        ));
        line
    }
}

fn style_for(kind: CellKind) -> Style {
    match kind {
        CellKind::Start | CellKind::Target => Style::fg(Color::from_rgb(0xE0, 0x40, 0x40)).with_bold(),
        CellKind::Path => Style::fg(Color::from_rgb(0x40, 0xD0, 0x60)).with_bold(),
        CellKind::Current => Style::fg(Color::from_rgb(0xD0, 0x60, 0xD0)).with_bold(),
        CellKind::Wall => Style::fg(Color::from_rgb(0x80, 0x80, 0x80))
            .with_bg(Color::from_rgb(0x30, 0x30, 0x30)),
        CellKind::Frontier => Style::fg(Color::from_rgb(0xE0, 0xC0, 0x40)),
        CellKind::Settled => Style::fg(Color::from_rgb(0x50, 0x80, 0xE0)),
        CellKind::Open => Style::default(),
    }
}

impl Model for SolverView {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown(key) => self.on_key(key),
            Msg::Tick => {
                if self.phase != Phase::Running || self.advance() {
                    return None;
                }
                self.tick()
            }
            Msg::Init | Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(Cell::default());
        let overlay = Overlay::new(&self.grid, self.endpoints, self.maze.as_ref());
        for p in self.grid.bounds() {
            let kind = overlay.kind(p);
            screen.set(p, Cell::new(self.config.glyphs.glyph(kind), style_for(kind)));
        }

        let y = self.grid.height() + 1;
        screen.print(Point::new(0, y), &self.status_line(), Style::default().with_bold());
        screen.print(
            Point::new(0, y + 1),
            HELP,
            Style::fg(Color::from_rgb(0x90, 0x90, 0x90)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::ScriptedDriver;
    use crate::app::{App, AppConfig};
    use amaze_core::{find_endpoints, loader};
    use amaze_search::Status;
    use std::time::Duration;

    // Start (0, 0), target (2, 1), the only route runs down and around.
    const U_TURN: &str = "011\n010\n000";

    fn view(text: &str, animate: bool) -> SolverView {
        let grid = loader::parse(text).unwrap();
        let endpoints = find_endpoints(&grid).unwrap();
        let config = ViewConfig {
            animate,
            ..ViewConfig::default()
        };
        SolverView::new(grid, endpoints, config)
    }

    fn key(c: char) -> Msg {
        Msg::KeyDown(Key::Char(c))
    }

    fn path_len(view: &SolverView) -> Option<usize> {
        view.maze()
            .and_then(|m| m.outcome())
            .and_then(|r| r.path())
            .map(<[Point]>::len)
    }

    #[test]
    fn instant_solve() {
        let mut v = view(U_TURN, false);
        assert_eq!(v.update(Msg::KeyDown(Key::Enter)), None);
        assert_eq!(v.phase(), Phase::Done);
        assert_eq!(path_len(&v), Some(5));
    }

    #[test]
    fn animated_solve_runs_on_ticks() {
        let mut v = view(U_TURN, true);
        assert_eq!(
            v.update(Msg::KeyDown(Key::Enter)),
            Some(Effect::Tick(Duration::from_millis(30)))
        );
        assert_eq!(v.phase(), Phase::Running);

        let mut ticks = 0;
        while v.update(Msg::Tick).is_some() {
            ticks += 1;
            assert!(ticks < 100, "animation never finished");
        }
        assert_eq!(v.phase(), Phase::Done);
        assert_eq!(path_len(&v), Some(5));
        assert_eq!(v.maze().unwrap().nodes().count(Status::Settled), 5);
    }

    #[test]
    fn pause_and_single_step() {
        let mut v = view(U_TURN, true);
        v.update(Msg::KeyDown(Key::Enter));
        v.update(Msg::Tick);
        assert_eq!(v.update(Msg::KeyDown(Key::Space)), None);
        assert_eq!(v.phase(), Phase::Paused);

        let before = v.maze().unwrap().stats().expanded;
        assert_eq!(v.update(Msg::Tick), None);
        assert_eq!(v.maze().unwrap().stats().expanded, before);

        v.update(key('s'));
        assert_eq!(v.maze().unwrap().stats().expanded, before + 1);

        assert!(v.update(Msg::KeyDown(Key::Space)).is_some());
        assert_eq!(v.phase(), Phase::Running);
    }

    #[test]
    fn step_from_ready_creates_search() {
        let mut v = view(U_TURN, true);
        v.update(key('s'));
        assert_eq!(v.phase(), Phase::Paused);
        assert_eq!(v.maze().unwrap().stats().expanded, 1);
    }

    #[test]
    fn reset_drops_search() {
        let mut v = view(U_TURN, true);
        v.update(Msg::KeyDown(Key::Enter));
        v.update(key('r'));
        assert_eq!(v.phase(), Phase::Ready);
        assert!(v.maze().is_none());
        // A tick scheduled before the reset is ignored.
        assert_eq!(v.update(Msg::Tick), None);
    }

    #[test]
    fn quit_keys() {
        let mut v = view(U_TURN, true);
        assert_eq!(v.update(key('q')), Some(Effect::End));
        assert_eq!(v.update(Msg::KeyDown(Key::Escape)), Some(Effect::End));
    }

    #[test]
    fn toggles_and_delay() {
        let mut v = view(U_TURN, true);
        v.update(key('a'));
        assert!(!v.config().animate);
        v.update(key('+'));
        assert_eq!(v.config().delay_ms, 20);
        v.update(key('-'));
        v.update(key('-'));
        assert_eq!(v.config().delay_ms, 40);
        for _ in 0..10 {
            v.update(key('+'));
        }
        assert_eq!(v.config().delay_ms, 0);
    }

    #[test]
    fn unreachable_target() {
        let mut v = view("011\n111\n110", false);
        v.update(Msg::KeyDown(Key::Enter));
        assert_eq!(v.phase(), Phase::Done);
        assert!(v.status_line().contains("no path"));
    }

    #[test]
    fn draw_grid_and_status() {
        let mut v = view(U_TURN, false);
        let size = v.min_size();
        let mut screen = Screen::new(size.x, size.y);
        v.draw(&mut screen);
        assert!(screen.row_text(0).starts_with("S##"));
        assert!(screen.row_text(4).starts_with("ready"));
        assert!(screen.row_text(5).starts_with("enter solve"));

        v.update(Msg::KeyDown(Key::Enter));
        v.draw(&mut screen);
        assert!(screen.row_text(1).starts_with("*#T"));
        assert!(screen.row_text(2).starts_with("***"));
        assert!(screen.row_text(4).contains("path 5"));
    }

    #[test]
    fn runs_inside_app() {
        let model = view(U_TURN, false);
        let size = model.min_size();
        let mut app = App::new(AppConfig {
            model,
            driver: ScriptedDriver::new([Msg::KeyDown(Key::Enter), key('q')]),
            width: size.x,
            height: size.y,
        });
        app.run().unwrap();
        let v = app.into_model();
        assert_eq!(v.phase(), Phase::Done);
    }
}
