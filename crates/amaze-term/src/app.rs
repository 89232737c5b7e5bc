//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! The loop is single-threaded. Each round it drains queued messages through
//! the model, draws, sends the diff to the driver, then waits for input until
//! the next scheduled tick.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;

use crate::messages::Msg;
use crate::screen::{Frame, Screen, compute_frame};

/// How long to wait for input when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Deliver [`Msg::Tick`] after the given delay. A later `Tick` replaces
    /// an earlier pending one.
    Tick(Duration),
    /// Stop the application loop.
    End,
}

/// The application model.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `screen`.
    fn draw(&self, screen: &mut Screen);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    fn init(&mut self) -> Result<()>;

    /// Wait up to `timeout` for input and send the resulting messages
    /// through `tx`.
    fn poll_msgs(&mut self, timeout: Duration, tx: &Sender<Msg>) -> Result<()>;

    /// Paint a computed frame.
    fn flush(&mut self, frame: Frame) -> Result<()>;

    /// Restore the terminal. Called even when the loop fails.
    fn close(&mut self);
}

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`] or the driver fails.
    pub fn run(&mut self) -> Result<()> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    /// Consume the app and hand back the model.
    pub fn into_model(self) -> M {
        self.model
    }

    fn event_loop(&mut self) -> Result<()> {
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev = Screen::new(self.width, self.height);
        let mut curr = Screen::new(self.width, self.height);
        prev.invalidate();
        let mut next_tick: Option<Instant> = None;

        loop {
            if self.process_pending(&rx, &mut next_tick, &mut prev, &mut curr)? == Flow::Stop {
                debug!("application loop finished");
                return Ok(());
            }

            let timeout = match next_tick {
                Some(at) => at.saturating_duration_since(Instant::now()),
                None => IDLE_POLL,
            };
            self.driver.poll_msgs(timeout, &tx)?;

            if next_tick.is_some_and(|at| Instant::now() >= at) {
                next_tick = None;
                tx.send(Msg::Tick).ok();
            }
        }
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        next_tick: &mut Option<Instant>,
        prev: &mut Screen,
        curr: &mut Screen,
    ) -> Result<Flow> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height } = msg {
                debug!("resize to {width}x{height}");
                *prev = Screen::new(width, height);
                prev.invalidate();
                *curr = Screen::new(width, height);
            }
            match self.model.update(msg) {
                Some(Effect::End) => return Ok(Flow::Stop),
                Some(Effect::Tick(delay)) => *next_tick = Some(Instant::now() + delay),
                None => {}
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.copy_from(curr);
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::messages::Key;
    use crate::screen::{Cell, Style};
    use amaze_core::Point;
    use std::collections::VecDeque;

    /// Driver that replays a fixed list of messages, one per poll, and keeps
    /// every frame it was asked to paint.
    pub(crate) struct ScriptedDriver {
        pub script: VecDeque<Msg>,
        pub frames: Vec<Frame>,
        pub closed: bool,
    }

    impl ScriptedDriver {
        pub(crate) fn new(script: impl IntoIterator<Item = Msg>) -> Self {
            Self {
                script: script.into_iter().collect(),
                frames: Vec::new(),
                closed: false,
            }
        }
    }

    impl Driver for ScriptedDriver {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn poll_msgs(&mut self, _timeout: Duration, tx: &Sender<Msg>) -> Result<()> {
            match self.script.pop_front() {
                Some(msg) => {
                    tx.send(msg).ok();
                    Ok(())
                }
                None => anyhow::bail!("script exhausted"),
            }
        }

        fn flush(&mut self, frame: Frame) -> Result<()> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    /// Counts key presses and ticks, quits on `q`.
    #[derive(Default)]
    struct Counter {
        keys: usize,
        ticks: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown(Key::Char('q')) => Some(Effect::End),
                Msg::KeyDown(Key::Char('t')) => Some(Effect::Tick(Duration::ZERO)),
                Msg::KeyDown(_) => {
                    self.keys += 1;
                    None
                }
                Msg::Tick => {
                    self.ticks += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, screen: &mut Screen) {
            screen.print(
                Point::ZERO,
                &format!("{}:{}", self.keys, self.ticks),
                Style::default(),
            );
        }
    }

    fn app(script: Vec<Msg>) -> App<Counter, ScriptedDriver> {
        App::new(AppConfig {
            model: Counter::default(),
            driver: ScriptedDriver::new(script),
            width: 8,
            height: 1,
        })
    }

    #[test]
    fn runs_until_end_effect() {
        let mut app = app(vec![
            Msg::KeyDown(Key::Enter),
            Msg::KeyDown(Key::Space),
            Msg::KeyDown(Key::Char('q')),
        ]);
        app.run().unwrap();
        assert!(app.driver.closed);
        assert_eq!(app.model.keys, 2);
        // Init paints the whole screen, each key repaints the counter.
        assert_eq!(app.driver.frames[0].cells.len(), 8);
        assert_eq!(
            app.driver.frames.last().unwrap().cells[0].cell,
            Cell::new('2', Style::default())
        );
    }

    #[test]
    fn scheduled_tick_is_delivered() {
        let mut app = app(vec![
            Msg::KeyDown(Key::Char('t')),
            Msg::KeyDown(Key::Escape),
            Msg::KeyDown(Key::Char('q')),
        ]);
        app.run().unwrap();
        assert_eq!(app.model.ticks, 1);
    }

    #[test]
    fn resize_replaces_both_buffers() {
        let mut app = app(vec![
            Msg::Screen {
                width: 4,
                height: 2,
            },
            Msg::KeyDown(Key::Char('q')),
        ]);
        app.run().unwrap();
        let frame = app.driver.frames.last().unwrap();
        // Full repaint at the new size, nothing outside it.
        assert_eq!(frame.cells.len(), 8);
        assert!(frame.cells.iter().all(|fc| fc.pos.x < 4 && fc.pos.y < 2));
        assert!(frame.cells.iter().any(|fc| fc.pos.y == 1));
    }

    #[test]
    fn driver_errors_propagate_and_close() {
        let mut app = app(vec![Msg::KeyDown(Key::Enter)]);
        assert!(app.run().is_err());
        assert!(app.driver.closed);
    }
}
