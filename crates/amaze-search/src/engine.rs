//! The search driver: [`Maze`], [`Step`], [`SolveResult`].
//!
//! A [`Maze`] holds one solve attempt. Each call to [`Maze::step`] either
//! finishes the search or expands exactly one node and selects the next one,
//! so a front end can interleave rendering between steps. [`Maze::solve`]
//! simply steps until the search finishes.

use amaze_core::Point;
use log::{debug, trace};

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::node::{Cost, Status};
use crate::path::reconstruct;
use crate::store::NodeStore;
use crate::traits::Pather;

/// Outcome of a finished search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveResult {
    /// The target was reached. The path excludes the start and ends at the
    /// target.
    Solved(Vec<Point>),
    /// The frontier ran dry before the target was reached.
    NoSolution,
}

impl SolveResult {
    /// The path, if solved.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Solved(path) => Some(path),
            Self::NoSolution => None,
        }
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// What a single [`Maze::step`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The given coordinate was expanded and the next one selected.
    Expanded(Point),
    /// The search is over.
    Finished(SolveResult),
}

/// Counters updated while searching.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes settled so far.
    pub expanded: usize,
    /// Nodes that entered the frontier, the start included.
    pub discovered: usize,
}

/// Receives a callback once per expansion, after the neighbours of
/// `current` were processed and before the next node is selected.
pub trait StepObserver {
    fn on_step(&mut self, current: Point, maze: &Maze);
}

impl<F: FnMut(Point, &Maze)> StepObserver for F {
    fn on_step(&mut self, current: Point, maze: &Maze) {
        self(current, maze)
    }
}

/// Observer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl StepObserver for NullObserver {
    #[inline]
    fn on_step(&mut self, _current: Point, _maze: &Maze) {}
}

// ---------------------------------------------------------------------------
// Maze
// ---------------------------------------------------------------------------

/// State of one solve attempt.
///
/// Only the start node exists after construction; every other node is
/// created the first time the search reaches it. A new attempt needs a new
/// `Maze`.
#[derive(Clone, Debug)]
pub struct Maze {
    store: NodeStore,
    frontier: Frontier,
    start: Point,
    target: Point,
    current: Point,
    solution: Vec<Point>,
    stats: SearchStats,
    outcome: Option<SolveResult>,
    // scratch buffer for neighbor queries
    nbuf: Vec<Point>,
}

impl Maze {
    /// Prepare a search from `start` to `target`.
    pub fn new(start: Point, target: Point) -> Self {
        let mut store = NodeStore::new();
        store
            .get_or_create(start)
            .make_start(Cost::new(manhattan(start, target)));
        let mut frontier = Frontier::new();
        frontier.add(start);
        Self {
            store,
            frontier,
            start,
            target,
            current: start,
            solution: Vec::new(),
            stats: SearchStats {
                expanded: 0,
                discovered: 1,
            },
            outcome: None,
            nbuf: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// The coordinate the next step will expand.
    #[inline]
    pub fn current(&self) -> Point {
        self.current
    }

    #[inline]
    pub fn nodes(&self) -> &NodeStore {
        &self.store
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The reconstructed path; empty until the search succeeds.
    #[inline]
    pub fn solution(&self) -> &[Point] {
        &self.solution
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The result, once the search has finished.
    #[inline]
    pub fn outcome(&self) -> Option<&SolveResult> {
        self.outcome.as_ref()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance the search by one expansion.
    pub fn step<P: Pather>(&mut self, pather: &P) -> Step {
        self.step_observed(pather, &mut NullObserver)
    }

    /// Advance the search by one expansion, reporting it to `observer`.
    ///
    /// Once the search has finished, every further call returns the same
    /// [`Step::Finished`] without touching any state.
    pub fn step_observed<P: Pather, O: StepObserver + ?Sized>(
        &mut self,
        pather: &P,
        observer: &mut O,
    ) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Finished(outcome.clone());
        }

        let current = self.current;
        if current == self.target {
            let path = reconstruct(&self.store, self.start, self.target);
            self.solution = path.clone();
            return self.finish(SolveResult::Solved(path));
        }

        self.expand(pather, current);
        observer.on_step(current, self);

        match self.frontier.select_best(&self.store) {
            Some(next) => {
                self.current = next;
                Step::Expanded(current)
            }
            None => self.finish(SolveResult::NoSolution),
        }
    }

    /// Run the search to completion.
    pub fn solve<P: Pather>(&mut self, pather: &P) -> SolveResult {
        self.solve_observed(pather, &mut NullObserver)
    }

    /// Run the search to completion, reporting every expansion.
    pub fn solve_observed<P: Pather, O: StepObserver + ?Sized>(
        &mut self,
        pather: &P,
        observer: &mut O,
    ) -> SolveResult {
        debug!("solving {} -> {}", self.start, self.target);
        loop {
            if let Step::Finished(result) = self.step_observed(pather, observer) {
                return result;
            }
        }
    }

    /// Settle `current` and discover or relax its neighbours.
    fn expand<P: Pather>(&mut self, pather: &P, current: Point) {
        let node = self.store.get_or_create(current);
        node.settle();
        let g = node.g_cost();
        self.frontier.remove(current);
        self.stats.expanded += 1;
        trace!("expand {current} g={g} frontier={}", self.frontier.len());

        let candidate = g + Cost::STEP;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            let node = self.store.get_or_create(np);
            if node.status() == Status::Settled {
                continue;
            }
            if node.discover() {
                self.frontier.add(np);
                self.stats.discovered += 1;
            }
            node.relax(candidate, current);
            node.offer_h_cost(Cost::new(manhattan(np, self.target)));
        }

        self.nbuf = nbuf;
    }

    fn finish(&mut self, result: SolveResult) -> Step {
        match &result {
            SolveResult::Solved(path) => debug!(
                "solved {} -> {} in {} steps, expanded {} of {} discovered nodes",
                self.start,
                self.target,
                path.len(),
                self.stats.expanded,
                self.stats.discovered
            ),
            SolveResult::NoSolution => debug!(
                "no path {} -> {} after expanding {} nodes",
                self.start, self.target, self.stats.expanded
            ),
        }
        self.outcome = Some(result.clone());
        Step::Finished(result)
    }
}

/// Solve `maze` from `start`.
///
/// If `start` differs from the start `maze` was built with, the search
/// restarts on a fresh [`Maze`] towards the same target.
pub fn solve<P: Pather>(start: Point, maze: &mut Maze, pather: &P) -> SolveResult {
    if start != maze.start() {
        debug!("restarting search from {start}");
        *maze = Maze::new(start, maze.target());
    }
    maze.solve(pather)
}
