//! Per-cell search state: [`Cost`], [`Status`] and [`Node`].

use std::fmt;
use std::ops::Add;

use amaze_core::Point;

// ---------------------------------------------------------------------------
// Cost
// ---------------------------------------------------------------------------

/// A path cost, or [`Cost::INFINITY`] while unknown.
///
/// Addition saturates: anything plus infinity is infinity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost(u32);

impl Cost {
    pub const ZERO: Self = Self(0);
    /// Cost of one orthogonal grid step.
    pub const STEP: Self = Self(1);
    /// Sentinel for "not yet known".
    pub const INFINITY: Self = Self(u32::MAX);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The finite value, or `None` for infinity.
    #[inline]
    pub const fn get(self) -> Option<u32> {
        if self.is_finite() { Some(self.0) } else { None }
    }

    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Add for Cost {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl From<u32> for Cost {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("inf"),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Where a node is in its lifecycle. Only ever moves forward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Never discovered.
    #[default]
    Unvisited,
    /// Discovered and waiting in the frontier; its cost may still improve.
    Frontier,
    /// Expanded; its cost is final.
    Settled,
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Search record for one grid cell.
///
/// `f_cost` is not stored: [`f_cost`](Self::f_cost) always derives it from
/// the current `g_cost` and `h_cost`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    coordinates: Point,
    g_cost: Cost,
    h_cost: Cost,
    parent: Option<Point>,
    status: Status,
}

impl Node {
    /// A fresh, undiscovered node with unknown costs.
    pub(crate) fn new(coordinates: Point) -> Self {
        Self {
            coordinates,
            g_cost: Cost::INFINITY,
            h_cost: Cost::INFINITY,
            parent: None,
            status: Status::Unvisited,
        }
    }

    #[inline]
    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    /// Cost of the best known path from the start.
    #[inline]
    pub fn g_cost(&self) -> Cost {
        self.g_cost
    }

    /// Heuristic estimate of the remaining cost to the target.
    #[inline]
    pub fn h_cost(&self) -> Cost {
        self.h_cost
    }

    /// `g_cost + h_cost`.
    #[inline]
    pub fn f_cost(&self) -> Cost {
        self.g_cost + self.h_cost
    }

    /// The node this one was reached from on its best known path.
    #[inline]
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Frontier selection key: `f`, then `h`, then `g`, all ascending.
    #[inline]
    pub(crate) fn priority(&self) -> (Cost, Cost, Cost) {
        (self.f_cost(), self.h_cost, self.g_cost)
    }

    /// Turn this node into the search root.
    pub(crate) fn make_start(&mut self, h_cost: Cost) {
        self.g_cost = Cost::ZERO;
        self.h_cost = h_cost;
        self.parent = None;
        self.status = Status::Frontier;
    }

    /// `Unvisited -> Frontier`. Returns `true` if the status changed.
    pub(crate) fn discover(&mut self) -> bool {
        if self.status != Status::Unvisited {
            return false;
        }
        self.status = Status::Frontier;
        true
    }

    /// Move to `Settled`. Returns `true` if the status changed.
    pub(crate) fn settle(&mut self) -> bool {
        if self.status == Status::Settled {
            return false;
        }
        self.status = Status::Settled;
        true
    }

    /// Record a path of cost `g_cost` through `parent` if it is strictly
    /// cheaper than the best known one. Settled nodes never change.
    pub(crate) fn relax(&mut self, g_cost: Cost, parent: Point) -> bool {
        if self.status == Status::Settled || g_cost >= self.g_cost {
            return false;
        }
        self.g_cost = g_cost;
        self.parent = Some(parent);
        true
    }

    /// Store `h_cost` if it is strictly smaller than the current estimate.
    pub(crate) fn offer_h_cost(&mut self, h_cost: Cost) -> bool {
        if h_cost >= self.h_cost {
            return false;
        }
        self.h_cost = h_cost;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_saturates_at_infinity() {
        assert_eq!(Cost::new(3) + Cost::STEP, Cost::new(4));
        assert_eq!(Cost::INFINITY + Cost::STEP, Cost::INFINITY);
        assert_eq!(Cost::new(u32::MAX - 1) + Cost::new(5), Cost::INFINITY);
        assert!(Cost::new(7) < Cost::INFINITY);
        assert_eq!(Cost::INFINITY.get(), None);
        assert_eq!(Cost::new(2).get(), Some(2));
        assert_eq!(Cost::INFINITY.to_string(), "inf");
        assert_eq!(Cost::new(12).to_string(), "12");
    }

    #[test]
    fn new_node_is_unknown() {
        let n = Node::new(Point::new(2, 3));
        assert_eq!(n.coordinates(), Point::new(2, 3));
        assert_eq!(n.status(), Status::Unvisited);
        assert_eq!(n.g_cost(), Cost::INFINITY);
        assert_eq!(n.h_cost(), Cost::INFINITY);
        assert_eq!(n.f_cost(), Cost::INFINITY);
        assert_eq!(n.parent(), None);
    }

    #[test]
    fn f_cost_tracks_g_and_h() {
        let mut n = Node::new(Point::new(1, 1));
        assert!(n.offer_h_cost(Cost::new(4)));
        assert_eq!(n.f_cost(), Cost::INFINITY);
        assert!(n.relax(Cost::new(2), Point::new(1, 0)));
        assert_eq!(n.f_cost(), Cost::new(6));
        assert!(n.relax(Cost::new(1), Point::new(0, 1)));
        assert_eq!(n.f_cost(), Cost::new(5));
        assert_eq!(n.parent(), Some(Point::new(0, 1)));
    }

    #[test]
    fn relax_requires_strict_improvement() {
        let mut n = Node::new(Point::new(1, 1));
        assert!(n.relax(Cost::new(3), Point::new(1, 0)));
        assert!(!n.relax(Cost::new(3), Point::new(0, 1)));
        assert!(!n.relax(Cost::new(5), Point::new(0, 1)));
        assert_eq!(n.parent(), Some(Point::new(1, 0)));
        assert_eq!(n.g_cost(), Cost::new(3));
    }

    #[test]
    fn h_cost_only_decreases() {
        let mut n = Node::new(Point::new(0, 0));
        assert!(n.offer_h_cost(Cost::new(5)));
        assert!(!n.offer_h_cost(Cost::new(5)));
        assert!(!n.offer_h_cost(Cost::new(9)));
        assert!(n.offer_h_cost(Cost::new(2)));
        assert_eq!(n.h_cost(), Cost::new(2));
    }

    #[test]
    fn status_only_moves_forward() {
        let mut n = Node::new(Point::new(0, 0));
        assert!(n.discover());
        assert!(!n.discover());
        assert_eq!(n.status(), Status::Frontier);
        assert!(n.settle());
        assert!(!n.settle());
        assert!(!n.discover());
        assert_eq!(n.status(), Status::Settled);
    }

    #[test]
    fn settled_node_is_never_relaxed() {
        let mut n = Node::new(Point::new(0, 0));
        n.relax(Cost::new(4), Point::new(1, 0));
        n.discover();
        n.settle();
        assert!(!n.relax(Cost::new(1), Point::new(0, 1)));
        assert_eq!(n.g_cost(), Cost::new(4));
        assert_eq!(n.parent(), Some(Point::new(1, 0)));
    }

    #[test]
    fn start_node_has_zero_g_and_no_parent() {
        let mut n = Node::new(Point::new(0, 0));
        n.make_start(Cost::new(6));
        assert_eq!(n.g_cost(), Cost::ZERO);
        assert_eq!(n.f_cost(), Cost::new(6));
        assert_eq!(n.parent(), None);
        assert_eq!(n.status(), Status::Frontier);
    }
}
