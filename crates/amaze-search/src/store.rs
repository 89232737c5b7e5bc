use std::collections::HashMap;

use amaze_core::Point;

use crate::node::{Node, Status};

/// Sparse map from coordinates to search nodes.
///
/// Nodes are created on first discovery and live until the store is
/// dropped; there is no removal. A coordinate that was never discovered has
/// no entry at all.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
    nodes: HashMap<Point, Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node at `p`, creating an undiscovered one if absent.
    pub fn get_or_create(&mut self, p: Point) -> &mut Node {
        self.nodes.entry(p).or_insert_with(|| Node::new(p))
    }

    /// Non-creating lookup.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Node> {
        self.nodes.get(&p)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.nodes.contains_key(&p)
    }

    /// Status of `p`, `Unvisited` if it has no node.
    #[inline]
    pub fn status(&self, p: Point) -> Status {
        self.get(p).map_or(Status::Unvisited, Node::status)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes currently in `status`.
    pub fn count(&self, status: Status) -> usize {
        self.nodes.values().filter(|n| n.status() == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Cost;

    #[test]
    fn get_does_not_create() {
        let store = NodeStore::new();
        assert!(store.get(Point::new(1, 1)).is_none());
        assert!(store.is_empty());
        assert_eq!(store.status(Point::new(1, 1)), Status::Unvisited);
    }

    #[test]
    fn get_or_create_inserts_once() {
        let mut store = NodeStore::new();
        let p = Point::new(3, 4);
        {
            let node = store.get_or_create(p);
            assert_eq!(node.status(), Status::Unvisited);
            assert_eq!(node.g_cost(), Cost::INFINITY);
            node.relax(Cost::new(2), Point::new(3, 3));
        }
        // The second call returns the mutated record, not a fresh one.
        let again = store.get_or_create(p);
        assert_eq!(again.g_cost(), Cost::new(2));
        assert_eq!(store.len(), 1);
        assert!(store.contains(p));
    }

    #[test]
    fn count_by_status() {
        let mut store = NodeStore::new();
        store.get_or_create(Point::new(0, 0)).discover();
        store.get_or_create(Point::new(1, 0)).discover();
        store.get_or_create(Point::new(1, 0)).settle();
        store.get_or_create(Point::new(2, 0));
        assert_eq!(store.count(Status::Frontier), 1);
        assert_eq!(store.count(Status::Settled), 1);
        assert_eq!(store.count(Status::Unvisited), 1);
        assert_eq!(store.iter().count(), 3);
    }
}
