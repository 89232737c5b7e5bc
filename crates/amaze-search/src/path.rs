use amaze_core::Point;
use log::warn;

use crate::store::NodeStore;

/// Walk `parent` links from `target` back to `start` and return the path in
/// start-to-target order. The start itself is not part of the path; the
/// target is its last element. `start == target` yields an empty path.
pub fn reconstruct(store: &NodeStore, start: Point, target: Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cur = target;
    while cur != start {
        path.push(cur);
        match store.get(cur).and_then(|n| n.parent()) {
            Some(parent) if path.len() <= store.len() => cur = parent,
            _ => {
                warn!("parent chain from {target} broken at {cur}");
                break;
            }
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Cost;

    fn link(store: &mut NodeStore, chain: &[Point]) {
        store.get_or_create(chain[0]).make_start(Cost::new(9));
        for (i, pair) in chain.windows(2).enumerate() {
            store
                .get_or_create(pair[1])
                .relax(Cost::new(i as u32 + 1), pair[0]);
        }
    }

    #[test]
    fn excludes_start_includes_target() {
        let chain = [
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(2, 1),
        ];
        let mut store = NodeStore::new();
        link(&mut store, &chain);
        let path = reconstruct(&store, chain[0], chain[3]);
        assert_eq!(path, chain[1..].to_vec());
    }

    #[test]
    fn start_equals_target_is_empty() {
        let mut store = NodeStore::new();
        link(&mut store, &[Point::new(2, 2)]);
        assert!(reconstruct(&store, Point::new(2, 2), Point::new(2, 2)).is_empty());
    }

    #[test]
    fn broken_chain_stops() {
        let mut store = NodeStore::new();
        store.get_or_create(Point::new(4, 4));
        let path = reconstruct(&store, Point::new(0, 0), Point::new(4, 4));
        assert_eq!(path, vec![Point::new(4, 4)]);
    }
}
