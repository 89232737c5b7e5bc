use amaze_core::Point;

use crate::store::NodeStore;

/// The working set of discovered, not yet settled coordinates.
///
/// Coordinates are kept in first-insertion order. Selection is a linear scan
/// over the set; see [`select_best`](Self::select_best).
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    items: Vec<Point>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `p` unless it is already present. Returns `true` if inserted.
    pub fn add(&mut self, p: Point) -> bool {
        if self.contains(p) {
            return false;
        }
        self.items.push(p);
        true
    }

    /// Remove `p`, keeping the order of the remaining coordinates. Returns
    /// `true` if it was present.
    pub fn remove(&mut self, p: Point) -> bool {
        match self.items.iter().position(|&q| q == p) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.items.contains(&p)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Coordinates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.items.iter().copied()
    }

    /// The coordinate whose node has the lowest `f_cost`, ties broken by
    /// lower `h_cost`, then lower `g_cost`. If all three tie, the earliest
    /// inserted coordinate wins. Returns `None` when the set is exhausted.
    pub fn select_best(&self, store: &NodeStore) -> Option<Point> {
        let mut best = None;
        for &p in &self.items {
            let Some(node) = store.get(p) else {
                continue;
            };
            let key = node.priority();
            match best {
                Some((_, best_key)) if best_key <= key => {}
                _ => best = Some((p, key)),
            }
        }
        best.map(|(p, _)| p)
    }
}
