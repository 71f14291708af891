// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The partitioning contract shared by every backend.

use core::hash::Hash;

use crate::error::PartitionError;
use crate::set::Set;
use crate::types::{Bounded, Rect};
use crate::{HashGrid, QuadTree};

/// Spatial partitioning over bounded items.
///
/// Results are candidate sets: an item is reported when a cell or node it
/// occupies intersects the query, which may over-include. Run an exact shape
/// test on the candidates when precision matters.
pub trait Partitioning<T: Bounded + Eq + Hash> {
    /// Start tracking `item` at its current bounds.
    ///
    /// Returns `Ok(true)` if the item is newly tracked. An item that is
    /// already tracked is re-synced as if by [`update`](Self::update) and
    /// `Ok(false)` is returned. A quadtree also returns `Ok(false)` for an
    /// item lying wholly outside its domain, without tracking it.
    ///
    /// Non-finite bounds, and bounds whose far edge does not lie past the near
    /// edge on both axes, are rejected with [`PartitionError::DegenerateBounds`].
    fn insert(&mut self, item: T) -> Result<bool, PartitionError>;

    /// Stop tracking `item`. Returns `true` if it was tracked.
    fn remove(&mut self, item: &T) -> bool;

    /// Re-read the item's bounds and re-sync its membership.
    ///
    /// This is a remove followed by an insert even when the bounds did not
    /// change. An untracked item is inserted. Degenerate bounds are rejected
    /// before anything is removed.
    fn update(&mut self, item: T) -> Result<(), PartitionError>;

    /// Items whose cells or nodes intersect `area`.
    fn query(&self, area: Rect) -> Set<&T>;

    /// Items whose cells or nodes contain the point.
    fn query_point(&self, x: f64, y: f64) -> Set<&T>;

    /// Occupied cells or nodes intersecting `area`, for diagnostics.
    fn partitions(&self, area: Rect) -> Set<Rect>;

    /// Drop every item.
    fn clear(&mut self);

    /// Number of distinct tracked items.
    fn len(&self) -> usize;

    /// True if nothing is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `item` is tracked.
    fn contains(&self, item: &T) -> bool;
}

/// One of the available backends, chosen at runtime.
///
/// Usually built from a [`PartitionConfig`](crate::PartitionConfig).
#[derive(Debug)]
pub enum Partition<T> {
    /// Uniform hash grid.
    HashGrid(HashGrid<T>),
    /// Adaptive quadtree.
    QuadTree(QuadTree<T>),
}

impl<T> From<HashGrid<T>> for Partition<T> {
    fn from(grid: HashGrid<T>) -> Self {
        Self::HashGrid(grid)
    }
}

impl<T> From<QuadTree<T>> for Partition<T> {
    fn from(tree: QuadTree<T>) -> Self {
        Self::QuadTree(tree)
    }
}

macro_rules! dispatch {
    ($self:ident, $p:ident => $e:expr) => {
        match $self {
            Partition::HashGrid($p) => $e,
            Partition::QuadTree($p) => $e,
        }
    };
}

impl<T: Bounded + Eq + Hash + Clone> Partitioning<T> for Partition<T> {
    fn insert(&mut self, item: T) -> Result<bool, PartitionError> {
        dispatch!(self, p => p.insert(item))
    }

    fn remove(&mut self, item: &T) -> bool {
        dispatch!(self, p => p.remove(item))
    }

    fn update(&mut self, item: T) -> Result<(), PartitionError> {
        dispatch!(self, p => p.update(item))
    }

    fn query(&self, area: Rect) -> Set<&T> {
        dispatch!(self, p => p.query(area))
    }

    fn query_point(&self, x: f64, y: f64) -> Set<&T> {
        dispatch!(self, p => p.query_point(x, y))
    }

    fn partitions(&self, area: Rect) -> Set<Rect> {
        dispatch!(self, p => p.partitions(area))
    }

    fn clear(&mut self) {
        dispatch!(self, p => p.clear());
    }

    fn len(&self) -> usize {
        dispatch!(self, p => p.len())
    }

    fn contains(&self, item: &T) -> bool {
        dispatch!(self, p => p.contains(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridConfig, PartitionConfig, QuadTreeConfig};

    #[derive(Clone, Debug)]
    struct Body {
        id: u32,
        rect: Rect,
    }

    impl PartialEq for Body {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for Body {}

    impl Hash for Body {
        fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    impl Bounded for Body {
        fn bounds(&self) -> Rect {
            self.rect
        }
    }

    fn backends() -> Vec<Partition<Body>> {
        let domain = Rect::new(0.0, 0.0, 256.0, 256.0);
        vec![
            PartitionConfig::from(GridConfig::default().with_cell_size(16.0))
                .build()
                .unwrap(),
            PartitionConfig::from(
                QuadTreeConfig::default()
                    .with_bounds(domain)
                    .with_leaf_size(2)
                    .with_max_depth(4),
            )
            .build()
            .unwrap(),
        ]
    }

    fn body(id: u32, x: f64, y: f64) -> Body {
        Body {
            id,
            rect: Rect::new(x, y, 4.0, 4.0),
        }
    }

    #[test]
    fn backends_agree_on_basic_lifecycle() {
        for mut p in backends() {
            assert!(p.insert(body(1, 10.0, 10.0)).unwrap());
            assert!(p.insert(body(2, 200.0, 200.0)).unwrap());
            assert!(p.insert(body(3, 200.0, 30.0)).unwrap());
            assert_eq!(p.len(), 3);

            // Body 2 shares neither a cell nor a quadrant with this window.
            let hits = p.query(Rect::new(8.0, 8.0, 8.0, 8.0));
            assert!(hits.contains(&&body(1, 0.0, 0.0)));
            assert!(!hits.contains(&&body(2, 0.0, 0.0)));

            // Re-inserting an existing item moves it and reports `false`.
            assert!(!p.insert(body(1, 150.0, 150.0)).unwrap());
            assert_eq!(p.len(), 3);
            assert!(p.query_point(151.0, 151.0).contains(&&body(1, 0.0, 0.0)));

            assert!(p.remove(&body(2, 0.0, 0.0)));
            assert!(!p.remove(&body(2, 0.0, 0.0)));
            assert_eq!(p.len(), 2);
            assert!(!p.is_empty());

            p.clear();
            assert!(p.is_empty());
            assert!(p.query(Rect::new(0.0, 0.0, 256.0, 256.0)).is_empty());
        }
    }

    #[test]
    fn backends_agree_on_degenerate_bounds() {
        for mut p in backends() {
            let flat = Body {
                id: 9,
                rect: Rect::new(5.0, 5.0, 0.0, 3.0),
            };
            assert_eq!(
                p.insert(flat.clone()),
                Err(PartitionError::DegenerateBounds(flat.rect))
            );
            assert!(!p.contains(&flat));

            // A failed update leaves the previous membership in place.
            p.insert(body(4, 20.0, 20.0)).unwrap();
            let squashed = Body {
                id: 4,
                rect: Rect::new(20.0, 20.0, 4.0, 0.0),
            };
            assert!(p.update(squashed).is_err());
            assert!(p.query_point(21.0, 21.0).contains(&&body(4, 0.0, 0.0)));
        }
    }

    #[test]
    fn update_inserts_untracked_items() {
        for mut p in backends() {
            p.update(body(7, 40.0, 40.0)).unwrap();
            assert!(p.contains(&body(7, 0.0, 0.0)));
            assert_eq!(p.len(), 1);
        }
    }
}
