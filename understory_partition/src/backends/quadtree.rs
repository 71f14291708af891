// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive quadtree backend with pooled nodes.
//!
//! Nodes live in an arena and refer to each other by index. A node is either
//! a leaf holding item ids or a branch with exactly four children in NW, NE,
//! SW, SE order. Items that straddle a split are stored in every child they
//! overlap, never clipped.
//!
//! - A leaf that already holds `leaf_size` items subdivides on the next insert
//!   unless its depth budget is exhausted, in which case it overflows.
//! - Removal attempts a collapse at every branch it passes through; a branch
//!   whose subtree holds at most `leaf_size` distinct items becomes a leaf again.
//! - Nodes freed by a collapse or a clear go to a free list and are reused by
//!   the next subdivision, so steady insert/remove churn does not allocate.

use core::fmt::Debug;
use core::hash::Hash;

use crate::config::QuadTreeConfig;
use crate::error::{PartitionError, check_domain, check_item_bounds};
use crate::items::{ItemId, ItemTable};
use crate::partitioning::Partitioning;
use crate::set::Set;
use crate::types::{Bounded, Point, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn get(self) -> usize {
        self.0
    }
}

/// Node extent as exact edges.
///
/// Children share their split lines and outer edges bit for bit with the
/// parent, so anything overlapping a parent overlaps at least one child.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Region {
    min: Point,
    max: Point,
}

impl Region {
    fn from_rect(rect: Rect) -> Self {
        Self {
            min: rect.min(),
            max: rect.max(),
        }
    }

    fn rect(&self) -> Rect {
        Rect::from_min_max(self.min, self.max)
    }

    /// Same test as [`Rect::intersects`], against the exact edges.
    fn overlaps(&self, r: &Rect) -> bool {
        r.x < self.max.x && r.max_x() > self.min.x && r.y < self.max.y && r.max_y() > self.min.y
    }

    fn holds(&self, x: f64, y: f64) -> bool {
        x >= self.min.x && x < self.max.x && y >= self.min.y && y < self.max.y
    }

    /// NW, NE, SW, SE.
    fn quadrants(&self) -> [Self; 4] {
        let (min, max) = (self.min, self.max);
        let mid = Point::new(
            min.x + (max.x - min.x) * 0.5,
            min.y + (max.y - min.y) * 0.5,
        );
        [
            Self { min, max: mid },
            Self {
                min: Point::new(mid.x, min.y),
                max: Point::new(max.x, mid.y),
            },
            Self {
                min: Point::new(min.x, mid.y),
                max: Point::new(mid.x, max.y),
            },
            Self { min: mid, max },
        ]
    }
}

#[derive(Clone, Debug)]
struct Node {
    region: Region,
    /// Remaining subdivision budget.
    depth: u32,
    objects: Set<ItemId>,
    children: Option<[NodeIdx; 4]>,
}

impl Node {
    fn leaf(region: Region, depth: u32) -> Self {
        Self {
            region,
            depth,
            objects: Set::new(),
            children: None,
        }
    }
}

/// Snapshot of one node, as reported by [`QuadTree::query_nodes`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeInfo {
    /// Region covered by the node.
    pub bounds: Rect,
    /// Remaining subdivision budget; zero means the node may overflow.
    pub depth: u32,
    /// Whether the node holds items directly.
    pub is_leaf: bool,
    /// Items held directly (always zero for a branch).
    pub len: usize,
}

/// Quadtree over a fixed rectangular domain.
///
/// Items wholly outside the domain are not tracked; see
/// [`Partitioning::insert`].
pub struct QuadTree<T> {
    domain: Rect,
    leaf_size: usize,
    max_depth: u32,
    arena: Vec<Node>,
    pool: Vec<NodeIdx>,
    items: ItemTable<T>,
}

impl<T> QuadTree<T> {
    /// Create an empty tree covering `bounds`.
    ///
    /// `leaf_size` is the number of items a leaf holds before it splits and
    /// `depth` is how many times the root may be subdivided along any path.
    pub fn new(bounds: Rect, leaf_size: usize, depth: u32) -> Result<Self, PartitionError> {
        Self::from_config(&QuadTreeConfig {
            bounds,
            leaf_size,
            max_depth: depth,
        })
    }

    /// Create an empty tree from a [`QuadTreeConfig`].
    pub fn from_config(config: &QuadTreeConfig) -> Result<Self, PartitionError> {
        config.validate()?;
        tracing::debug!(
            bounds = ?config.bounds,
            leaf_size = config.leaf_size,
            max_depth = config.max_depth,
            "created quadtree"
        );
        Ok(Self {
            domain: config.bounds,
            leaf_size: config.leaf_size,
            max_depth: config.max_depth,
            arena: vec![Node::leaf(Region::from_rect(config.bounds), config.max_depth)],
            pool: Vec::new(),
            items: ItemTable::default(),
        })
    }

    /// The domain covered by the root.
    pub fn bounds(&self) -> Rect {
        self.domain
    }

    /// Items a leaf holds before it subdivides.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Subdivision budget of the root.
    pub fn depth(&self) -> u32 {
        self.max_depth
    }

    /// Nodes currently part of the tree, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len() - self.pool.len()
    }

    /// Nodes waiting in the pool for reuse.
    pub fn pooled_nodes(&self) -> usize {
        self.pool.len()
    }

    /// Every node intersecting `area`, parents before children.
    pub fn query_nodes(&self, area: Rect) -> Vec<NodeInfo> {
        let mut out = Vec::new();
        self.visit(NodeIdx::ROOT, &area, &mut |node: &Node| {
            out.push(NodeInfo {
                bounds: node.region.rect(),
                depth: node.depth,
                is_leaf: node.children.is_none(),
                len: node.objects.len(),
            });
        });
        out
    }

    /// Depth-first walk over nodes intersecting `area`.
    fn visit<'a>(&'a self, idx: NodeIdx, area: &Rect, f: &mut impl FnMut(&'a Node)) {
        let node = &self.arena[idx.get()];
        if !node.region.overlaps(area) {
            return;
        }
        f(node);
        if let Some(children) = node.children {
            for child in children {
                self.visit(child, area, f);
            }
        }
    }

    /// Take a node from the pool, overwriting its geometry, or grow the arena.
    fn acquire(&mut self, region: Region, depth: u32) -> NodeIdx {
        if let Some(idx) = self.pool.pop() {
            let node = &mut self.arena[idx.get()];
            debug_assert!(
                node.objects.is_empty() && node.children.is_none(),
                "pooled nodes are reset on release"
            );
            node.region = region;
            node.depth = depth;
            idx
        } else {
            self.arena.push(Node::leaf(region, depth));
            NodeIdx(self.arena.len() - 1)
        }
    }

    /// Return a node and its whole subtree to the pool.
    fn release(&mut self, idx: NodeIdx) {
        let node = &mut self.arena[idx.get()];
        node.objects.clear();
        if let Some(children) = node.children.take() {
            for child in children {
                self.release(child);
            }
        }
        self.pool.push(idx);
    }

    /// Turn the root back into an empty leaf.
    fn reset_root(&mut self) {
        let root = &mut self.arena[NodeIdx::ROOT.get()];
        root.objects.clear();
        if let Some(children) = root.children.take() {
            for child in children {
                self.release(child);
            }
        }
    }

    fn subdivide(&mut self, idx: NodeIdx) -> [NodeIdx; 4] {
        let Node { region, depth, .. } = self.arena[idx.get()];
        let child_depth = depth.saturating_sub(1);
        let children = region
            .quadrants()
            .map(|quadrant| self.acquire(quadrant, child_depth));
        self.arena[idx.get()].children = Some(children);
        tracing::trace!(
            bounds = ?region.rect(),
            depth = child_depth,
            "subdivided quadtree node"
        );
        children
    }

    /// Gather distinct ids under `idx`, giving up once more than `limit` are found.
    fn collect_within(&self, idx: NodeIdx, out: &mut Set<ItemId>, limit: usize) -> bool {
        let node = &self.arena[idx.get()];
        out.extend(node.objects.iter().copied());
        if out.len() > limit {
            return false;
        }
        match node.children {
            Some(children) => children
                .into_iter()
                .all(|child| self.collect_within(child, out, limit)),
            None => true,
        }
    }

    fn try_collapse(&mut self, idx: NodeIdx) {
        let Some(children) = self.arena[idx.get()].children else {
            return;
        };
        let mut held = Set::new();
        if !self.collect_within(idx, &mut held, self.leaf_size) {
            return;
        }
        for child in children {
            self.release(child);
        }
        let node = &mut self.arena[idx.get()];
        node.children = None;
        node.objects = held;
        tracing::trace!(
            bounds = ?node.region.rect(),
            items = node.objects.len(),
            "collapsed quadtree branch"
        );
    }

    fn remove_node(&mut self, idx: NodeIdx, id: ItemId, bounds: Rect) -> bool {
        if !self.arena[idx.get()].region.overlaps(&bounds) {
            return false;
        }
        let mut removed = self.arena[idx.get()].objects.remove(&id);
        if let Some(children) = self.arena[idx.get()].children {
            for child in children {
                removed |= self.remove_node(child, id, bounds);
            }
            self.try_collapse(idx);
        }
        removed
    }
}

impl<T: Bounded + Eq + Hash + Clone> QuadTree<T> {
    /// Move the tree to a new domain and re-index every tracked item.
    ///
    /// This rebuilds the tree from scratch in O(n). Items are placed with the
    /// bounds they were last inserted or updated with; those that no longer
    /// intersect the new domain stop being tracked. Resizing to the current
    /// bounds does nothing.
    pub fn resize(&mut self, bounds: Rect) -> Result<(), PartitionError> {
        check_domain(bounds)?;
        if bounds == self.domain {
            return Ok(());
        }
        let tracked: Vec<(ItemId, Rect)> = self.items.iter().collect();
        self.reset_root();
        self.domain = bounds;
        self.arena[NodeIdx::ROOT.get()].region = Region::from_rect(bounds);

        let mut dropped = 0_usize;
        for (id, item_bounds) in tracked {
            if !self.insert_node(NodeIdx::ROOT, id, item_bounds) {
                self.items.release_id(id);
                dropped += 1;
            }
        }
        tracing::debug!(?bounds, items = self.items.len(), dropped, "resized quadtree");
        Ok(())
    }

    fn insert_node(&mut self, idx: NodeIdx, id: ItemId, bounds: Rect) -> bool {
        let node = &mut self.arena[idx.get()];
        if !node.region.overlaps(&bounds) {
            return false;
        }

        if let Some(children) = node.children {
            let mut added = false;
            for child in children {
                added |= self.insert_node(child, id, bounds);
            }
            return added;
        }

        if node.objects.len() < self.leaf_size || node.depth == 0 {
            node.objects.insert(id);
            return true;
        }

        // Full leaf with depth to spare: split and push everything down.
        let held = core::mem::take(&mut node.objects);
        let children = self.subdivide(idx);
        for other in held {
            if let Some(other_bounds) = self.items.bounds(other) {
                for child in children {
                    self.insert_node(child, other, other_bounds);
                }
            }
        }
        let mut added = false;
        for child in children {
            added |= self.insert_node(child, id, bounds);
        }
        added
    }

    /// Track `item` if its bounds reach into the domain.
    fn index(&mut self, item: T, bounds: Rect) -> bool {
        if !self.arena[NodeIdx::ROOT.get()].region.overlaps(&bounds) {
            return false;
        }
        let id = self.items.register(item, bounds);
        if self.insert_node(NodeIdx::ROOT, id, bounds) {
            true
        } else {
            self.items.release_id(id);
            false
        }
    }

    fn query_with<'a>(&'a self, hit: impl Fn(&Region) -> bool) -> Set<&'a T> {
        let mut out = Set::new();
        self.collect_hits(NodeIdx::ROOT, &hit, &mut out);
        out
    }

    fn collect_hits<'a>(&'a self, idx: NodeIdx, hit: &impl Fn(&Region) -> bool, out: &mut Set<&'a T>) {
        let node = &self.arena[idx.get()];
        if !hit(&node.region) {
            return;
        }
        out.extend(node.objects.iter().filter_map(|id| self.items.get(*id)));
        if let Some(children) = node.children {
            for child in children {
                self.collect_hits(child, hit, out);
            }
        }
    }
}

impl<T: Bounded + Eq + Hash + Clone> Partitioning<T> for QuadTree<T> {
    fn insert(&mut self, item: T) -> Result<bool, PartitionError> {
        let bounds = check_item_bounds(item.bounds())?;
        if self.items.id_of(&item).is_some() {
            self.remove(&item);
            self.index(item, bounds);
            return Ok(false);
        }
        Ok(self.index(item, bounds))
    }

    fn remove(&mut self, item: &T) -> bool {
        let Some((id, bounds)) = self.items.release(item) else {
            return false;
        };
        self.remove_node(NodeIdx::ROOT, id, bounds);
        true
    }

    fn update(&mut self, item: T) -> Result<(), PartitionError> {
        let bounds = check_item_bounds(item.bounds())?;
        self.remove(&item);
        self.index(item, bounds);
        Ok(())
    }

    fn query(&self, area: Rect) -> Set<&T> {
        self.query_with(|region| region.overlaps(&area))
    }

    fn query_point(&self, x: f64, y: f64) -> Set<&T> {
        self.query_with(|region| region.holds(x, y))
    }

    fn partitions(&self, area: Rect) -> Set<Rect> {
        let mut out = Set::new();
        self.visit(NodeIdx::ROOT, &area, &mut |node: &Node| {
            out.insert(node.region.rect());
        });
        out
    }

    fn clear(&mut self) {
        self.reset_root();
        tracing::debug!(
            items = self.items.len(),
            pooled = self.pool.len(),
            "cleared quadtree"
        );
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.items.id_of(item).is_some()
    }
}

impl<T> Debug for QuadTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds())
            .field("leaf_size", &self.leaf_size)
            .field("max_depth", &self.max_depth)
            .field("nodes", &self.node_count())
            .field("pooled", &self.pool.len())
            .finish_non_exhaustive()
    }
}
