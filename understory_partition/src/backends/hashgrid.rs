// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform hash grid backend.

use core::fmt::Debug;
use core::hash::Hash;

use rustc_hash::FxHashMap;

use crate::config::GridConfig;
use crate::error::{PartitionError, check_item_bounds};
use crate::items::{ItemId, ItemTable};
use crate::partitioning::Partitioning;
use crate::set::Set;
use crate::types::{Bounded, Rect};

/// Integer coordinates of a grid cell.
///
/// Cell `(x, y)` covers `[x * cell_size, (x + 1) * cell_size)` horizontally and
/// likewise vertically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl CellKey {
    /// Create a cell key.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Inclusive span of cells covered by a rectangle.
#[derive(Copy, Clone, Debug)]
struct CellSpan {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl CellSpan {
    fn contains(&self, key: CellKey) -> bool {
        (self.min_x..=self.max_x).contains(&key.x) && (self.min_y..=self.max_y).contains(&key.y)
    }

    /// Number of cells spanned; saturates rather than overflowing.
    fn cell_count(&self) -> u128 {
        let w = i128::from(self.max_x) - i128::from(self.min_x) + 1;
        let h = i128::from(self.max_y) - i128::from(self.min_y) + 1;
        if w <= 0 || h <= 0 {
            0
        } else {
            w.unsigned_abs().saturating_mul(h.unsigned_abs())
        }
    }

    fn keys(self) -> impl Iterator<Item = CellKey> {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| CellKey::new(x, y)))
    }
}

/// Uniform grid of square cells keyed by integer coordinates.
///
/// Every item is recorded in each cell its bounds overlap, and each cell
/// records the items overlapping it; the two maps are kept as exact inverses.
/// Cells exist only while occupied. The grid is unbounded, so coordinates may
/// be negative.
///
/// Cost is proportional to the cells touched. Items much larger than the cell
/// size, or many items packed into one cell, degrade toward a linear scan.
pub struct HashGrid<T> {
    cell_size: f64,
    items: ItemTable<T>,
    cell_keys: FxHashMap<ItemId, Set<CellKey>>,
    cells: FxHashMap<CellKey, Set<ItemId>>,
}

impl<T> HashGrid<T> {
    /// Create an empty grid with square cells of side `cell_size`.
    pub fn new(cell_size: f64) -> Result<Self, PartitionError> {
        Self::from_config(&GridConfig { cell_size })
    }

    /// Create an empty grid from a [`GridConfig`].
    pub fn from_config(config: &GridConfig) -> Result<Self, PartitionError> {
        config.validate()?;
        tracing::debug!(cell_size = config.cell_size, "created hash grid");
        Ok(Self {
            cell_size: config.cell_size,
            items: ItemTable::default(),
            cell_keys: FxHashMap::default(),
            cells: FxHashMap::default(),
        })
    }

    /// Side length of each cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The cell containing a point.
    pub fn cell_at(&self, x: f64, y: f64) -> CellKey {
        CellKey::new(
            floor_to_i64(x / self.cell_size),
            floor_to_i64(y / self.cell_size),
        )
    }

    /// The rectangle covered by a cell.
    #[allow(
        clippy::cast_precision_loss,
        reason = "Cell coordinates beyond 2^53 are outside any practical world."
    )]
    pub fn cell_rect(&self, key: CellKey) -> Rect {
        Rect::new(
            key.x as f64 * self.cell_size,
            key.y as f64 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Cells whose half-open square intersects `area`.
    ///
    /// `floor(min / c)` through `ceil(max / c) - 1`, so a rectangle ending
    /// exactly on a cell boundary does not reach into the next cell.
    ///
    /// A rectangle with extent always covers at least the cell holding its
    /// min corner, even when the division rounds both edges together.
    fn span(&self, area: &Rect) -> CellSpan {
        let c = self.cell_size;
        let axis = |min: f64, max: f64| {
            let lo = floor_to_i64(min / c);
            let hi = ceil_to_i64(max / c).saturating_sub(1);
            (lo, if max > min { hi.max(lo) } else { hi })
        };
        let (min_x, max_x) = axis(area.x, area.max_x());
        let (min_y, max_y) = axis(area.y, area.max_y());
        CellSpan {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Occupied cells intersecting `area`.
    ///
    /// Walks the span when it is smaller than the occupied set, otherwise
    /// filters the occupied set, so huge query windows stay bounded by the
    /// number of live cells.
    fn occupied_in<'a>(
        &'a self,
        area: &Rect,
    ) -> Box<dyn Iterator<Item = (CellKey, &'a Set<ItemId>)> + 'a> {
        let span = self.span(area);
        let occupied = self.cells.len() as u128;
        if span.cell_count() <= occupied {
            Box::new(
                span.keys()
                    .filter_map(move |key| self.cells.get(&key).map(|ids| (key, ids))),
            )
        } else {
            Box::new(
                self.cells
                    .iter()
                    .filter(move |(key, _)| span.contains(**key))
                    .map(|(key, ids)| (*key, ids)),
            )
        }
    }
}

impl<T: Bounded + Eq + Hash + Clone> HashGrid<T> {
    /// Cells the item is currently recorded in, if tracked.
    pub fn cells_of(&self, item: &T) -> Option<&Set<CellKey>> {
        let id = self.items.id_of(item)?;
        self.cell_keys.get(&id)
    }

    fn index(&mut self, item: T, bounds: Rect) {
        let keys: Set<CellKey> = self.span(&bounds).keys().collect();
        let id = self.items.register(item, bounds);
        for key in &keys {
            self.cells.entry(*key).or_default().insert(id);
        }
        self.cell_keys.insert(id, keys);
    }

    fn collect_items<'a>(&'a self, cells: impl Iterator<Item = &'a Set<ItemId>>) -> Set<&'a T> {
        let mut out = Set::new();
        for ids in cells {
            out.extend(ids.iter().filter_map(|id| self.items.get(*id)));
        }
        out
    }
}

impl<T: Bounded + Eq + Hash + Clone> Partitioning<T> for HashGrid<T> {
    fn insert(&mut self, item: T) -> Result<bool, PartitionError> {
        let bounds = check_item_bounds(item.bounds())?;
        if self.items.id_of(&item).is_some() {
            self.remove(&item);
            self.index(item, bounds);
            return Ok(false);
        }
        self.index(item, bounds);
        Ok(true)
    }

    fn remove(&mut self, item: &T) -> bool {
        let Some((id, _)) = self.items.release(item) else {
            return false;
        };
        for key in self.cell_keys.remove(&id).unwrap_or_default() {
            if let Some(cell) = self.cells.get_mut(&key) {
                cell.remove(&id);
                if cell.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
        true
    }

    fn update(&mut self, item: T) -> Result<(), PartitionError> {
        let bounds = check_item_bounds(item.bounds())?;
        self.remove(&item);
        self.index(item, bounds);
        Ok(())
    }

    fn query(&self, area: Rect) -> Set<&T> {
        self.collect_items(self.occupied_in(&area).map(|(_, ids)| ids))
    }

    fn query_point(&self, x: f64, y: f64) -> Set<&T> {
        let key = self.cell_at(x, y);
        self.collect_items(self.cells.get(&key).into_iter())
    }

    fn partitions(&self, area: Rect) -> Set<Rect> {
        self.occupied_in(&area)
            .map(|(key, _)| self.cell_rect(key))
            .collect()
    }

    fn clear(&mut self) {
        tracing::debug!(
            items = self.items.len(),
            cells = self.cells.len(),
            "cleared hash grid"
        );
        self.items.clear();
        self.cell_keys.clear();
        self.cells.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.items.id_of(item).is_some()
    }
}

impl<T> Debug for HashGrid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashGrid")
            .field("cell_size", &self.cell_size)
            .field("items", &self.cell_keys.len())
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "Float-to-int casts saturate; such cells are far outside any practical world."
)]
fn floor_to_i64(v: f64) -> i64 {
    v.floor() as i64
}

#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "Float-to-int casts saturate; such cells are far outside any practical world."
)]
fn ceil_to_i64(v: f64) -> i64 {
    v.ceil() as i64
}
