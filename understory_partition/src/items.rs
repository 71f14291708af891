// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identifiers for tracked items.
//!
//! Backends store an [`ItemId`] in every cell or node an item touches and keep
//! the item itself once, here. Slots are recycled through a free list and carry
//! a generation so a stale id never resolves to a newer occupant.

use core::hash::Hash;

use rustc_hash::FxHashMap;

use crate::types::Rect;

/// Generational handle for a tracked item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ItemId(u32, u32);

impl ItemId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Item ids are intentionally 32-bit; a partition never tracks 2^32 items."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<(T, Rect)>,
}

/// Side table mapping ids to items and their sampled bounds.
#[derive(Clone, Debug)]
pub(crate) struct ItemTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    lookup: FxHashMap<T, ItemId>,
}

impl<T> Default for ItemTable<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }
}

impl<T: Eq + Hash + Clone> ItemTable<T> {
    /// Number of tracked items.
    pub(crate) fn len(&self) -> usize {
        self.lookup.len()
    }

    pub(crate) fn id_of(&self, item: &T) -> Option<ItemId> {
        self.lookup.get(item).copied()
    }

    /// Start tracking `item`. The caller guarantees it is not tracked yet.
    pub(crate) fn register(&mut self, item: T, bounds: Rect) -> ItemId {
        debug_assert!(
            !self.lookup.contains_key(&item),
            "item registered twice without release"
        );
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = Some((item.clone(), bounds));
            ItemId::new(idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                entry: Some((item.clone(), bounds)),
            });
            ItemId::new(self.slots.len() - 1, 1)
        };
        self.lookup.insert(item, id);
        id
    }

    /// Stop tracking `item`, returning its id and the bounds it was indexed with.
    pub(crate) fn release(&mut self, item: &T) -> Option<(ItemId, Rect)> {
        let id = self.lookup.remove(item)?;
        let slot = &mut self.slots[id.idx()];
        let (_, bounds) = slot.entry.take()?;
        self.free_list.push(id.idx());
        Some((id, bounds))
    }

    /// Stop tracking the item behind `id`.
    pub(crate) fn release_id(&mut self, id: ItemId) -> Option<T> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        let (item, _) = slot.entry.take()?;
        self.lookup.remove(&item);
        self.free_list.push(id.idx());
        Some(item)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.lookup.clear();
    }
}

impl<T> ItemTable<T> {
    fn entry(&self, id: ItemId) -> Option<&(T, Rect)> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    pub(crate) fn get(&self, id: ItemId) -> Option<&T> {
        self.entry(id).map(|(item, _)| item)
    }

    /// The bounds `id` was indexed with.
    pub(crate) fn bounds(&self, id: ItemId) -> Option<Rect> {
        self.entry(id).map(|(_, bounds)| *bounds)
    }

    /// Every live id with its indexed bounds.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ItemId, Rect)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.entry
                .as_ref()
                .map(|(_, bounds)| (ItemId::new(idx, slot.generation), *bounds))
        })
    }
}
