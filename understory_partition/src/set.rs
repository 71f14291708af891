// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small unordered set used for membership tracking and query results.

use core::fmt::{self, Debug};
use core::hash::Hash;

use rustc_hash::FxHashSet;

/// An unordered collection of unique values.
///
/// Query results are assembled into a `Set`, so an item that is reachable
/// through several cells or nodes is reported once.
#[derive(Clone)]
pub struct Set<T> {
    inner: FxHashSet<T>,
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self {
            inner: FxHashSet::default(),
        }
    }
}

impl<T: Debug> Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.iter()).finish()
    }
}

impl<T: Eq + Hash> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq + Hash> Eq for Set<T> {}

impl<T> Set<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if the set holds nothing.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove every value, keeping the allocation.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Iterate over the values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.inner.iter()
    }

    /// Remove and yield every value, keeping the allocation.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.inner.drain()
    }
}

impl<T: Eq + Hash> Set<T> {
    /// Create an empty set with room for `n` values.
    pub fn with_capacity(n: usize) -> Self {
        let mut inner = FxHashSet::default();
        inner.reserve(n);
        Self { inner }
    }

    /// Add a value. Returns `true` if it was not already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.inner.insert(value)
    }

    /// Remove a value. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.inner.remove(value)
    }

    /// Whether the value is present.
    pub fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    /// Values present in either set.
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        self.inner.union(&other.inner).cloned().collect()
    }

    /// Values present in both sets.
    pub fn intersection(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .iter()
            .filter(|v| large.contains(v))
            .cloned()
            .collect()
    }

    /// Copy the values into a `Vec` in arbitrary order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.iter().cloned().collect()
    }
}

impl<T: Eq + Hash> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = std::collections::hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = std::collections::hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T: Eq + Hash, const N: usize> From<[T; N]> for Set<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}
