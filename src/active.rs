use std::cmp::Ordering;

use num_traits::Float;
use slab::Slab;
use smallvec::SmallVec;

use crate::{Segment, SweepFloat};

/// The segments crossed by the sweep line, ordered bottom to top.
///
/// Stores the keys of the segments in a sorted vector. The order
/// between two segments is only defined at a sweep position, so every
/// operation that compares takes the position (`at_x`) to evaluate
/// under. The caller must pick a position at which the stored order is
/// valid; this structure never re-orders existing entries on its own.
/// To reflect a crossing, remove the segments and insert them again
/// past the crossing.
///
/// Two segments whose heights at `at_x` are within `epsilon` are
/// coincident there. Coincident segments are ordered by slope (the
/// order they take just right of `at_x`), and then by key.
#[derive(Debug)]
pub(crate) struct ActiveSegments<T: SweepFloat> {
    keys: Vec<usize>,
    epsilon: T,
}

impl<T: SweepFloat> ActiveSegments<T> {
    pub fn new(epsilon: T) -> Self {
        ActiveSegments {
            keys: Vec::new(),
            epsilon,
        }
    }

    /// Order of segments at `a` and `b` at sweep position `at_x`.
    ///
    /// Only the same key compares `Equal`.
    fn order_at(&self, storage: &Slab<Segment<T>>, a: usize, b: usize, at_x: T) -> Ordering {
        let (sa, sb) = (&storage[a], &storage[b]);
        let (ha, hb) = (sa.height_at(at_x), sb.height_at(at_x));
        let by_height = if Float::abs(ha - hb) < self.epsilon {
            sa.slope().partial_cmp(&sb.slope())
        } else {
            ha.partial_cmp(&hb)
        };
        by_height
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    }

    /// Index at which `key` sorts at `at_x`.
    fn lower_bound(&self, key: usize, at_x: T, storage: &Slab<Segment<T>>) -> usize {
        self.keys
            .partition_point(|&k| self.order_at(storage, k, key, at_x) == Ordering::Less)
    }

    /// Insert the segment at `key`, ordered at `at_x`, and return its
    /// index.
    pub fn insert(&mut self, key: usize, at_x: T, storage: &Slab<Segment<T>>) -> usize {
        debug_assert!(storage.contains(key));
        let idx = self.lower_bound(key, at_x, storage);
        self.keys.insert(idx, key);
        idx
    }

    /// Remove the segment at `key`, locating it by its order at
    /// `at_x`.
    ///
    /// Returns `false` if it couldn't be located: either it is not
    /// active, or the stored order is not valid at `at_x`.
    pub fn remove(&mut self, key: usize, at_x: T, storage: &Slab<Segment<T>>) -> bool {
        if !storage.contains(key) {
            return false;
        }
        match self
            .keys
            .binary_search_by(|&k| self.order_at(storage, k, key, at_x))
        {
            Ok(idx) => {
                self.keys.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Index of the segment at `key`.
    ///
    /// Starts from where `key` sorts at `at_x`, and scans outwards
    /// from there, so a slightly stale position still finds it.
    pub fn locate(&self, key: usize, at_x: T, storage: &Slab<Segment<T>>) -> Option<usize> {
        if !storage.contains(key) {
            return None;
        }
        let start = self.lower_bound(key, at_x, storage);
        (start..self.keys.len())
            .chain((0..start).rev())
            .find(|&idx| self.keys[idx] == key)
    }

    /// Remove and return the key at index `idx`.
    pub fn remove_at(&mut self, idx: usize) -> usize {
        self.keys.remove(idx)
    }

    /// Key of the segment at index `idx` counting from the bottom.
    #[inline]
    pub fn key_at(&self, idx: usize) -> Option<usize> {
        self.keys.get(idx).copied()
    }

    /// The segment just below `key`.
    pub fn prev_key(&self, key: usize, at_x: T, storage: &Slab<Segment<T>>) -> Option<usize> {
        let idx = self.locate(key, at_x, storage)?;
        idx.checked_sub(1).and_then(|prev| self.key_at(prev))
    }

    /// The segment just above `key`.
    pub fn next_key(&self, key: usize, at_x: T, storage: &Slab<Segment<T>>) -> Option<usize> {
        let idx = self.locate(key, at_x, storage)?;
        self.key_at(idx + 1)
    }

    /// The run of segments around `key` that pass within `epsilon` of
    /// `(x, y)`, bottom to top. Always contains `key` if it is active.
    pub fn through(
        &self,
        key: usize,
        (x, y): (T, T),
        at_x: T,
        storage: &Slab<Segment<T>>,
    ) -> SmallVec<[usize; 4]> {
        let idx = match self.locate(key, at_x, storage) {
            Some(idx) => idx,
            None => return SmallVec::new(),
        };
        let near = |k: usize| {
            let seg = &storage[k];
            seg.spans(x) && Float::abs(seg.height_at(x) - y) < self.epsilon
        };

        let mut lo = idx;
        while lo > 0 && near(self.keys[lo - 1]) {
            lo -= 1;
        }
        let mut hi = idx;
        while hi + 1 < self.keys.len() && near(self.keys[hi + 1]) {
            hi += 1;
        }
        self.keys[lo..=hi].iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.keys.iter().copied()
    }

    /// Whether the stored order is consistent at `at_x`.
    #[cfg(test)]
    pub fn is_ordered_at(&self, at_x: T, storage: &Slab<Segment<T>>) -> bool {
        self.keys
            .windows(2)
            .all(|w| self.order_at(storage, w[0], w[1], at_x) == Ordering::Less)
    }
}
