//! Open-addressing hash table with linear probing
//!
//! [`ProbeTable`] stores keys and values in two parallel slot arrays. A key
//! lives at `hash(key) % capacity` or, after a collision, in the first free
//! slot found by scanning forward (wrapping at the end of the array).
//!
//! # Invariants
//!
//! - `keys[i].is_some() == values[i].is_some()` for every slot.
//! - Occupancy never exceeds half the capacity, so every probe run ends at
//!   an empty slot and lookups always terminate.
//! - Every stored key is reachable from its home slot without crossing an
//!   empty slot. [`ProbeTable::remove`] restores this by reinserting the
//!   rest of the run after clearing a slot.

use rustc_hash::FxBuildHasher;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use tracing::debug;

/// Capacity used by [`ProbeTable::new`]
pub const DEFAULT_CAPACITY: usize = 16;

/// Associative store with linear probing and doubling growth
#[derive(Clone)]
pub struct ProbeTable<K, V, S = FxBuildHasher> {
    keys: Vec<Option<K>>,
    values: Vec<Option<V>>,
    size: usize,
    hasher: S,
}

/// One slot of the table as seen by [`ProbeTable::slots`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a, K, V> {
    pub index: usize,
    pub entry: Option<(&'a K, &'a V)>,
    /// Slot the key hashes to; differs from `index` when the key was displaced
    pub home: Option<usize>,
}

impl<'a, K, V> Slot<'a, K, V> {
    /// Distance between the home slot and the slot actually used.
    pub fn displacement(&self, capacity: usize) -> Option<usize> {
        self.home
            .map(|home| (self.index + capacity - home) % capacity)
    }
}

impl<K: Hash + Eq, V> ProbeTable<K, V, FxBuildHasher> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with the given number of slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher::default())
    }
}

impl<K, V, S> ProbeTable<K, V, S> {
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// Number of keys currently stored
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Iterate over stored entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.keys
            .iter()
            .zip(&self.values)
            .filter_map(|(key, value)| Some((key.as_ref()?, value.as_ref()?)))
    }

    /// Remove every entry, keeping the current capacity
    pub fn clear(&mut self) {
        self.keys.iter_mut().for_each(|key| *key = None);
        self.values.iter_mut().for_each(|value| *value = None);
        self.size = 0;
    }

    fn next_slot(&self, index: usize) -> usize {
        if index + 1 < self.capacity() {
            index + 1
        } else {
            0
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ProbeTable<K, V, S> {
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = capacity.max(1);
        ProbeTable {
            keys: empty_slots(capacity),
            values: empty_slots(capacity),
            size: 0,
            hasher,
        }
    }

    /// Raw hash of `key` under this table's hasher
    pub fn hash<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.hasher.hash_one(key)
    }

    /// Slot a key hashes to before any probing
    pub fn home_slot<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        (self.hash(key) % self.capacity() as u64) as usize
    }

    /// Slot holding `key`, or the empty slot that ends its probe run.
    fn locate<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut index = self.home_slot(key);
        while let Some(existing) = &self.keys[index] {
            if existing.borrow() == key {
                break;
            }
            index = self.next_slot(index);
        }
        index
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keys[self.locate(key)].is_some()
    }

    /// Look up the value stored under `key`
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.values[self.locate(key)].as_ref()
    }

    /// Insert or overwrite `key`, returning the previous value if any.
    ///
    /// A new key that would push occupancy past half the capacity doubles
    /// the table first.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        let mut index = self.locate(&key);
        if self.keys[index].is_some() {
            return self.values[index].replace(value);
        }

        if 2 * (self.size + 1) > self.capacity() {
            self.resize(2 * self.capacity());
            index = self.locate(&key);
        }

        self.keys[index] = Some(key);
        self.values[index] = Some(value);
        self.size += 1;
        None
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.locate(key);
        self.keys[index].take()?;
        let removed = self.values[index].take();
        self.size -= 1;

        // Entries after the cleared slot may have probed past it; pull each
        // one out and reinsert it so lookups still reach it.
        let mut i = self.next_slot(index);
        while let Some(displaced) = self.keys[i].take() {
            let value = self.values[i].take();
            let slot = self.locate::<K>(&displaced);
            self.keys[slot] = Some(displaced);
            self.values[slot] = value;
            i = self.next_slot(i);
        }

        removed
    }

    /// Every slot in index order, occupied or not
    pub fn slots(&self) -> impl Iterator<Item = Slot<'_, K, V>> + '_ {
        self.keys
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(move |(index, (key, value))| {
                let entry = key.as_ref().zip(value.as_ref());
                Slot {
                    index,
                    entry,
                    home: key.as_ref().map(|k| self.home_slot(k)),
                }
            })
    }

    fn resize(&mut self, capacity: usize) {
        debug!(
            from = self.capacity(),
            to = capacity,
            size = self.size,
            "growing probe table"
        );

        let old_keys = std::mem::replace(&mut self.keys, empty_slots(capacity));
        let old_values = std::mem::replace(&mut self.values, empty_slots(capacity));

        for (key, value) in old_keys.into_iter().zip(old_values) {
            if let Some(key) = key {
                let index = self.locate(&key);
                self.keys[index] = Some(key);
                self.values[index] = value;
            }
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> Default for ProbeTable<K, V, S> {
    fn default() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ProbeTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
