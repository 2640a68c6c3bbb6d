//! A dense, open-addressed, insert-only hash-consing set: the mechanism
//! that gives identity to structurally-equal macrocells.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::warn;

use crate::error::HashlifeError;

use super::arena::Arena;

/// Occupancy flag, stored in the high bit of each slot's metadata byte.
const OCCUPIED_BIT: u8 = 0x80;

/// Historical tag mask. One bit narrower than a clean 7-bit mask (`0x7F`)
/// would be; preserved exactly for behavioral parity (see `DESIGN.md`).
const TAG_MASK: u8 = 0xEF;

/// Maximum number of consecutive slots an insertion will probe before
/// reporting saturation.
const PROBE_WINDOW: usize = 10;

fn hash_of<K: Hash>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

fn tag_of(hash: u64) -> u8 {
    ((hash >> (u64::BITS - 7)) as u8) & TAG_MASK
}

/// A fixed-capacity, open-addressed set: at most one entry per equal key,
/// no deletions (only a full `clear`), and insertion bounded to a
/// ten-slot linear probe that may legitimately fail. Key storage is bump-
/// allocated out of a private [`Arena`], so a table's backing storage can
/// itself run out of room independently of the table saturating.
pub struct DenseHashSet<K> {
    meta: Vec<u8>,
    keys: Arena<Option<K>>,
    keys_offset: usize,
    size: usize,
    saturation_logged: bool,
}

impl<K: Hash + Eq + Clone> DenseHashSet<K> {
    /// Builds a set with room for exactly `capacity` entries, with key
    /// storage drawn from a fresh arena of `arena_capacity` slots.
    ///
    /// # Errors
    /// Returns [`HashlifeError::InvalidCapacity`] if `capacity == 0`, or
    /// [`HashlifeError::ArenaExhausted`] if `arena_capacity` is too small
    /// to back `capacity` slots.
    pub fn new(capacity: usize, arena_capacity: usize) -> Result<Self, HashlifeError> {
        if capacity == 0 {
            return Err(HashlifeError::InvalidCapacity { requested: 0 });
        }
        let mut keys: Arena<Option<K>> = Arena::new(arena_capacity);
        let keys_offset = keys.allocate(capacity).ok_or(HashlifeError::ArenaExhausted)?;
        Ok(DenseHashSet {
            meta: vec![0u8; capacity],
            keys,
            keys_offset,
            size: 0,
            saturation_logged: false,
        })
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.meta.len()
    }

    /// Number of occupied slots.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Finds the slot index holding a key equal to `key`, following the
    /// probe chain until it wraps back to the start slot or finds an
    /// empty slot.
    pub fn find(&self, key: &K) -> Option<usize> {
        let capacity = self.capacity();
        let h = hash_of(key);
        let tag = tag_of(h);
        let start = (h as usize) % capacity;
        let mut i = start;
        loop {
            if self.meta[i] & OCCUPIED_BIT == 0 {
                return None;
            }
            if self.meta[i] & !OCCUPIED_BIT == tag
                && self.keys.get(self.keys_offset + i).as_ref() == Some(key)
            {
                return Some(i);
            }
            i = (i + 1) % capacity;
            if i == start {
                return None;
            }
        }
    }

    /// `true` if an entry equal to `key` exists.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// `0` or `1`, mirroring `contains` in the shape of
    /// `std::collections::HashSet::len`-adjacent APIs the donor favors.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains(key))
    }

    /// Borrows the key stored at `index`, if that slot is occupied.
    pub fn get(&self, index: usize) -> Option<&K> {
        if self.meta[index] & OCCUPIED_BIT != 0 {
            self.keys.get(self.keys_offset + index).as_ref()
        } else {
            None
        }
    }

    /// Inserts `key` if absent. Returns `(Some(index), true)` on a fresh
    /// insertion, `(Some(index), false)` if an equal key already occupied
    /// a slot, and `(None, false)` if the ten-slot probe window starting
    /// at the key's hash is fully occupied by unequal keys (saturation).
    pub fn emplace(&mut self, key: K) -> (Option<usize>, bool) {
        if let Some(existing) = self.find(&key) {
            return (Some(existing), false);
        }
        let capacity = self.capacity();
        let h = hash_of(&key);
        let tag = tag_of(h);
        let start = (h as usize) % capacity;
        let window = PROBE_WINDOW.min(capacity);
        for step in 0..window {
            let i = (start + step) % capacity;
            if self.meta[i] & OCCUPIED_BIT == 0 {
                self.meta[i] = OCCUPIED_BIT | tag;
                *self.keys.get_mut(self.keys_offset + i) = Some(key);
                self.size += 1;
                self.saturation_logged = false;
                return (Some(i), true);
            }
        }
        if !self.saturation_logged {
            warn!(
                "hash-consing set saturated: {} slots probed from {start} with {} of {capacity} occupied",
                window, self.size
            );
            self.saturation_logged = true;
        }
        (None, false)
    }

    /// Resets every slot to unoccupied. All previously returned indices
    /// become logically invalid.
    pub fn clear(&mut self) {
        for m in self.meta.iter_mut() {
            *m = 0;
        }
        for i in 0..self.meta.len() {
            *self.keys.get_mut(self.keys_offset + i) = None;
        }
        self.size = 0;
        self.saturation_logged = false;
    }

    /// The slot position iteration starts from.
    pub fn begin(&self) -> usize {
        0
    }

    /// One past the last slot position; `end() - begin() == capacity()`.
    pub fn end(&self) -> usize {
        self.capacity()
    }

    /// Walks occupied slots from `begin()` to `end()`, skipping empty ones.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            set: self,
            pos: self.begin(),
        }
    }
}

/// Iterator over a [`DenseHashSet`]'s occupied keys, in slot order.
pub struct Iter<'a, K> {
    set: &'a DenseHashSet<K>,
    pos: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        while self.pos < self.set.meta.len() {
            let i = self.pos;
            self.pos += 1;
            if self.set.meta[i] & OCCUPIED_BIT != 0 {
                return self.set.keys.get(self.set.keys_offset + i).as_ref();
            }
        }
        None
    }
}

impl<'a, K: Hash + Eq + Clone> IntoIterator for &'a DenseHashSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K: Clone> Clone for DenseHashSet<K> {
    fn clone(&self) -> Self {
        DenseHashSet {
            meta: self.meta.clone(),
            keys: self.keys.clone(),
            keys_offset: self.keys_offset,
            size: self.size,
            saturation_logged: self.saturation_logged,
        }
    }
}
