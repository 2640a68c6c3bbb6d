//! A bump allocator over a fixed-capacity buffer. Nodes are never freed
//! individually; the whole arena is reclaimed at once by dropping or
//! rebuilding it.

use log::trace;

use super::buffer::FixedBuffer;

/// Bump allocator handing out contiguous ranges of `T` from a
/// fixed-capacity backing buffer. `allocate` fails (returns `None`) once
/// the buffer is exhausted rather than growing it.
#[derive(Clone)]
pub struct Arena<T> {
    buffer: FixedBuffer<T>,
    head: usize,
    logged_exhaustion: bool,
}

impl<T: Clone + Default> Arena<T> {
    /// Builds an arena with `capacity` slots and an empty high-water mark.
    pub fn new(capacity: usize) -> Self {
        Arena {
            buffer: FixedBuffer::new(capacity),
            head: 0,
            logged_exhaustion: false,
        }
    }
}

impl<T> Arena<T> {
    /// Total number of slots this arena was built with.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Number of slots handed out so far.
    pub fn len(&self) -> usize {
        self.head
    }

    /// `true` if no slot has been handed out yet.
    pub fn is_empty(&self) -> bool {
        self.head == 0
    }

    /// `true` once every slot has been handed out.
    pub fn full(&self) -> bool {
        self.head == self.buffer.capacity()
    }

    /// Hands out `n` consecutive slots starting at the current
    /// high-water mark, advancing it by `n`. Returns the starting index,
    /// or `None` without moving the mark if fewer than `n` slots remain.
    pub fn allocate(&mut self, n: usize) -> Option<usize> {
        if self.head + n > self.buffer.capacity() {
            if !self.logged_exhaustion {
                trace!(
                    "arena exhausted: requested {n} slots with {} of {} already used",
                    self.head,
                    self.buffer.capacity()
                );
                self.logged_exhaustion = true;
            }
            return None;
        }
        let start = self.head;
        self.head += n;
        Some(start)
    }

    /// Borrows the slot at `index`.
    pub fn get(&self, index: usize) -> &T {
        self.buffer.get(index)
    }

    /// Mutably borrows the slot at `index`.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.buffer.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_arena_is_not_full() {
        let arena: Arena<u32> = Arena::new(10);
        assert!(!arena.full());
    }

    #[test]
    fn allocate_nine_of_ten_leaves_room() {
        let mut arena: Arena<u32> = Arena::new(10);
        assert_eq!(arena.allocate(9), Some(0));
        assert!(!arena.full());
    }

    #[test]
    fn allocate_ten_of_ten_fills_it() {
        let mut arena: Arena<u32> = Arena::new(10);
        assert_eq!(arena.allocate(10), Some(0));
        assert!(arena.full());
    }

    #[test]
    fn over_allocating_fails_without_moving_head() {
        let mut arena: Arena<u32> = Arena::new(10);
        assert_eq!(arena.allocate(11), None);
        assert_eq!(arena.len(), 0);
        assert!(!arena.full());
    }

    #[test]
    fn sequential_allocations_advance_head() {
        let mut arena: Arena<u32> = Arena::new(10);
        assert_eq!(arena.allocate(4), Some(0));
        assert_eq!(arena.allocate(4), Some(4));
        assert_eq!(arena.allocate(3), None);
        assert_eq!(arena.allocate(2), Some(8));
        assert!(arena.full());
    }
}
