//! Index arithmetic shared by every ring buffer variant.
//!
//! The live generations occupy the physical slots from `oldest` to `newest`
//! (inclusive, modulo `capacity`). Everything else is the unused range.

/// Position of the live range inside a ring of `capacity` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    oldest: usize,
    newest: usize,
    capacity: usize,
}

impl Cursor {
    /// A single live generation at slot 0. `capacity` must be at least 2.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 2);
        Self {
            oldest: 0,
            newest: 0,
            capacity,
        }
    }

    /// A live range of `len` generations starting at slot 0.
    pub(crate) fn with_len(capacity: usize, len: usize) -> Self {
        debug_assert!(len >= 1 && len <= capacity);
        Self {
            oldest: 0,
            newest: len - 1,
            capacity,
        }
    }

    /// Physical slot of the oldest live generation.
    pub fn oldest(&self) -> usize {
        self.oldest
    }

    /// Physical slot of the newest live generation.
    pub fn newest(&self) -> usize {
        self.newest
    }

    /// Total slots in the ring.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live generations, always in `1..=capacity`.
    pub fn len(&self) -> usize {
        live_len(self.oldest, self.newest, self.capacity)
    }

    /// Every slot holds a live generation.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Physical slot of the `i`-th live generation (0 = oldest).
    pub fn physical(&self, i: usize) -> Option<usize> {
        if i < self.len() {
            Some((self.oldest + i) % self.capacity)
        } else {
            None
        }
    }

    /// Moves `newest` forward. Returns true if the oldest generation was evicted.
    pub(crate) fn move_forward(&mut self) -> bool {
        let was_full = self.is_full();
        self.newest = next(self.newest, self.capacity);
        if was_full {
            self.oldest = next(self.oldest, self.capacity);
        }
        was_full
    }

    /// Moves `newest` back. Fails when only one generation is live.
    pub(crate) fn move_back(&mut self) -> bool {
        if self.newest == self.oldest {
            return false;
        }
        self.newest = prev(self.newest, self.capacity);
        true
    }

    pub(crate) fn collapse_to_newest(&mut self) {
        self.oldest = self.newest;
    }

    pub(crate) fn collapse_to_oldest(&mut self) {
        self.newest = self.oldest;
    }

    /// Physical slots strictly between `newest` and `oldest` going forward.
    pub fn unused_slots(&self) -> impl Iterator<Item = usize> {
        let capacity = self.capacity;
        let start = next(self.newest, capacity);
        let count = capacity - self.len();
        (0..count).map(move |k| (start + k) % capacity)
    }
}

/// Live length for a ring where `oldest == newest` means one generation.
pub fn live_len(oldest: usize, newest: usize, capacity: usize) -> usize {
    (newest + capacity - oldest) % capacity + 1
}

#[inline]
fn next(pos: usize, capacity: usize) -> usize {
    if pos + 1 == capacity {
        0
    } else {
        pos + 1
    }
}

#[inline]
fn prev(pos: usize, capacity: usize) -> usize {
    if pos == 0 {
        capacity - 1
    } else {
        pos - 1
    }
}
