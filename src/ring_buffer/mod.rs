//! Fixed-capacity history of 2D cell fields ("3D ring buffer").
//!
//! Dimension 1 is the ring position, dimensions 2 and 3 are x and y.
//! Slots are materialized the first time a generation lands in them and can
//! be released again with [`GenerationStore::free_unused_memory`].

mod binary;
mod direction;
mod field;
mod generic;
mod index;
mod ring;

pub use binary::BinaryRingBuffer;
pub use direction::{bounded_step, wrapped_step, Direction};
pub use field::{BitGrid, Boundary, CellField, Grid, SlotStorage};
pub use generic::GenericRingBuffer;
pub use index::{live_len, Cursor};
pub use ring::RingBuffer;

use std::fmt;

use crate::error::{Error, Result};

/// Capability set shared by every ring buffer variant.
///
/// Generation index `0` is the oldest live generation, `len() - 1` the newest.
pub trait GenerationStore: Sized {
    type Value: Copy + PartialEq + Default + fmt::Debug;
    type Field: CellField<Value = Self::Value>;

    /// A buffer holding one default-valued generation.
    fn with_shape(capacity: usize, width: usize, height: usize) -> Result<Self>;

    /// A new buffer of the given shape holding as many of `source`'s newest
    /// generations as fit, oldest first. Each copied generation keeps its
    /// overlapping top-left rectangle; new area is set to `fill`.
    fn resized_from(
        capacity: usize,
        width: usize,
        height: usize,
        source: &Self,
        fill: Self::Value,
    ) -> Result<Self>;

    /// Current position of the live range.
    fn cursor(&self) -> Cursor;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn capacity(&self) -> usize {
        self.cursor().capacity()
    }

    /// Number of live generations, in `1..=capacity()`.
    fn len(&self) -> usize {
        self.cursor().len()
    }

    fn is_full(&self) -> bool {
        self.cursor().is_full()
    }

    /// Pushes a new newest generation, evicting the oldest one when full.
    ///
    /// With `clear == false` a reused slot keeps whatever it held before;
    /// the caller is expected to overwrite every cell.
    fn append_generation(&mut self, clear: bool);

    /// Drops the newest generation. Fails if it is the only one.
    fn remove_generation(&mut self) -> bool;

    /// Drops `n` generations, or as many as possible and returns false.
    fn remove_generations(&mut self, n: usize) -> bool {
        for _ in 0..n {
            if !self.remove_generation() {
                return false;
            }
        }
        true
    }

    /// Keeps only the newest generation.
    fn reset_to_newest(&mut self);

    /// Keeps only the oldest generation.
    fn reset_to_oldest(&mut self);

    /// Releases the storage of every slot outside the live range.
    /// Returns the number of slots released.
    fn free_unused_memory(&mut self) -> usize;

    /// Slots currently holding cell storage.
    fn allocated_slots(&self) -> usize;

    fn at(&self, i: usize) -> Result<&Self::Field>;
    fn oldest(&self) -> &Self::Field;
    fn newest(&self) -> &Self::Field;
    fn newest_mut(&mut self) -> &mut Self::Field;

    /// The generation right before the newest one.
    fn previous(&self) -> Result<&Self::Field> {
        let len = self.len();
        if len < 2 {
            return Err(Error::index("previous generation", 0, 0));
        }
        self.at(len - 2)
    }

    /// Previous generation for reading and newest generation for writing.
    fn previous_and_newest_mut(&mut self) -> Result<(&Self::Field, &mut Self::Field)>;
}

/// Shared borrow of `slots[read]` alongside a mutable borrow of `slots[write]`.
pub(crate) fn pair_mut<T>(slots: &mut [T], read: usize, write: usize) -> (&T, &mut T) {
    debug_assert_ne!(read, write);
    if read < write {
        let (left, right) = slots.split_at_mut(write);
        (&left[read], &mut right[0])
    } else {
        let (left, right) = slots.split_at_mut(read);
        (&right[0], &mut left[write])
    }
}

/// Physical slots of the newest `min(source.len(), capacity)` generations, oldest first.
pub(crate) fn surviving_slots(source: Cursor, capacity: usize) -> Vec<usize> {
    let len = source.len();
    let keep = len.min(capacity);
    (len - keep..len).filter_map(|i| source.physical(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_mut_both_orders() {
        let mut values = [1, 2, 3];
        let (r, w) = pair_mut(&mut values, 0, 2);
        *w += *r;
        let (r, w) = pair_mut(&mut values, 2, 1);
        *w += *r;
        assert_eq!(values, [1, 6, 4]);
    }

    #[test]
    fn test_surviving_slots_keeps_newest() {
        let mut cursor = Cursor::new(4);
        for _ in 0..5 {
            cursor.move_forward();
        }
        // oldest = 2, newest = 1 holds slots 2,3,0,1
        assert_eq!(surviving_slots(cursor, 4), vec![2, 3, 0, 1]);
        assert_eq!(surviving_slots(cursor, 2), vec![0, 1]);
        assert_eq!(surviving_slots(cursor, 9), vec![2, 3, 0, 1]);
    }
}
