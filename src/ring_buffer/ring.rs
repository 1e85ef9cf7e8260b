use crate::error::{Error, Result};
use crate::ring_buffer::field::{CellField, SlotStorage};
use crate::ring_buffer::index::Cursor;
use crate::ring_buffer::{pair_mut, surviving_slots, GenerationStore};
use crate::settings::validate_shape;

/// Fixed-capacity ring of lazily materialized fields.
///
/// The slot type picks the memory layout: [`GenericRingBuffer`](super::GenericRingBuffer)
/// holds one value per cell, [`BinaryRingBuffer`](super::BinaryRingBuffer) one bit.
#[derive(Clone, Debug)]
pub struct RingBuffer<F> {
    slots: Vec<F>,
    cursor: Cursor,
    width: usize,
    height: usize,
}

impl<F: SlotStorage> RingBuffer<F> {
    /// A ring holding one default-valued generation in slot 0.
    pub fn new(capacity: usize, width: usize, height: usize) -> Result<Self> {
        validate_shape(capacity, width, height)?;
        let mut slots: Vec<F> = (0..capacity).map(|_| F::unallocated(width, height)).collect();
        slots[0].materialize();
        Ok(Self {
            slots,
            cursor: Cursor::new(capacity),
            width,
            height,
        })
    }

    /// Pushes a new generation with every cell set to `initial`.
    pub fn append_generation_with(&mut self, initial: F::Value) {
        self.append_generation(false);
        self.newest_mut().fill(initial);
    }

    pub(crate) fn slots(&self) -> &[F] {
        &self.slots
    }
}

impl<F: SlotStorage> GenerationStore for RingBuffer<F> {
    type Value = F::Value;
    type Field = F;

    fn with_shape(capacity: usize, width: usize, height: usize) -> Result<Self> {
        Self::new(capacity, width, height)
    }

    fn resized_from(
        capacity: usize,
        width: usize,
        height: usize,
        source: &Self,
        fill: F::Value,
    ) -> Result<Self> {
        validate_shape(capacity, width, height)?;
        let kept = surviving_slots(source.cursor, capacity);
        let mut slots: Vec<F> = (0..capacity).map(|_| F::unallocated(width, height)).collect();
        for (target, &from) in slots.iter_mut().zip(&kept) {
            target.materialize();
            target.fill(fill);
            target.copy_overlap_from(&source.slots[from]);
        }
        log::debug!(
            "Resized history {}x{}x{} -> {}x{}x{}, kept {} generations",
            source.capacity(),
            source.width,
            source.height,
            capacity,
            width,
            height,
            kept.len()
        );
        Ok(Self {
            slots,
            cursor: Cursor::with_len(capacity, kept.len()),
            width,
            height,
        })
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn append_generation(&mut self, clear: bool) {
        if self.cursor.move_forward() {
            log::trace!("History full, evicted oldest generation");
        }
        let slot = &mut self.slots[self.cursor.newest()];
        if !slot.materialize() && clear {
            slot.fill(F::Value::default());
        }
    }

    fn remove_generation(&mut self) -> bool {
        self.cursor.move_back()
    }

    fn reset_to_newest(&mut self) {
        self.cursor.collapse_to_newest();
    }

    fn reset_to_oldest(&mut self) {
        self.cursor.collapse_to_oldest();
    }

    fn free_unused_memory(&mut self) -> usize {
        let mut released = 0;
        for pos in self.cursor.unused_slots() {
            let slot = &mut self.slots[pos];
            if slot.is_allocated() {
                slot.release();
                released += 1;
            }
        }
        if released > 0 {
            log::debug!("Released {} unused history slots", released);
        }
        released
    }

    fn allocated_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_allocated()).count()
    }

    fn at(&self, i: usize) -> Result<&F> {
        self.cursor
            .physical(i)
            .map(|pos| &self.slots[pos])
            .ok_or_else(|| Error::index("generation", i, self.cursor.len()))
    }

    fn oldest(&self) -> &F {
        &self.slots[self.cursor.oldest()]
    }

    fn newest(&self) -> &F {
        &self.slots[self.cursor.newest()]
    }

    fn newest_mut(&mut self) -> &mut F {
        &mut self.slots[self.cursor.newest()]
    }

    fn previous_and_newest_mut(&mut self) -> Result<(&F, &mut F)> {
        let len = self.cursor.len();
        let read = len
            .checked_sub(2)
            .and_then(|i| self.cursor.physical(i))
            .ok_or_else(|| Error::index("previous generation", 0, len))?;
        Ok(pair_mut(&mut self.slots, read, self.cursor.newest()))
    }
}
