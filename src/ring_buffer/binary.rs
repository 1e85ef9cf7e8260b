use crate::ring_buffer::field::BitGrid;
use crate::ring_buffer::ring::RingBuffer;

/// Ring buffer of boolean fields, one bit per cell.
///
/// Same contract as [`GenericRingBuffer`](super::GenericRingBuffer) at an
/// eighth of the memory of `GenericRingBuffer<bool>`.
pub type BinaryRingBuffer = RingBuffer<BitGrid>;

impl RingBuffer<BitGrid> {
    /// Bytes of cell storage held by all slots.
    pub fn storage_bytes(&self) -> usize {
        self.slots().iter().map(BitGrid::storage_bytes).sum()
    }
}
