use crate::ring_buffer::field::Grid;
use crate::ring_buffer::ring::RingBuffer;

/// Ring buffer storing one `V` per cell (bytes, fixed-point values, ...).
///
/// For `bool` cells prefer [`BinaryRingBuffer`](super::BinaryRingBuffer),
/// which packs 64 cells into a word.
pub type GenericRingBuffer<V> = RingBuffer<Grid<V>>;
