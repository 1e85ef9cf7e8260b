//! 2D cell fields stored in the ring buffer slots.
//!
//! `(0, 0)` is the upper left corner; cells are stored row by row.
//! A field whose storage has been released is an empty sentinel with its
//! dimensions kept, so a slot can be re-materialized without reallocating
//! the slot table.

use std::fmt;

use crate::error::{Error, Result};
use crate::ring_buffer::direction::{bounded_step, wrapped_step, Direction};

/// How a neighbor query treats cells past the grid edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary<V> {
    /// Re-enter from the opposite edge (torus).
    Wrap,
    /// Every cell outside the grid reads as this value.
    Fixed(V),
}

/// Read/write access to one generation.
pub trait CellField {
    type Value: Copy + PartialEq + Default + fmt::Debug;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn get(&self, x: usize, y: usize) -> Result<Self::Value>;
    fn set(&mut self, x: usize, y: usize, value: Self::Value) -> Result<()>;
    fn fill(&mut self, value: Self::Value);

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width() {
            return Err(Error::index("x", x, self.width()));
        }
        if y >= self.height() {
            return Err(Error::index("y", y, self.height()));
        }
        Ok(())
    }

    /// Neighbor of `(x, y)` on a torus. Only fails if `(x, y)` itself is outside.
    fn get_with_wrap(&self, x: usize, y: usize, direction: Direction) -> Result<Self::Value> {
        self.check_bounds(x, y)?;
        let (nx, ny) = wrapped_step(x, y, direction, self.width(), self.height());
        self.get(nx, ny)
    }

    /// Neighbor of `(x, y)`, or `outside` when the neighbor is past an edge.
    fn get_without_wrap(
        &self,
        x: usize,
        y: usize,
        direction: Direction,
        outside: Self::Value,
    ) -> Result<Self::Value> {
        self.check_bounds(x, y)?;
        match bounded_step(x, y, direction, self.width(), self.height()) {
            Some((nx, ny)) => self.get(nx, ny),
            None => Ok(outside),
        }
    }

    fn neighbor(
        &self,
        x: usize,
        y: usize,
        direction: Direction,
        boundary: Boundary<Self::Value>,
    ) -> Result<Self::Value> {
        match boundary {
            Boundary::Wrap => self.get_with_wrap(x, y, direction),
            Boundary::Fixed(outside) => self.get_without_wrap(x, y, direction, outside),
        }
    }

    /// All eight neighbors in [`Direction::ALL`] order.
    fn neighborhood(
        &self,
        x: usize,
        y: usize,
        boundary: Boundary<Self::Value>,
    ) -> Result<[Self::Value; 8]> {
        let mut out = [Self::Value::default(); 8];
        for (slot, direction) in out.iter_mut().zip(Direction::ALL) {
            *slot = self.neighbor(x, y, direction, boundary)?;
        }
        Ok(out)
    }
}

/// Cell storage a history slot can hold, drop and allocate again.
///
/// A released field keeps its dimensions but no cells; reading it is a
/// logic error, the ring buffer only hands out allocated slots.
pub trait SlotStorage: CellField + Sized {
    /// A field of the given shape holding no storage yet.
    fn unallocated(width: usize, height: usize) -> Self;

    fn is_allocated(&self) -> bool;

    /// Allocates default-valued storage if released. Returns true if it did.
    fn materialize(&mut self) -> bool;

    fn release(&mut self);

    /// Copies the overlapping top-left rectangle of `source`.
    fn copy_overlap_from(&mut self, source: &Self);
}

// ============================================
// Generic field
// ============================================

/// Field of arbitrary `Copy` cell values, one `V` per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<V> {
    cells: Vec<V>,
    width: usize,
    height: usize,
}

impl<V: Copy + Default> Grid<V> {
    /// Allocated field with every cell set to `V::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, V::default())
    }

    /// Allocated field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: V) -> Self {
        Self {
            cells: vec![value; width * height],
            width,
            height,
        }
    }

    /// Field built from a function of the cell coordinates.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> V) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self { cells, width, height }
    }

    /// Cells in row-major order. Empty if the storage was released.
    pub fn as_slice(&self) -> &[V] {
        &self.cells
    }
}

impl<V: Copy + PartialEq + Default + fmt::Debug> CellField for Grid<V> {
    type Value = V;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, x: usize, y: usize) -> Result<V> {
        self.check_bounds(x, y)?;
        Ok(self.cells[y * self.width + x])
    }

    fn set(&mut self, x: usize, y: usize, value: V) -> Result<()> {
        self.check_bounds(x, y)?;
        self.cells[y * self.width + x] = value;
        Ok(())
    }

    fn fill(&mut self, value: V) {
        self.cells.fill(value);
    }
}

impl<V: Copy + PartialEq + Default + fmt::Debug> SlotStorage for Grid<V> {
    fn unallocated(width: usize, height: usize) -> Self {
        Self {
            cells: Vec::new(),
            width,
            height,
        }
    }

    fn is_allocated(&self) -> bool {
        !self.cells.is_empty()
    }

    fn materialize(&mut self) -> bool {
        if self.is_allocated() {
            return false;
        }
        self.cells = vec![V::default(); self.width * self.height];
        true
    }

    fn release(&mut self) {
        self.cells = Vec::new();
    }

    fn copy_overlap_from(&mut self, source: &Self) {
        let w = self.width.min(source.width);
        let h = self.height.min(source.height);
        for y in 0..h {
            let dst = y * self.width;
            let src = y * source.width;
            self.cells[dst..dst + w].copy_from_slice(&source.cells[src..src + w]);
        }
    }
}

// ============================================
// Bit-packed field
// ============================================

const WORD_BITS: usize = u64::BITS as usize;

/// Boolean field packed 64 cells to a word.
///
/// Bits past `width * height` in the last word are always zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitGrid {
    words: Vec<u64>,
    width: usize,
    height: usize,
}

impl BitGrid {
    /// Allocated field with every cell dead.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            words: vec![0; words_for(width * height)],
            width,
            height,
        }
    }

    /// Parses rows of `#` (alive) and `.` (dead). All rows must be equally wide.
    pub fn from_pattern(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if width == 0 || height == 0 {
            return Err(Error::configuration("pattern must have at least one cell"));
        }
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::configuration(format!(
                    "pattern row {y} is {} wide, expected {width}",
                    row.len()
                )));
            }
            for (x, byte) in row.bytes().enumerate() {
                match byte {
                    b'#' => grid.set(x, y, true)?,
                    b'.' => {}
                    other => {
                        return Err(Error::configuration(format!(
                            "pattern may only contain '.' or '#', found {:?}",
                            other as char
                        )))
                    }
                }
            }
        }
        Ok(grid)
    }

    /// Number of live cells.
    pub fn count_alive(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Bytes of cell storage currently held.
    pub fn storage_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    /// Renders the field as `#`/`.` rows.
    pub fn to_pattern(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.bit(y * self.width + x) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[inline]
    fn bit(&self, index: usize) -> bool {
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    #[inline]
    fn put_bit(&mut self, index: usize, value: bool) {
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }
}

impl SlotStorage for BitGrid {
    fn unallocated(width: usize, height: usize) -> Self {
        Self {
            words: Vec::new(),
            width,
            height,
        }
    }

    fn is_allocated(&self) -> bool {
        !self.words.is_empty()
    }

    fn materialize(&mut self) -> bool {
        if self.is_allocated() {
            return false;
        }
        self.words = vec![0; words_for(self.width * self.height)];
        true
    }

    fn release(&mut self) {
        self.words = Vec::new();
    }

    fn copy_overlap_from(&mut self, source: &Self) {
        let w = self.width.min(source.width);
        let h = self.height.min(source.height);
        for y in 0..h {
            for x in 0..w {
                let alive = source.bit(y * source.width + x);
                self.put_bit(y * self.width + x, alive);
            }
        }
    }
}

impl CellField for BitGrid {
    type Value = bool;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, x: usize, y: usize) -> Result<bool> {
        self.check_bounds(x, y)?;
        Ok(self.bit(y * self.width + x))
    }

    fn set(&mut self, x: usize, y: usize, value: bool) -> Result<()> {
        self.check_bounds(x, y)?;
        self.put_bit(y * self.width + x, value);
        Ok(())
    }

    fn fill(&mut self, value: bool) {
        if !value {
            self.words.fill(0);
            return;
        }
        self.words.fill(u64::MAX);
        let tail = (self.width * self.height) % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
    }
}

#[inline]
fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}
