/// The eight compass directions of the Moore neighborhood.
///
/// North is towards `y = 0` (top row), west is towards `x = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// (dx, dy) step for this direction
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }
}

/// Neighbor coordinate on a torus. Each axis wraps on its own.
#[inline]
pub fn wrapped_step(x: usize, y: usize, direction: Direction, width: usize, height: usize) -> (usize, usize) {
    let (dx, dy) = direction.offset();
    let nx = (x as isize + dx).rem_euclid(width as isize) as usize;
    let ny = (y as isize + dy).rem_euclid(height as isize) as usize;
    (nx, ny)
}

/// Neighbor coordinate on a bounded grid, `None` past an edge.
#[inline]
pub fn bounded_step(x: usize, y: usize, direction: Direction, width: usize, height: usize) -> Option<(usize, usize)> {
    let (dx, dy) = direction.offset();
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    if nx < width && ny < height {
        Some((nx, ny))
    } else {
        None
    }
}
