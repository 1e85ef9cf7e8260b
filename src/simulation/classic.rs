use crate::config::BINARY_ALIVE_THRESHOLD;
use crate::error::Result;
use crate::ring_buffer::{BinaryRingBuffer, BitGrid, Boundary, CellField};
use crate::simulation::rule::Rule;

const INFO: &str = "Conway's Game of Life (B3/S23): a live cell survives with two or three \
live neighbors, a dead cell with exactly three comes alive, everything else dies.";

/// Conway's Game of Life on bit-packed boolean cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassicRule {
    outside_alive: bool,
}

impl ClassicRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat cells past the edge as alive (only used when wrapping is off).
    pub fn with_outside_alive(outside_alive: bool) -> Self {
        Self { outside_alive }
    }
}

/// B3/S23
#[inline]
pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

impl Rule for ClassicRule {
    type Store = BinaryRingBuffer;

    fn info(&self) -> &str {
        INFO
    }

    fn to_intensity(&self, alive: bool) -> f64 {
        if alive {
            1.0
        } else {
            0.0
        }
    }

    fn quantize(&self, intensity: f64) -> bool {
        intensity >= BINARY_ALIVE_THRESHOLD
    }

    fn outside_value(&self) -> bool {
        self.outside_alive
    }

    fn step(&self, current: &BitGrid, next: &mut BitGrid, boundary: Boundary<bool>) -> Result<()> {
        for y in 0..current.height() {
            for x in 0..current.width() {
                let live = current
                    .neighborhood(x, y, boundary)?
                    .iter()
                    .filter(|&&n| n)
                    .count();
                next.set(x, y, next_state(current.get(x, y)?, live))?;
            }
        }
        Ok(())
    }

    fn life_sum(&self, field: &BitGrid) -> Result<f64> {
        Ok(field.count_alive() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_pattern(rows: &[&str], boundary: Boundary<bool>) -> Vec<String> {
        let current = BitGrid::from_pattern(rows).unwrap();
        let mut next = BitGrid::new(current.width(), current.height());
        ClassicRule::new().step(&current, &mut next, boundary).unwrap();
        next.to_pattern()
    }

    #[test]
    fn test_next_state_table() {
        assert!(!next_state(true, 1));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 4));
        assert!(!next_state(false, 2));
        assert!(next_state(false, 3));
        assert!(!next_state(false, 4));
    }

    #[test]
    fn test_blinker_oscillates() {
        let next = step_pattern(&[".....", "..#..", "..#..", "..#..", "....."], Boundary::Fixed(false));
        assert_eq!(next, vec![".....", ".....", ".###.", ".....", "....."]);
    }

    #[test]
    fn test_block_is_still() {
        let rows = ["....", ".##.", ".##.", "...."];
        assert_eq!(step_pattern(&rows, Boundary::Wrap), rows);
    }

    #[test]
    fn test_wrap_joins_edges() {
        // vertical blinker split across the top/bottom edge
        let rows = ["..#..", ".....", ".....", "..#..", "..#.."];
        let next = step_pattern(&rows, Boundary::Wrap);
        assert_eq!(next, vec![".....", ".....", ".....", ".....", ".###."]);

        let bounded = step_pattern(&rows, Boundary::Fixed(false));
        assert_eq!(bounded, vec![".....", ".....", ".....", ".....", "....."]);
    }

    #[test]
    fn test_alive_outside_feeds_border() {
        // a corner cell sees 5 outside neighbors, too many to survive
        let next = step_pattern(&["#.", ".."], Boundary::Fixed(true));
        assert_eq!(next[0].as_bytes()[0], b'.');
    }

    #[test]
    fn test_quantize_threshold() {
        let rule = ClassicRule::new();
        assert!(!rule.quantize(0.49));
        assert!(rule.quantize(0.5));
        assert_eq!(rule.to_intensity(true), 1.0);
    }
}
