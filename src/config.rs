/// Grid dimensions (32x32 = 1024 cells)
pub const DEFAULT_WIDTH: usize = 32;
pub const DEFAULT_HEIGHT: usize = 32;

/// Number of generations kept in the history ring
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Smallest ring that still has room for a previous and a next generation
pub const MIN_HISTORY_CAPACITY: usize = 2;

/// Number of life-sum samples kept when statistics tracking is on
pub const DEFAULT_STATS_CAPACITY: usize = 1_000_000;

/// Grid edges are joined by default
pub const DEFAULT_WRAP: bool = true;

/// Statistics tracking is off by default
pub const DEFAULT_TRACK_LIFE_STATS: bool = false;

// ============================================
// Driver defaults
// ============================================

/// Probability that a cell starts alive when randomizing
pub const DEFAULT_DENSITY: f64 = 0.5;

/// Generations computed by the headless driver when none are requested
pub const DEFAULT_GENERATIONS: u64 = 100;

/// Intensity at or above which a binary cell counts as alive
pub const BINARY_ALIVE_THRESHOLD: f64 = 0.5;
