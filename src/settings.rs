//! Simulation settings.
//!
//! Settings are plain data. The owner of a simulation hands a new value to
//! [`Simulation::apply_settings`](crate::simulation::Simulation::apply_settings),
//! which reconciles the history buffer and statistics with it.
//!
//! ## Example settings file
//!
//! ```toml
//! history_capacity = 200
//! width = 64
//! height = 48
//! wrap = false
//! track_life_stats = true
//! life_stats_capacity = 5000
//! history_full_behavior = "stop_silently"
//! life_stats_full_behavior = "forget_silently"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_HEIGHT, DEFAULT_HISTORY_CAPACITY, DEFAULT_STATS_CAPACITY, DEFAULT_TRACK_LIFE_STATS,
    DEFAULT_WIDTH, DEFAULT_WRAP, MIN_HISTORY_CAPACITY,
};
use crate::error::{Error, Result};

/// What a bounded store does when it is asked to grow past its capacity.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemFullBehavior {
    /// Evict the oldest entry and carry on.
    #[default]
    ForgetSilently,
    /// Refuse to grow; the operation reports `false` or is skipped.
    StopSilently,
    /// Fail with [`Error::ResourceExhausted`].
    ThrowOnFull,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    /// Generations remembered by the history ring
    pub history_capacity: usize,
    pub width: usize,
    pub height: usize,
    /// Grid edges are joined (torus)
    pub wrap: bool,
    /// Record the life sum of every computed generation
    pub track_life_stats: bool,
    pub life_stats_capacity: usize,
    pub history_full_behavior: MemFullBehavior,
    pub life_stats_full_behavior: MemFullBehavior,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            wrap: DEFAULT_WRAP,
            track_life_stats: DEFAULT_TRACK_LIFE_STATS,
            life_stats_capacity: DEFAULT_STATS_CAPACITY,
            history_full_behavior: MemFullBehavior::default(),
            life_stats_full_behavior: MemFullBehavior::default(),
        }
    }
}

impl SimulationSettings {
    /// Settings with the given shape and defaults for everything else.
    pub fn with_shape(history_capacity: usize, width: usize, height: usize) -> Self {
        Self {
            history_capacity,
            width,
            height,
            ..Self::default()
        }
    }

    /// Parses and validates TOML settings. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings = toml::from_str::<Self>(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded settings from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Checks the shape fields. Policies and flags are always valid.
    pub fn validate(&self) -> Result<()> {
        validate_shape(self.history_capacity, self.width, self.height)
    }

    /// True if `other` needs a differently shaped history ring.
    pub fn shape_differs(&self, other: &Self) -> bool {
        self.history_capacity != other.history_capacity
            || self.width != other.width
            || self.height != other.height
    }
}

/// Shape check shared by the ring buffers and the settings.
pub(crate) fn validate_shape(capacity: usize, width: usize, height: usize) -> Result<()> {
    if capacity < MIN_HISTORY_CAPACITY {
        return Err(Error::configuration(format!(
            "history capacity must be at least {MIN_HISTORY_CAPACITY}, got {capacity}"
        )));
    }
    if width < 1 {
        return Err(Error::configuration("width can't be less than 1"));
    }
    if height < 1 {
        return Err(Error::configuration("height can't be less than 1"));
    }
    Ok(())
}
