//! Five-level life: cells hold 0 (fully dead) to 4 (fully alive).
//!
//! The quantization is fixed; the transition is pluggable through
//! [`LevelTransition`]. [`FuzzyConway`] is the built-in transition.

use crate::error::Result;
use crate::ring_buffer::{Boundary, CellField, GenericRingBuffer, Grid};
use crate::simulation::parameter::SimulationParameter;
use crate::simulation::rule::{ParamSlot, Rule};

pub const MAX_LEVEL: u8 = 4;

const INFO: &str = "A five-state variant of Conway's Game of Life: every cell holds a level \
from 0 (fully dead) to 4 (fully alive).";

/// Half-open buckets: `(0.75, 1] -> 4`, `(0.5, 0.75] -> 3`, `(0.25, 0.5] -> 2`,
/// `(0, 0.25] -> 1`, everything else `-> 0`.
pub fn quantize_level(intensity: f64) -> u8 {
    if intensity > 0.5 {
        if intensity > 0.75 {
            4
        } else {
            3
        }
    } else if intensity > 0.25 {
        2
    } else if intensity > 0.0 {
        1
    } else {
        0
    }
}

pub fn level_intensity(level: u8) -> f64 {
    f64::from(level.min(MAX_LEVEL)) * 0.25
}

/// Computes a cell's next level from its level and its eight neighbors.
pub trait LevelTransition {
    /// `neighbors` is in [`Direction::ALL`](crate::ring_buffer::Direction::ALL) order.
    /// Results above [`MAX_LEVEL`] are clamped.
    fn next_level(&self, current: u8, neighbors: &[u8; 8]) -> u8;

    fn param(&self, _slot: ParamSlot) -> Option<&SimulationParameter> {
        None
    }

    fn param_mut(&mut self, _slot: ParamSlot) -> Option<&mut SimulationParameter> {
        None
    }
}

impl<F> LevelTransition for F
where
    F: Fn(u8, &[u8; 8]) -> u8,
{
    fn next_level(&self, current: u8, neighbors: &[u8; 8]) -> u8 {
        self(current, neighbors)
    }
}

/// Conway's rule on fractional neighbor counts.
///
/// The neighborhood's levels are summed and divided by 4, giving an
/// effective live count in `[0, 8]`. A cell at level 2 or more counts as
/// alive: it grows one level while the count stays within
/// `[2 - slack, 3 + slack]` and fades one level otherwise. A dead cell grows
/// one level when the count is within `tolerance` of 3 and fades otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyConway {
    birth_tolerance: SimulationParameter,
    survival_slack: SimulationParameter,
}

impl Default for FuzzyConway {
    fn default() -> Self {
        Self {
            birth_tolerance: SimulationParameter::new("Birth tolerance"),
            survival_slack: SimulationParameter::new("Survival slack"),
        }
    }
}

impl FuzzyConway {
    pub fn new(birth_tolerance: f64, survival_slack: f64) -> Result<Self> {
        let mut rule = Self::default();
        rule.birth_tolerance.set_current(birth_tolerance)?;
        rule.survival_slack.set_current(survival_slack)?;
        Ok(rule)
    }
}

impl LevelTransition for FuzzyConway {
    fn next_level(&self, current: u8, neighbors: &[u8; 8]) -> u8 {
        let live: f64 = neighbors.iter().map(|&l| level_intensity(l)).sum();
        let grows = if current >= 2 {
            let slack = self.survival_slack.current();
            (2.0 - slack..=3.0 + slack).contains(&live)
        } else {
            (live - 3.0).abs() <= self.birth_tolerance.current()
        };
        if grows {
            current.saturating_add(1).min(MAX_LEVEL)
        } else {
            current.saturating_sub(1)
        }
    }

    fn param(&self, slot: ParamSlot) -> Option<&SimulationParameter> {
        match slot {
            ParamSlot::First => Some(&self.birth_tolerance),
            ParamSlot::Second => Some(&self.survival_slack),
        }
    }

    fn param_mut(&mut self, slot: ParamSlot) -> Option<&mut SimulationParameter> {
        match slot {
            ParamSlot::First => Some(&mut self.birth_tolerance),
            ParamSlot::Second => Some(&mut self.survival_slack),
        }
    }
}

/// Five-level rule stored one byte per cell.
#[derive(Clone, Debug, Default)]
pub struct Fuzzy5Rule<T = FuzzyConway> {
    transition: T,
}

impl<T: LevelTransition> Fuzzy5Rule<T> {
    pub fn new(transition: T) -> Self {
        Self { transition }
    }

    pub fn transition(&self) -> &T {
        &self.transition
    }
}

impl<T: LevelTransition> Rule for Fuzzy5Rule<T> {
    type Store = GenericRingBuffer<u8>;

    fn info(&self) -> &str {
        INFO
    }

    fn to_intensity(&self, level: u8) -> f64 {
        level_intensity(level)
    }

    fn quantize(&self, intensity: f64) -> u8 {
        quantize_level(intensity)
    }

    fn step(&self, current: &Grid<u8>, next: &mut Grid<u8>, boundary: Boundary<u8>) -> Result<()> {
        for y in 0..current.height() {
            for x in 0..current.width() {
                let neighbors = current.neighborhood(x, y, boundary)?;
                let level = self.transition.next_level(current.get(x, y)?, &neighbors);
                next.set(x, y, level.min(MAX_LEVEL))?;
            }
        }
        Ok(())
    }

    fn param(&self, slot: ParamSlot) -> Option<&SimulationParameter> {
        self.transition.param(slot)
    }

    fn param_mut(&mut self, slot: ParamSlot) -> Option<&mut SimulationParameter> {
        self.transition.param_mut(slot)
    }
}
