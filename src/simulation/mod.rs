//! Rules, the simulation engine and its bookkeeping.

mod classic;
mod engine;
mod fuzzy5;
mod parameter;
mod rule;
mod stats;

pub use classic::{next_state, ClassicRule};
pub use engine::{CellSimulation, ClassicSimulation, Fuzzy5Simulation, Simulation};
pub use fuzzy5::{level_intensity, quantize_level, Fuzzy5Rule, FuzzyConway, LevelTransition, MAX_LEVEL};
pub use parameter::SimulationParameter;
pub use rule::{CellValue, ParamSlot, Rule};
pub use stats::LifeStats;
