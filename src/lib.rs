//! Cellular automata with a bounded, rewindable generation history.

pub mod config;
pub mod error;
pub mod ring_buffer;
pub mod settings;
pub mod simulation;

pub use error::{Error, Result};
pub use settings::{MemFullBehavior, SimulationSettings};
pub use simulation::{CellSimulation, ClassicSimulation, Fuzzy5Simulation, Simulation};
