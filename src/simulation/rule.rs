use crate::error::Result;
use crate::ring_buffer::{Boundary, CellField, GenerationStore};
use crate::simulation::parameter::SimulationParameter;

/// Which of the two optional rule parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamSlot {
    First,
    Second,
}

/// Stored cell value of rule `R`.
pub type CellValue<R> = <<R as Rule>::Store as GenerationStore>::Value;

/// A cell-value domain plus the transition function that evolves it.
///
/// The engine owns history, policies and bookkeeping; a rule only says how
/// intensities map to stored values and how one generation becomes the next.
pub trait Rule {
    type Store: GenerationStore;

    /// Human-readable description of the simulation.
    fn info(&self) -> &str;

    /// Stored value as a life intensity in `[0.0, 1.0]`.
    fn to_intensity(&self, value: <Self::Store as GenerationStore>::Value) -> f64;

    /// Maps an intensity already clamped to `[0.0, 1.0]` to a stored value.
    fn quantize(&self, intensity: f64) -> <Self::Store as GenerationStore>::Value;

    /// Value of cells past the edge when wrapping is off.
    fn outside_value(&self) -> <Self::Store as GenerationStore>::Value {
        Default::default()
    }

    /// Writes every cell of `next` from `current`.
    fn step(
        &self,
        current: &<Self::Store as GenerationStore>::Field,
        next: &mut <Self::Store as GenerationStore>::Field,
        boundary: Boundary<<Self::Store as GenerationStore>::Value>,
    ) -> Result<()>;

    /// Sum of the intensities of all cells.
    fn life_sum(&self, field: &<Self::Store as GenerationStore>::Field) -> Result<f64> {
        let mut sum = 0.0;
        for y in 0..field.height() {
            for x in 0..field.width() {
                sum += self.to_intensity(field.get(x, y)?);
            }
        }
        Ok(sum)
    }

    fn param(&self, _slot: ParamSlot) -> Option<&SimulationParameter> {
        None
    }

    fn param_mut(&mut self, _slot: ParamSlot) -> Option<&mut SimulationParameter> {
        None
    }
}
