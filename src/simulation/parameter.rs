use crate::error::{Error, Result};

/// A named, bounded tuning knob of a parametric rule.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameter {
    name: String,
    min: f64,
    max: f64,
    current: f64,
}

impl SimulationParameter {
    /// Parameter over `[0, 1]` starting in the middle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: 0.0,
            max: 1.0,
            current: 0.5,
        }
    }

    /// Parameter over `[min, max]` starting in the middle.
    pub fn with_range(name: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        Self::with_current(name, min, max, (min + max) * 0.5)
    }

    pub fn with_current(name: impl Into<String>, min: f64, max: f64, current: f64) -> Result<Self> {
        if !(min <= max) {
            return Err(Error::configuration(format!(
                "parameter range is empty: min {min} > max {max}"
            )));
        }
        let mut param = Self {
            name: name.into(),
            min,
            max,
            current: min,
        };
        param.set_current(current)?;
        Ok(param)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Rejects values outside `[min, max]`; they are not clamped.
    pub fn set_current(&mut self, value: f64) -> Result<()> {
        if !(self.min..=self.max).contains(&value) {
            return Err(Error::configuration(format!(
                "{} must be within {}..={}, got {}",
                self.name, self.min, self.max, value
            )));
        }
        self.current = value;
        Ok(())
    }
}
