use std::cmp::Ordering;

use rand::{Rng, RngCore};

use crate::error::{Error, Result};
use crate::ring_buffer::{Boundary, CellField, GenerationStore};
use crate::settings::{MemFullBehavior, SimulationSettings};
use crate::simulation::parameter::SimulationParameter;
use crate::simulation::classic::ClassicRule;
use crate::simulation::fuzzy5::{Fuzzy5Rule, FuzzyConway};
use crate::simulation::rule::{CellValue, ParamSlot, Rule};
use crate::simulation::stats::LifeStats;

pub type ClassicSimulation = Simulation<ClassicRule>;
pub type Fuzzy5Simulation<T = FuzzyConway> = Simulation<Fuzzy5Rule<T>>;

/// A cellular automaton with a bounded, navigable history.
///
/// The newest generation in the ring is the *current* one: cell edits go
/// there, and [`advance`](Self::advance) derives the next generation from it.
pub struct Simulation<R: Rule> {
    rule: R,
    store: R::Store,
    settings: SimulationSettings,
    current_generation: u64,
    generations_computed: u64,
    life_stats: Option<LifeStats>,
}

impl<R: Rule> Simulation<R> {
    /// A simulation with a single all-dead generation numbered 0.
    pub fn new(rule: R, settings: SimulationSettings) -> Result<Self> {
        settings.validate()?;
        let store = R::Store::with_shape(settings.history_capacity, settings.width, settings.height)?;
        let life_stats = settings
            .track_life_stats
            .then(|| LifeStats::new(settings.life_stats_capacity, settings.life_stats_full_behavior));
        log::debug!(
            "New simulation {}x{} with {} history slots",
            settings.width,
            settings.height,
            settings.history_capacity
        );
        Ok(Self {
            rule,
            store,
            settings,
            current_generation: 0,
            generations_computed: 0,
            life_stats,
        })
    }

    /// Human-readable description of the rule.
    pub fn info(&self) -> &str {
        self.rule.info()
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn rule_mut(&mut self) -> &mut R {
        &mut self.rule
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// The history ring, oldest generation first.
    pub fn store(&self) -> &R::Store {
        &self.store
    }

    /// Number of the generation being viewed.
    pub fn current_generation(&self) -> u64 {
        self.current_generation
    }

    /// Number of the oldest generation still retained.
    pub fn oldest_generation(&self) -> u64 {
        self.current_generation
            .saturating_sub(self.store.len() as u64 - 1)
    }

    /// Generations retained, the current one included.
    pub fn num_generations(&self) -> usize {
        self.store.len()
    }

    /// Transitions computed over the lifetime of this simulation. Never decreases.
    pub fn generations_computed(&self) -> u64 {
        self.generations_computed
    }

    pub fn param1(&self) -> Option<&SimulationParameter> {
        self.rule.param(ParamSlot::First)
    }

    pub fn param2(&self) -> Option<&SimulationParameter> {
        self.rule.param(ParamSlot::Second)
    }

    /// Fails if the rule has no such parameter or `value` is out of its range.
    pub fn set_param(&mut self, slot: ParamSlot, value: f64) -> Result<()> {
        match self.rule.param_mut(slot) {
            Some(param) => param.set_current(value),
            None => Err(Error::configuration(format!("this rule has no {:?} parameter", slot))),
        }
    }

    /// Life intensity of a cell of the current generation, in `[0.0, 1.0]`.
    pub fn get_cell(&self, x: usize, y: usize) -> Result<f64> {
        let value = self.store.newest().get(x, y)?;
        Ok(self.rule.to_intensity(value))
    }

    /// Sets a cell of the current generation. Intensities outside
    /// `[0.0, 1.0]` are clamped; NaN counts as dead.
    pub fn set_cell(&mut self, x: usize, y: usize, intensity: f64) -> Result<()> {
        let value = self.rule.quantize(normalize(intensity));
        self.store.newest_mut().set(x, y, value)
    }

    /// Sum of the intensities of the current generation.
    pub fn life_sum(&self) -> Result<f64> {
        self.rule.life_sum(self.store.newest())
    }

    /// Per-generation life sums, if tracking is enabled.
    pub fn life_stats(&self) -> Option<&LifeStats> {
        self.life_stats.as_ref()
    }

    /// Kills every cell of the current generation.
    pub fn clear(&mut self) {
        let dead = self.rule.quantize(0.0);
        self.store.newest_mut().fill(dead);
    }

    /// Makes every cell of the current generation fully alive.
    pub fn fill(&mut self) {
        let alive = self.rule.quantize(1.0);
        self.store.newest_mut().fill(alive);
    }

    /// Sets each cell of the current generation fully alive with probability
    /// `density`, dead otherwise.
    pub fn randomize<G: Rng + ?Sized>(&mut self, rng: &mut G, density: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::configuration(format!(
                "density must be within 0..=1, got {density}"
            )));
        }
        let alive = self.rule.quantize(1.0);
        let dead = self.rule.quantize(0.0);
        let field = self.store.newest_mut();
        for y in 0..field.height() {
            for x in 0..field.width() {
                field.set(x, y, if rng.gen_bool(density) { alive } else { dead })?;
            }
        }
        Ok(())
    }

    /// Computes the next generation.
    ///
    /// Returns `Ok(false)` without side effects when the history is full and
    /// its policy is `StopSilently`. Fails with `ResourceExhausted` when a
    /// full store's policy is `ThrowOnFull`; nothing is changed in that case.
    pub fn advance(&mut self) -> Result<bool> {
        if self.store.is_full() {
            match self.settings.history_full_behavior {
                MemFullBehavior::ForgetSilently => {
                    log::trace!("History full, forgetting generation {}", self.oldest_generation());
                }
                MemFullBehavior::StopSilently => {
                    log::debug!("History full, not advancing past generation {}", self.current_generation);
                    return Ok(false);
                }
                MemFullBehavior::ThrowOnFull => {
                    return Err(Error::ResourceExhausted("no free history slot for a new generation"));
                }
            }
        }
        if let Some(stats) = &self.life_stats {
            stats.check_room()?;
        }

        let boundary = self.boundary();
        self.store.append_generation(false);
        let (previous, next) = self.store.previous_and_newest_mut()?;
        self.rule.step(previous, next, boundary)?;
        self.current_generation += 1;
        self.generations_computed += 1;

        if self.life_stats.is_some() {
            let sum = self.rule.life_sum(self.store.newest())?;
            if let Some(stats) = self.life_stats.as_mut() {
                stats.record(self.current_generation, sum)?;
            }
        }
        log::trace!("Computed generation {}", self.current_generation);
        Ok(true)
    }

    /// Steps the view back one generation. False if only one is retained.
    pub fn rewind_one(&mut self) -> bool {
        if !self.store.remove_generation() {
            return false;
        }
        self.current_generation -= 1;
        self.drop_stats_after_current();
        true
    }

    /// Moves to generation `target`.
    ///
    /// Older targets must still be retained, otherwise nothing changes and
    /// `Ok(false)` is returned. Newer targets are computed one generation at a
    /// time; if the history policy stops that early, the view stays at the
    /// last generation reached and `Ok(false)` is returned.
    pub fn go_to_generation(&mut self, target: u64) -> Result<bool> {
        match target.cmp(&self.current_generation) {
            Ordering::Equal => Ok(true),
            Ordering::Less => {
                let back = usize::try_from(self.current_generation - target).unwrap_or(usize::MAX);
                if back >= self.store.len() {
                    log::debug!(
                        "Generation {} is no longer retained (oldest is {})",
                        target,
                        self.oldest_generation()
                    );
                    return Ok(false);
                }
                self.store.remove_generations(back);
                self.current_generation = target;
                self.drop_stats_after_current();
                Ok(true)
            }
            Ordering::Greater => {
                for _ in self.current_generation..target {
                    if !self.advance()? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// Discards every generation newer than the oldest retained one.
    pub fn go_to_oldest(&mut self) {
        let dropped = self.store.len() - 1;
        self.store.reset_to_oldest();
        self.current_generation -= dropped as u64;
        self.drop_stats_after_current();
    }

    /// Discards every generation older than the current one.
    /// The generation number is kept.
    pub fn relabel_current_as_zero(&mut self) {
        self.store.reset_to_newest();
    }

    /// Releases storage of history slots outside the retained range.
    pub fn free_unused_memory(&mut self) -> usize {
        self.store.free_unused_memory()
    }

    /// Replaces the settings and reconciles history and statistics with them.
    ///
    /// A new shape rebuilds the ring, keeping the newest generations that fit
    /// and the overlapping top-left rectangle of each; new cells start dead.
    pub fn apply_settings(&mut self, settings: SimulationSettings) -> Result<()> {
        settings.validate()?;
        if self.settings.shape_differs(&settings) {
            let fill: CellValue<R> = self.rule.quantize(0.0);
            self.store = R::Store::resized_from(
                settings.history_capacity,
                settings.width,
                settings.height,
                &self.store,
                fill,
            )?;
        }
        match (settings.track_life_stats, self.life_stats.as_mut()) {
            (true, Some(stats)) => {
                stats.reconfigure(settings.life_stats_capacity, settings.life_stats_full_behavior)
            }
            (true, None) => {
                self.life_stats = Some(LifeStats::new(
                    settings.life_stats_capacity,
                    settings.life_stats_full_behavior,
                ))
            }
            (false, _) => self.life_stats = None,
        }
        log::debug!("Applied settings {:?}", settings);
        self.settings = settings;
        Ok(())
    }

    fn boundary(&self) -> Boundary<CellValue<R>> {
        if self.settings.wrap {
            Boundary::Wrap
        } else {
            Boundary::Fixed(self.rule.outside_value())
        }
    }

    fn drop_stats_after_current(&mut self) {
        if let Some(stats) = self.life_stats.as_mut() {
            stats.drop_after(self.current_generation);
        }
    }
}

/// Object-safe view of a [`Simulation`], for front ends that pick the rule at runtime.
pub trait CellSimulation {
    fn info(&self) -> &str;
    fn settings(&self) -> &SimulationSettings;
    fn apply_settings(&mut self, settings: SimulationSettings) -> Result<()>;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn current_generation(&self) -> u64;
    fn oldest_generation(&self) -> u64;
    fn num_generations(&self) -> usize;
    fn param1(&self) -> Option<&SimulationParameter>;
    fn param2(&self) -> Option<&SimulationParameter>;
    fn set_param(&mut self, slot: ParamSlot, value: f64) -> Result<()>;
    fn get_cell(&self, x: usize, y: usize) -> Result<f64>;
    fn set_cell(&mut self, x: usize, y: usize, intensity: f64) -> Result<()>;
    fn life_sum(&self) -> Result<f64>;
    fn life_stats(&self) -> Option<&LifeStats>;
    fn advance(&mut self) -> Result<bool>;
    fn rewind_one(&mut self) -> bool;
    fn go_to_generation(&mut self, target: u64) -> Result<bool>;
    fn go_to_oldest(&mut self);
    fn relabel_current_as_zero(&mut self);
    fn free_unused_memory(&mut self) -> usize;
    fn clear(&mut self);
    fn fill(&mut self);
    fn randomize(&mut self, rng: &mut dyn RngCore, density: f64) -> Result<()>;
}

impl<R: Rule> CellSimulation for Simulation<R> {
    fn info(&self) -> &str {
        Simulation::info(self)
    }

    fn settings(&self) -> &SimulationSettings {
        Simulation::settings(self)
    }

    fn apply_settings(&mut self, settings: SimulationSettings) -> Result<()> {
        Simulation::apply_settings(self, settings)
    }

    fn width(&self) -> usize {
        self.store.width()
    }

    fn height(&self) -> usize {
        self.store.height()
    }

    fn current_generation(&self) -> u64 {
        Simulation::current_generation(self)
    }

    fn oldest_generation(&self) -> u64 {
        Simulation::oldest_generation(self)
    }

    fn num_generations(&self) -> usize {
        Simulation::num_generations(self)
    }

    fn param1(&self) -> Option<&SimulationParameter> {
        Simulation::param1(self)
    }

    fn param2(&self) -> Option<&SimulationParameter> {
        Simulation::param2(self)
    }

    fn set_param(&mut self, slot: ParamSlot, value: f64) -> Result<()> {
        Simulation::set_param(self, slot, value)
    }

    fn get_cell(&self, x: usize, y: usize) -> Result<f64> {
        Simulation::get_cell(self, x, y)
    }

    fn set_cell(&mut self, x: usize, y: usize, intensity: f64) -> Result<()> {
        Simulation::set_cell(self, x, y, intensity)
    }

    fn life_sum(&self) -> Result<f64> {
        Simulation::life_sum(self)
    }

    fn life_stats(&self) -> Option<&LifeStats> {
        Simulation::life_stats(self)
    }

    fn advance(&mut self) -> Result<bool> {
        Simulation::advance(self)
    }

    fn rewind_one(&mut self) -> bool {
        Simulation::rewind_one(self)
    }

    fn go_to_generation(&mut self, target: u64) -> Result<bool> {
        Simulation::go_to_generation(self, target)
    }

    fn go_to_oldest(&mut self) {
        Simulation::go_to_oldest(self)
    }

    fn relabel_current_as_zero(&mut self) {
        Simulation::relabel_current_as_zero(self)
    }

    fn free_unused_memory(&mut self) -> usize {
        Simulation::free_unused_memory(self)
    }

    fn clear(&mut self) {
        Simulation::clear(self)
    }

    fn fill(&mut self) {
        Simulation::fill(self)
    }

    fn randomize(&mut self, rng: &mut dyn RngCore, density: f64) -> Result<()> {
        Simulation::randomize(self, rng, density)
    }
}

/// Clamps to `[0.0, 1.0]`, NaN becomes `0.0`.
fn normalize(intensity: f64) -> f64 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}
