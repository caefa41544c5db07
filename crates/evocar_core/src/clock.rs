//! Fixed-step simulation clock.

use crate::config::StepParams;
use crate::error::{Result, SimError};
use crate::world::World;

/// Drives [`World::step`] with one constant set of [`StepParams`].
///
/// The parameters are fixed at construction; there is no way to change them
/// afterwards, so every tick of a run uses the same `dt` and iteration counts.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    params: StepParams,
    ticks: u64,
}

impl SimulationClock {
    pub fn new(params: StepParams) -> Result<Self> {
        params
            .validate()
            .map_err(|e| SimError::invalid_step(e.to_string()))?;
        Ok(Self { params, ticks: 0 })
    }

    #[must_use]
    pub fn params(&self) -> StepParams {
        self.params
    }

    /// Advances `world` by one tick.
    pub fn advance(&mut self, world: &mut World) -> Result<()> {
        world.step(&self.params)?;
        self.ticks += 1;
        Ok(())
    }

    /// Advances `world` by `ticks` ticks, stopping at the first error.
    pub fn advance_by(&mut self, world: &mut World, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.advance(world)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds, computed from the tick count.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * f64::from(self.params.dt)
    }
}
