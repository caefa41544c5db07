//! The single owning context for one evaluation world.
//!
//! A [`Simulation`] owns the [`World`], installs the track once, and keeps at
//! most one vehicle alive at a time:
//!
//! ```text
//! absent --build_vehicle--> active --destroy_vehicle--> absent
//! ```

use std::time::Instant;

use evocar_data::{Genome, Pose};

use crate::clock::SimulationClock;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::metrics::Metrics;
use crate::track::Track;
use crate::vehicle::{Vehicle, VehicleBuilder};
use crate::world::{BodyHandle, World};

pub struct Simulation {
    config: SimConfig,
    world: World,
    track: Track,
    builder: VehicleBuilder,
    clock: SimulationClock,
    vehicle: Option<Vehicle>,
    metrics: Metrics,
}

impl Simulation {
    /// Validates `config`, creates the world and installs the track.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let mut world = World::new(config.world.gravity());
        let track = Track::install(&mut world, &config.track)?;
        let clock = SimulationClock::new(config.step)?;
        let builder = VehicleBuilder::new(config.vehicle.clone());
        let metrics = Metrics::new(config.metrics.log_interval);

        Ok(Self {
            config,
            world,
            track,
            builder,
            clock,
            vehicle: None,
            metrics,
        })
    }

    /// Builds `genome` with its chassis at `spawn`.
    ///
    /// Fails without touching the world if a vehicle is already active or
    /// the genome is invalid. The returned handles stay valid until the next
    /// [`destroy_vehicle`](Self::destroy_vehicle).
    pub fn build_vehicle(&mut self, genome: &Genome, spawn: Pose) -> Result<Vehicle> {
        if self.vehicle.is_some() {
            tracing::warn!("Build requested while a vehicle is active");
            self.metrics.record_rejection();
            return Err(SimError::VehicleAlreadyActive);
        }
        let vehicle = match self.builder.build(&mut self.world, genome, spawn) {
            Ok(vehicle) => vehicle,
            Err(err) => {
                self.metrics.record_rejection();
                return Err(err);
            }
        };
        self.metrics.record_build();
        self.vehicle = Some(vehicle.clone());
        Ok(vehicle)
    }

    /// Removes the active vehicle with all of its fixtures and joints.
    ///
    /// Returns `false` (and does nothing) when no vehicle is active.
    pub fn destroy_vehicle(&mut self) -> bool {
        let Some(vehicle) = self.vehicle.take() else {
            return false;
        };
        let removed = self.world.destroy_assembly(vehicle.chassis);
        self.metrics.record_destroy();
        tracing::info!(
            bodies = removed,
            ticks = self.clock.ticks(),
            "Vehicle destroyed"
        );
        true
    }

    /// Advances the world by one fixed tick.
    pub fn step(&mut self) -> Result<()> {
        let start = Instant::now();
        self.clock.advance(&mut self.world)?;
        self.metrics.record_tick(
            start.elapsed(),
            self.world.body_count(),
            self.world.contacts().len(),
        );
        Ok(())
    }

    /// Advances the world by `ticks` fixed ticks.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    #[must_use]
    pub fn has_vehicle(&self) -> bool {
        self.vehicle.is_some()
    }

    #[must_use]
    pub fn body_pose(&self, body: BodyHandle) -> Option<Pose> {
        self.world.body_pose(body)
    }

    /// Horizontal distance travelled by the active chassis since spawn.
    #[must_use]
    pub fn chassis_displacement(&self) -> Option<f32> {
        let vehicle = self.vehicle.as_ref()?;
        let pose = self.world.body_pose(vehicle.chassis)?;
        Some(pose.position.x - vehicle.spawn().position.x)
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
