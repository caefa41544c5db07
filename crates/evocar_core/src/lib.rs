//! # Evocar Core
//!
//! The physics world used to score evolved 2D vehicles.
//!
//! This crate contains:
//! - A rigid-body [`World`] with handle-based bodies, fixtures and joints
//! - The seeded, deterministic [`Track`] generator
//! - The genome to articulated vehicle [`VehicleBuilder`]
//! - A fixed-step [`SimulationClock`]
//! - The [`Simulation`] context that enforces one live vehicle at a time
//! - Metrics collection and structured logging
//!
//! ## Example
//!
//! ```
//! use evocar_core::{SimConfig, Simulation};
//! use evocar_data::{Genome, Pose, Vec2, WheelGene};
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! let genome = Genome::regular(
//!     8,
//!     4.0,
//!     vec![WheelGene::new(Vec2::new(3.0, -2.0), 1.5)],
//! );
//! sim.build_vehicle(&genome, Pose::at(-80.0, 8.0)).unwrap();
//! sim.run(60).unwrap();
//! assert!(sim.chassis_displacement().is_some());
//! assert!(sim.destroy_vehicle());
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod simulation;
pub mod track;
pub mod vehicle;
pub mod world;

pub use clock::SimulationClock;
pub use config::{MetricsConfig, SimConfig, StepParams, TrackConfig, VehicleConfig, WorldConfig};
pub use error::{Result, SimError};
pub use metrics::{init_logging, Metrics};
pub use simulation::Simulation;
pub use track::{Track, TrackProfile};
pub use vehicle::{Vehicle, VehicleBuilder};
pub use world::{BodyHandle, ContactEvent, FixtureHandle, JointHandle, World};
