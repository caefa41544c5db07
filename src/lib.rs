//! Evocar: a deterministic 2D physics world for scoring evolved vehicles.
//!
//! The simulation itself lives in [`evocar_core`]; plain data shared with a
//! search loop lives in [`evocar_data`]. This crate re-exports both and adds
//! the helpers the command-line runner uses.

pub use evocar_core as core;
pub use evocar_data as data;

pub mod demo;

pub mod prelude {
    pub use evocar_core::{
        BodyHandle, FixtureHandle, JointHandle, SimConfig, SimError, Simulation, Vehicle,
    };
    pub use evocar_data::{Genome, Pose, Vec2, WheelGene};
}
