//! # Evocar Data
//!
//! Engine-agnostic value types shared by the physics core and its callers:
//! plane geometry, material triples and the vehicle genome.

pub mod data;

pub use data::body::{BodyKind, Material};
pub use data::genome::{Genome, WheelGene};
pub use data::geometry::{Pose, Vec2};
