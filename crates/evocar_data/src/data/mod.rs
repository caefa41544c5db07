//! Core data structures for the Evocar simulation.

pub mod body;
pub mod genome;
pub mod geometry;
