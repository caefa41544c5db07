//! Error types for the physics core.
//!
//! Every precondition the world, track generator and vehicle builder check
//! before touching engine state maps to one variant here.

use thiserror::Error;

/// Main error type for evocar_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Chassis polygon has fewer than three corners
    #[error("genome needs at least {min} chassis vertices, got {actual}")]
    TooFewVertices { min: usize, actual: usize },

    /// Genome carries no wheels
    #[error("genome needs at least one wheel")]
    NoWheels,

    /// A fan triangle has (near) zero area
    #[error("chassis triangle {index} is degenerate (area {area})")]
    DegenerateTriangle { index: usize, area: f32 },

    /// Wheel radius is zero, negative or not finite
    #[error("wheel {index} has invalid radius {radius}")]
    InvalidWheelRadius { index: usize, radius: f32 },

    /// A coordinate in the input is NaN or infinite
    #[error("non-finite coordinate in {0}")]
    NonFinite(String),

    /// Terrain needs at least two points to form a chain
    #[error("track needs at least 2 points, got {0}")]
    TooFewTrackPoints(usize),

    /// Attached prefix is longer than the generated profile
    #[error("track prefix of {used} points exceeds the {generated} generated")]
    TrackPrefixTooLong { used: usize, generated: usize },

    /// Second build without an intervening destroy
    #[error("a vehicle is already active; destroy it before building another")]
    VehicleAlreadyActive,

    /// Handle does not refer to a live body
    #[error("unknown body handle")]
    UnknownBody,

    /// Shape rejected before reaching the engine
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Material triple has a negative or non-finite component
    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    /// Joint definition rejected before reaching the engine
    #[error("invalid joint: {0}")]
    InvalidJoint(String),

    /// dt or iteration counts unusable
    #[error("invalid step parameters: {0}")]
    InvalidStep(String),

    /// Step called with parameters different from the first step
    #[error("step parameters changed mid-run: {0}")]
    StepParamsChanged(String),

    /// Configuration rejected
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for evocar_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new non-finite coordinate error.
    #[must_use]
    pub fn non_finite<S: Into<String>>(what: S) -> Self {
        Self::NonFinite(what.into())
    }

    /// Creates a new invalid shape error.
    #[must_use]
    pub fn invalid_shape<S: Into<String>>(msg: S) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// Creates a new invalid joint error.
    #[must_use]
    pub fn invalid_joint<S: Into<String>>(msg: S) -> Self {
        Self::InvalidJoint(msg.into())
    }

    /// Creates a new invalid step error.
    #[must_use]
    pub fn invalid_step<S: Into<String>>(msg: S) -> Self {
        Self::InvalidStep(msg.into())
    }

    /// True for errors caused by a malformed genome.
    #[must_use]
    pub fn is_genome_error(&self) -> bool {
        matches!(
            self,
            Self::TooFewVertices { .. }
                | Self::NoWheels
                | Self::DegenerateTriangle { .. }
                | Self::InvalidWheelRadius { .. }
                | Self::NonFinite(_)
        )
    }
}

impl From<anyhow::Error> for SimError {
    fn from(err: anyhow::Error) -> Self {
        Self::Config(err.to_string())
    }
}
