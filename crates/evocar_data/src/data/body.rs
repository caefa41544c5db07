use serde::{Deserialize, Serialize};

/// Whether a body is moved by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Immovable geometry such as the track.
    Static,
    /// Integrated every tick under gravity, contacts and joints.
    #[default]
    Dynamic,
}

/// Material triple attached to every fixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Material {
    #[must_use]
    pub const fn new(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            density,
            friction,
            restitution,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.density.is_finite()
            && self.density >= 0.0
            && self.friction.is_finite()
            && self.friction >= 0.0
            && self.restitution.is_finite()
            && self.restitution >= 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(1.0, 0.3, 0.3)
    }
}
