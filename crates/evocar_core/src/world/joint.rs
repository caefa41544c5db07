//! Joint definitions consumed by [`World::create_joint`](super::World::create_joint).
//!
//! Anchors and axes are given in world space at creation time and converted
//! to each body's local frame by the world.

use evocar_data::Vec2;

use super::BodyHandle;
use crate::error::{Result, SimError};

/// Velocity motor driving a joint's free axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motor {
    /// Target speed: rad/s for revolute joints, m/s for prismatic joints.
    pub speed: f32,
    /// Torque (revolute) or force (prismatic) cap.
    pub max_force: f32,
}

impl Motor {
    #[must_use]
    pub const fn new(speed: f32, max_force: f32) -> Self {
        Self { speed, max_force }
    }

    fn validate(&self) -> Result<()> {
        if self.speed.is_finite() && self.max_force.is_finite() && self.max_force >= 0.0 {
            Ok(())
        } else {
            Err(SimError::invalid_joint(format!(
                "motor needs finite speed and non-negative force, got {} / {}",
                self.speed, self.max_force
            )))
        }
    }
}

/// Hinge between two bodies about a shared world point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevoluteJointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub anchor: Vec2,
    pub motor: Option<Motor>,
}

impl RevoluteJointDef {
    #[must_use]
    pub const fn new(body_a: BodyHandle, body_b: BodyHandle, anchor: Vec2) -> Self {
        Self {
            body_a,
            body_b,
            anchor,
            motor: None,
        }
    }

    #[must_use]
    pub fn with_motor(mut self, speed: f32, max_torque: f32) -> Self {
        self.motor = Some(Motor::new(speed, max_torque));
        self
    }
}

/// Slider allowing translation of `body_b` relative to `body_a` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrismaticJointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub anchor: Vec2,
    pub axis: Vec2,
    /// `(lower, upper)` translation bounds.
    pub limits: Option<(f32, f32)>,
    pub motor: Option<Motor>,
}

impl PrismaticJointDef {
    #[must_use]
    pub const fn new(body_a: BodyHandle, body_b: BodyHandle, anchor: Vec2, axis: Vec2) -> Self {
        Self {
            body_a,
            body_b,
            anchor,
            axis,
            limits: None,
            motor: None,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, lower: f32, upper: f32) -> Self {
        self.limits = Some((lower, upper));
        self
    }

    #[must_use]
    pub fn with_motor(mut self, speed: f32, max_force: f32) -> Self {
        self.motor = Some(Motor::new(speed, max_force));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    Revolute,
    Prismatic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointDef {
    Revolute(RevoluteJointDef),
    Prismatic(PrismaticJointDef),
}

impl From<RevoluteJointDef> for JointDef {
    fn from(def: RevoluteJointDef) -> Self {
        Self::Revolute(def)
    }
}

impl From<PrismaticJointDef> for JointDef {
    fn from(def: PrismaticJointDef) -> Self {
        Self::Prismatic(def)
    }
}

impl JointDef {
    #[must_use]
    pub fn kind(&self) -> JointKind {
        match self {
            Self::Revolute(_) => JointKind::Revolute,
            Self::Prismatic(_) => JointKind::Prismatic,
        }
    }

    #[must_use]
    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        match self {
            Self::Revolute(def) => (def.body_a, def.body_b),
            Self::Prismatic(def) => (def.body_a, def.body_b),
        }
    }

    #[must_use]
    pub fn motor(&self) -> Option<Motor> {
        match self {
            Self::Revolute(def) => def.motor,
            Self::Prismatic(def) => def.motor,
        }
    }

    #[must_use]
    pub fn limits(&self) -> Option<(f32, f32)> {
        match self {
            Self::Revolute(_) => None,
            Self::Prismatic(def) => def.limits,
        }
    }

    /// Checks everything that does not need the world's body registry.
    pub fn validate(&self) -> Result<()> {
        let (a, b) = self.bodies();
        if a == b {
            return Err(SimError::invalid_joint("a joint must connect two distinct bodies"));
        }
        if let Some(motor) = self.motor() {
            motor.validate()?;
        }
        match self {
            Self::Revolute(def) => {
                if !def.anchor.is_finite() {
                    return Err(SimError::non_finite("revolute anchor"));
                }
            }
            Self::Prismatic(def) => {
                if !def.anchor.is_finite() || !def.axis.is_finite() {
                    return Err(SimError::non_finite("prismatic anchor or axis"));
                }
                if def.axis.length() <= f32::EPSILON {
                    return Err(SimError::invalid_joint("prismatic axis must be non-zero"));
                }
                if let Some((lower, upper)) = def.limits {
                    if !(lower.is_finite() && upper.is_finite() && lower <= upper) {
                        return Err(SimError::invalid_joint(format!(
                            "prismatic limits must be finite and ordered, got [{lower}, {upper}]"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
