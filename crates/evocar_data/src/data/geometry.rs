use serde::{Deserialize, Serialize};

/// A point or direction in the simulation plane (metres).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Rotates the vector counter-clockwise by `angle` radians.
    #[must_use]
    pub fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Z component of the cross product `self × other`.
    #[must_use]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Position and orientation of a rigid body in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    /// Counter-clockwise rotation in radians.
    pub angle: f32,
}

impl Pose {
    #[must_use]
    pub const fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            angle,
        }
    }

    /// An unrotated pose at `(x, y)`.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.angle.is_finite()
    }

    /// Maps a point from this pose's local frame into world space.
    #[must_use]
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        self.position + local.rotated(self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotated(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_point_without_rotation_is_translation() {
        let pose = Pose::at(-80.0, 4.0);
        assert_eq!(
            pose.transform_point(Vec2::new(2.5, -1.0)),
            Vec2::new(-77.5, 3.0)
        );
    }

    #[test]
    fn test_cross_sign_follows_winding() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        assert!(a.cross(b) > 0.0);
        assert!(b.cross(a) < 0.0);
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(!Vec2::new(f32::NAN, 0.0).is_finite());
        assert!(!Pose::new(0.0, 0.0, f32::INFINITY).is_finite());
        assert!(Pose::at(1.0, 2.0).is_finite());
    }
}
