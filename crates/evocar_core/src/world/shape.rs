//! Body and fixture definitions consumed by [`World`](super::World).

use evocar_data::{BodyKind, Material, Pose, Vec2};
use rapier2d::na::Point2;
use rapier2d::prelude::*;

use crate::error::{Result, SimError};

/// Parameters of a new rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub pose: Pose,
}

impl BodyDef {
    #[must_use]
    pub const fn dynamic(pose: Pose) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            pose,
        }
    }

    #[must_use]
    pub const fn fixed(pose: Pose) -> Self {
        Self {
            kind: BodyKind::Static,
            pose,
        }
    }
}

/// Geometry of a fixture, in the owning body's local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDef {
    Triangle([Vec2; 3]),
    /// Convex polygon; the convex hull of the given points is used.
    Polygon(Vec<Vec2>),
    Box { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
    /// Open polyline, one-sided terrain.
    Chain(Vec<Vec2>),
}

/// Coarse shape family of a registered fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Polygon,
    Circle,
    Chain,
}

/// Unsigned area of a triangle.
#[must_use]
pub fn triangle_area(tri: &[Vec2; 3]) -> f32 {
    ((tri[1] - tri[0]).cross(tri[2] - tri[0]) * 0.5).abs()
}

fn to_point(v: Vec2) -> Point2<Real> {
    Point2::new(v.x, v.y)
}

fn check_finite(points: &[Vec2], what: &str) -> Result<()> {
    if points.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(SimError::non_finite(what))
    }
}

impl ShapeDef {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Triangle(_) | Self::Polygon(_) | Self::Box { .. } => ShapeKind::Polygon,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Chain(_) => ShapeKind::Chain,
        }
    }

    /// Rejects geometry the engine cannot take: non-finite coordinates,
    /// zero-area triangles, non-positive sizes and too-short point lists.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Triangle(tri) => {
                check_finite(tri, "triangle vertex")?;
                let area = triangle_area(tri);
                if area > 0.0 {
                    Ok(())
                } else {
                    Err(SimError::invalid_shape(format!(
                        "triangle has zero area ({area})"
                    )))
                }
            }
            Self::Polygon(points) => {
                check_finite(points, "polygon vertex")?;
                if points.len() < 3 {
                    return Err(SimError::invalid_shape(format!(
                        "polygon needs at least 3 points, got {}",
                        points.len()
                    )));
                }
                Ok(())
            }
            Self::Box {
                half_width,
                half_height,
            } => {
                if half_width.is_finite()
                    && half_height.is_finite()
                    && *half_width > 0.0
                    && *half_height > 0.0
                {
                    Ok(())
                } else {
                    Err(SimError::invalid_shape(format!(
                        "box half extents must be positive, got {half_width} x {half_height}"
                    )))
                }
            }
            Self::Circle { radius } => {
                if radius.is_finite() && *radius > 0.0 {
                    Ok(())
                } else {
                    Err(SimError::invalid_shape(format!(
                        "circle radius must be positive, got {radius}"
                    )))
                }
            }
            Self::Chain(points) => {
                check_finite(points, "chain point")?;
                if points.len() < 2 {
                    return Err(SimError::invalid_shape(format!(
                        "chain needs at least 2 points, got {}",
                        points.len()
                    )));
                }
                Ok(())
            }
        }
    }

    pub(crate) fn collider_builder(&self) -> Result<ColliderBuilder> {
        self.validate()?;
        let builder = match self {
            Self::Triangle([a, b, c]) => {
                ColliderBuilder::triangle(to_point(*a), to_point(*b), to_point(*c))
            }
            Self::Polygon(points) => {
                let points: Vec<Point2<Real>> = points.iter().copied().map(to_point).collect();
                ColliderBuilder::convex_hull(&points)
                    .ok_or_else(|| SimError::invalid_shape("polygon has no convex hull"))?
            }
            Self::Box {
                half_width,
                half_height,
            } => ColliderBuilder::cuboid(*half_width, *half_height),
            Self::Circle { radius } => ColliderBuilder::ball(*radius),
            Self::Chain(points) => {
                ColliderBuilder::polyline(points.iter().copied().map(to_point).collect(), None)
            }
        };
        Ok(builder)
    }
}

/// A shape plus its material and collision group.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDef {
    pub shape: ShapeDef,
    pub material: Material,
    /// Fixtures sharing a negative group never collide with each other.
    pub group: i32,
}

impl FixtureDef {
    #[must_use]
    pub fn new(shape: ShapeDef, material: Material, group: i32) -> Self {
        Self {
            shape,
            material,
            group,
        }
    }
}
