//! Genome-to-vehicle assembly.
//!
//! A vehicle is one chassis body carrying one triangle fixture per genome
//! vertex, plus an axle body and a wheel body per wheel gene. Each wheel is
//! driven by a motorized revolute joint to its axle; each axle slides on a
//! limited prismatic joint against the chassis.
//!
//! All geometry in the genome is in the chassis frame: the fan centre is the
//! chassis origin and a wheel sits at `spawn.transform_point(offset)`.

use evocar_data::{Genome, Pose, Vec2};

use crate::config::VehicleConfig;
use crate::error::{Result, SimError};
use crate::world::{
    triangle_area, BodyDef, BodyHandle, FixtureDef, FixtureHandle, JointHandle, PrismaticJointDef,
    RevoluteJointDef, ShapeDef, World,
};

const MIN_VERTICES: usize = 3;

/// Handle table of a vehicle built into a [`World`].
///
/// Every handle is invalidated when the vehicle is destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub chassis: BodyHandle,
    /// Wheel bodies in genome order.
    pub wheels: Vec<BodyHandle>,
    axles: Vec<BodyHandle>,
    chassis_fixtures: Vec<FixtureHandle>,
    drive_joints: Vec<JointHandle>,
    suspension_joints: Vec<JointHandle>,
    spawn: Pose,
}

impl Vehicle {
    /// Axle bodies, parallel to [`wheels`](Self::wheels).
    #[must_use]
    pub fn axles(&self) -> &[BodyHandle] {
        &self.axles
    }

    #[must_use]
    pub fn chassis_fixtures(&self) -> &[FixtureHandle] {
        &self.chassis_fixtures
    }

    /// Wheel-to-axle motor joints, parallel to [`wheels`](Self::wheels).
    #[must_use]
    pub fn drive_joints(&self) -> &[JointHandle] {
        &self.drive_joints
    }

    /// Axle-to-chassis suspension joints, parallel to [`wheels`](Self::wheels).
    #[must_use]
    pub fn suspension_joints(&self) -> &[JointHandle] {
        &self.suspension_joints
    }

    #[must_use]
    pub fn spawn(&self) -> Pose {
        self.spawn
    }

    /// Chassis, axles and wheels.
    #[must_use]
    pub fn body_count(&self) -> usize {
        1 + self.axles.len() + self.wheels.len()
    }

    /// Every body of the vehicle, chassis first.
    pub fn bodies(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        std::iter::once(self.chassis)
            .chain(self.axles.iter().copied())
            .chain(self.wheels.iter().copied())
    }
}

/// Turns genomes into articulated vehicles.
#[derive(Debug, Clone, Default)]
pub struct VehicleBuilder {
    config: VehicleConfig,
}

impl VehicleBuilder {
    #[must_use]
    pub fn new(config: VehicleConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Checks every precondition of [`build`](Self::build) without touching a world.
    pub fn validate(&self, genome: &Genome, spawn: Pose) -> Result<()> {
        if !spawn.is_finite() {
            return Err(SimError::non_finite("spawn pose"));
        }
        if genome.vertex_count() < MIN_VERTICES {
            return Err(SimError::TooFewVertices {
                min: MIN_VERTICES,
                actual: genome.vertex_count(),
            });
        }
        if genome.wheels.is_empty() {
            return Err(SimError::NoWheels);
        }
        if let Some(index) = genome.vertices.iter().position(|v| !v.is_finite()) {
            return Err(SimError::non_finite(format!("chassis vertex {index}")));
        }
        for (index, tri) in genome.chassis_triangles(Vec2::ZERO).enumerate() {
            let area = triangle_area(&tri);
            if area <= self.config.min_triangle_area || area <= 0.0 {
                return Err(SimError::DegenerateTriangle { index, area });
            }
        }
        for (index, wheel) in genome.wheels.iter().enumerate() {
            if !wheel.offset.is_finite() {
                return Err(SimError::non_finite(format!("wheel {index} offset")));
            }
            if !(wheel.radius.is_finite() && wheel.radius > 0.0) {
                return Err(SimError::InvalidWheelRadius {
                    index,
                    radius: wheel.radius,
                });
            }
        }
        Ok(())
    }

    /// Builds `genome` into `world` with the chassis at `spawn`.
    ///
    /// On error nothing built by this call remains in the world.
    pub fn build(&self, world: &mut World, genome: &Genome, spawn: Pose) -> Result<Vehicle> {
        if let Err(err) = self.validate(genome, spawn) {
            tracing::warn!(error = %err, "Genome rejected");
            return Err(err);
        }

        let mut created = Vec::with_capacity(1 + 2 * genome.wheel_count());
        match self.assemble(world, genome, spawn, &mut created) {
            Ok(vehicle) => {
                tracing::debug!(
                    vertices = genome.vertex_count(),
                    wheels = genome.wheel_count(),
                    x = spawn.position.x,
                    y = spawn.position.y,
                    "Vehicle built"
                );
                Ok(vehicle)
            }
            Err(err) => {
                for body in created {
                    world.destroy_body(body);
                }
                tracing::warn!(error = %err, "Vehicle assembly rolled back");
                Err(err)
            }
        }
    }

    fn assemble(
        &self,
        world: &mut World,
        genome: &Genome,
        spawn: Pose,
        created: &mut Vec<BodyHandle>,
    ) -> Result<Vehicle> {
        let cfg = &self.config;
        let group = cfg.collision_group;

        let chassis = world.create_body(&BodyDef::dynamic(spawn))?;
        created.push(chassis);

        let chassis_fixtures = genome
            .chassis_triangles(Vec2::ZERO)
            .map(|tri| {
                world.create_fixture(
                    chassis,
                    &FixtureDef::new(ShapeDef::Triangle(tri), cfg.chassis_material, group),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let axle_shape = ShapeDef::Box {
            half_width: cfg.axle_half_extents.x,
            half_height: cfg.axle_half_extents.y,
        };
        let suspension_axis = cfg.suspension_axis.rotated(spawn.angle);

        let mut vehicle = Vehicle {
            chassis,
            wheels: Vec::with_capacity(genome.wheel_count()),
            axles: Vec::with_capacity(genome.wheel_count()),
            chassis_fixtures,
            drive_joints: Vec::with_capacity(genome.wheel_count()),
            suspension_joints: Vec::with_capacity(genome.wheel_count()),
            spawn,
        };

        for gene in &genome.wheels {
            let center = spawn.transform_point(gene.offset);
            let pose = Pose::new(center.x, center.y, spawn.angle);

            let axle = world.create_body(&BodyDef::dynamic(pose))?;
            created.push(axle);
            world.create_fixture(
                axle,
                &FixtureDef::new(axle_shape.clone(), cfg.axle_material, group),
            )?;

            let wheel = world.create_body(&BodyDef::dynamic(pose))?;
            created.push(wheel);
            world.create_fixture(
                wheel,
                &FixtureDef::new(
                    ShapeDef::Circle {
                        radius: gene.radius,
                    },
                    cfg.wheel_material,
                    group,
                ),
            )?;

            let drive = world.create_joint(
                &RevoluteJointDef::new(wheel, axle, center)
                    .with_motor(cfg.drive_speed, cfg.drive_max_torque)
                    .into(),
            )?;
            let suspension = world.create_joint(
                &PrismaticJointDef::new(chassis, axle, center, suspension_axis)
                    .with_limits(cfg.suspension_lower, cfg.suspension_upper)
                    .with_motor(cfg.suspension_motor_speed, cfg.suspension_motor_max_force)
                    .into(),
            )?;

            vehicle.axles.push(axle);
            vehicle.wheels.push(wheel);
            vehicle.drive_joints.push(drive);
            vehicle.suspension_joints.push(suspension);
        }

        Ok(vehicle)
    }
}
