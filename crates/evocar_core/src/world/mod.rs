//! Physics world: owns every body, fixture and joint of a simulation.
//!
//! Wraps the rapier2d pipeline and keeps a registry on top of it so callers
//! can address parts through opaque handles, count them by kind and tear
//! down whole articulated assemblies in one call.

mod filter;
mod joint;
mod shape;

use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroUsize;

use evocar_data::{BodyKind, Pose, Vec2};
use rapier2d::na::{Point2, Unit, Vector2};
use rapier2d::prelude::*;

use crate::config::StepParams;
use crate::error::{Result, SimError};
use filter::{encode_group, ContactCollector, GroupFilter};

pub use filter::groups_collide;
pub use joint::{JointDef, JointKind, Motor, PrismaticJointDef, RevoluteJointDef};
pub use shape::{triangle_area, BodyDef, FixtureDef, ShapeDef, ShapeKind};

/// Velocity gain of joint motors; the torque cap is what limits them.
const MOTOR_GAIN: Real = 1.0;

/// Handle to a rigid body. Invalid once the body is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// Handle to a fixture (collider attached to a body).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureHandle(ColliderHandle);

/// Handle to a joint between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointHandle(ImpulseJointHandle);

/// A contact starting or stopping between two fixtures during the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub fixture_a: FixtureHandle,
    pub fixture_b: FixtureHandle,
    /// `true` when the contact just started, `false` when it ended.
    pub started: bool,
}

#[derive(Debug, Clone)]
struct BodyRecord {
    kind: BodyKind,
    fixtures: Vec<FixtureHandle>,
    joints: Vec<JointHandle>,
}

#[derive(Debug, Clone, Copy)]
struct FixtureRecord {
    body: BodyHandle,
    shape: ShapeKind,
    group: i32,
}

#[derive(Debug, Clone, Copy)]
struct JointRecord {
    kind: JointKind,
    body_a: BodyHandle,
    body_b: BodyHandle,
    motor: Option<Motor>,
    limits: Option<(f32, f32)>,
}

pub struct World {
    gravity: Vector2<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    hooks: GroupFilter,
    collector: ContactCollector,

    body_records: HashMap<BodyHandle, BodyRecord>,
    /// Live bodies in creation order.
    body_order: Vec<BodyHandle>,
    fixture_records: HashMap<FixtureHandle, FixtureRecord>,
    joint_records: HashMap<JointHandle, JointRecord>,

    latched_step: Option<StepParams>,
    tick: u64,
    contacts: Vec<ContactEvent>,
}

fn to_local(pose: &Pose, world_point: Vec2) -> Vec2 {
    (world_point - pose.position).rotated(-pose.angle)
}

impl World {
    #[must_use]
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: Vector2::new(gravity.x, gravity.y),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            hooks: GroupFilter,
            collector: ContactCollector::new(),
            body_records: HashMap::new(),
            body_order: Vec::new(),
            fixture_records: HashMap::new(),
            joint_records: HashMap::new(),
            latched_step: None,
            tick: 0,
            contacts: Vec::new(),
        }
    }

    #[must_use]
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    // -- Creation --

    pub fn create_body(&mut self, def: &BodyDef) -> Result<BodyHandle> {
        if !def.pose.is_finite() {
            return Err(SimError::non_finite("body pose"));
        }
        let body_type = match def.kind {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        };
        let rb = RigidBodyBuilder::new(body_type)
            .translation(Vector2::new(def.pose.position.x, def.pose.position.y))
            .rotation(def.pose.angle)
            .build();

        let handle = BodyHandle(self.bodies.insert(rb));
        self.body_records.insert(
            handle,
            BodyRecord {
                kind: def.kind,
                fixtures: Vec::new(),
                joints: Vec::new(),
            },
        );
        self.body_order.push(handle);
        Ok(handle)
    }

    pub fn create_fixture(&mut self, body: BodyHandle, def: &FixtureDef) -> Result<FixtureHandle> {
        if !self.body_records.contains_key(&body) {
            return Err(SimError::UnknownBody);
        }
        if !def.material.is_valid() {
            return Err(SimError::InvalidMaterial(format!("{:?}", def.material)));
        }
        let collider = def
            .shape
            .collider_builder()?
            .density(def.material.density)
            .friction(def.material.friction)
            .restitution(def.material.restitution)
            .user_data(encode_group(def.group))
            .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let handle = FixtureHandle(self.colliders.insert_with_parent(
            collider,
            body.0,
            &mut self.bodies,
        ));
        self.fixture_records.insert(
            handle,
            FixtureRecord {
                body,
                shape: def.shape.kind(),
                group: def.group,
            },
        );
        if let Some(record) = self.body_records.get_mut(&body) {
            record.fixtures.push(handle);
        }
        Ok(handle)
    }

    /// Creates a joint from a world-space definition.
    pub fn create_joint(&mut self, def: &JointDef) -> Result<JointHandle> {
        def.validate()?;
        let (a, b) = def.bodies();
        let pose_a = self.body_pose(a).ok_or(SimError::UnknownBody)?;
        let pose_b = self.body_pose(b).ok_or(SimError::UnknownBody)?;

        let joint: GenericJoint = match def {
            JointDef::Revolute(def) => {
                let anchor1 = to_local(&pose_a, def.anchor);
                let anchor2 = to_local(&pose_b, def.anchor);
                let mut builder = RevoluteJointBuilder::new()
                    .local_anchor1(Point2::new(anchor1.x, anchor1.y))
                    .local_anchor2(Point2::new(anchor2.x, anchor2.y));
                if let Some(motor) = def.motor {
                    builder = builder
                        .motor_velocity(motor.speed, MOTOR_GAIN)
                        .motor_max_force(motor.max_force);
                }
                builder.build().into()
            }
            JointDef::Prismatic(def) => {
                let anchor1 = to_local(&pose_a, def.anchor);
                let anchor2 = to_local(&pose_b, def.anchor);
                let axis1 = def.axis.rotated(-pose_a.angle);
                let axis2 = def.axis.rotated(-pose_b.angle);
                let mut builder =
                    PrismaticJointBuilder::new(Unit::new_normalize(Vector2::new(axis1.x, axis1.y)))
                        .local_axis2(Unit::new_normalize(Vector2::new(axis2.x, axis2.y)))
                        .local_anchor1(Point2::new(anchor1.x, anchor1.y))
                        .local_anchor2(Point2::new(anchor2.x, anchor2.y));
                if let Some((lower, upper)) = def.limits {
                    builder = builder.limits([lower, upper]);
                }
                if let Some(motor) = def.motor {
                    builder = builder
                        .motor_velocity(motor.speed, MOTOR_GAIN)
                        .motor_max_force(motor.max_force);
                }
                builder.build().into()
            }
        };

        let handle = JointHandle(self.impulse_joints.insert(a.0, b.0, joint, true));
        self.joint_records.insert(
            handle,
            JointRecord {
                kind: def.kind(),
                body_a: a,
                body_b: b,
                motor: def.motor(),
                limits: def.limits(),
            },
        );
        for body in [a, b] {
            if let Some(record) = self.body_records.get_mut(&body) {
                record.joints.push(handle);
            }
        }
        Ok(handle)
    }

    // -- Destruction --

    /// Destroys a body together with its fixtures and every joint touching it.
    ///
    /// Returns `false` if the handle was already invalid.
    pub fn destroy_body(&mut self, body: BodyHandle) -> bool {
        let Some(record) = self.body_records.remove(&body) else {
            return false;
        };
        self.bodies.remove(
            body.0,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        for fixture in &record.fixtures {
            self.fixture_records.remove(fixture);
        }
        for joint in &record.joints {
            if let Some(removed) = self.joint_records.remove(joint) {
                let other = if removed.body_a == body {
                    removed.body_b
                } else {
                    removed.body_a
                };
                if let Some(other_record) = self.body_records.get_mut(&other) {
                    other_record.joints.retain(|j| j != joint);
                }
            }
        }
        self.body_order.retain(|b| *b != body);
        true
    }

    /// `root` plus every dynamic body reachable from it through joints, in
    /// breadth-first order. Static bodies are never traversed.
    #[must_use]
    pub fn assembly(&self, root: BodyHandle) -> Vec<BodyHandle> {
        if !self.body_records.contains_key(&root) {
            return Vec::new();
        }
        let mut seen = HashSet::from([root]);
        let mut order = vec![root];
        let mut queue = VecDeque::from([root]);
        while let Some(body) = queue.pop_front() {
            for joint in self.joints_of(body) {
                let Some(record) = self.joint_records.get(joint) else {
                    continue;
                };
                let other = if record.body_a == body {
                    record.body_b
                } else {
                    record.body_a
                };
                if self.body_kind(other) == Some(BodyKind::Dynamic) && seen.insert(other) {
                    order.push(other);
                    queue.push_back(other);
                }
            }
        }
        order
    }

    /// Destroys [`assembly`](Self::assembly)`(root)`; returns the number of
    /// bodies removed.
    pub fn destroy_assembly(&mut self, root: BodyHandle) -> usize {
        let members = self.assembly(root);
        members
            .into_iter()
            .filter(|body| self.destroy_body(*body))
            .count()
    }

    // -- Stepping --

    /// Advances every body by exactly one tick of `params.dt`.
    ///
    /// The first step latches `params`; later calls must pass identical
    /// values or the world is left untouched and an error is returned.
    pub fn step(&mut self, params: &StepParams) -> Result<()> {
        params
            .validate()
            .map_err(|e| SimError::invalid_step(e.to_string()))?;
        match self.latched_step {
            Some(latched) if latched != *params => {
                return Err(SimError::StepParamsChanged(format!(
                    "expected {latched:?}, got {params:?}"
                )));
            }
            Some(_) => {}
            None => {
                self.integration_parameters.dt = params.dt;
                self.integration_parameters.num_solver_iterations =
                    NonZeroUsize::new(params.velocity_iterations)
                        .ok_or_else(|| SimError::invalid_step("zero velocity iterations"))?;
                self.integration_parameters.num_internal_stabilization_iterations =
                    params.position_iterations;
                self.latched_step = Some(*params);
            }
        }

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.hooks,
            &self.collector,
        );
        self.tick += 1;

        self.contacts.clear();
        for event in self.collector.drain() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };
            let (a, b) = (FixtureHandle(h1), FixtureHandle(h2));
            // Removed colliders report a final stop on the next step.
            if !(self.fixture_records.contains_key(&a) && self.fixture_records.contains_key(&b)) {
                continue;
            }
            self.contacts.push(ContactEvent {
                fixture_a: a,
                fixture_b: b,
                started,
            });
        }
        Ok(())
    }

    /// Parameters latched by the first step, if any.
    #[must_use]
    pub fn step_params(&self) -> Option<StepParams> {
        self.latched_step
    }

    /// Number of steps executed.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Contact start/stop events raised by the most recent step.
    #[must_use]
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    // -- Queries --

    #[must_use]
    pub fn body_pose(&self, body: BodyHandle) -> Option<Pose> {
        if !self.body_records.contains_key(&body) {
            return None;
        }
        self.bodies.get(body.0).map(|rb| {
            let t = rb.translation();
            Pose::new(t.x, t.y, rb.rotation().angle())
        })
    }

    #[must_use]
    pub fn body_velocity(&self, body: BodyHandle) -> Option<Vec2> {
        if !self.body_records.contains_key(&body) {
            return None;
        }
        self.bodies
            .get(body.0)
            .map(|rb| Vec2::new(rb.linvel().x, rb.linvel().y))
    }

    #[must_use]
    pub fn body_kind(&self, body: BodyHandle) -> Option<BodyKind> {
        self.body_records.get(&body).map(|r| r.kind)
    }

    #[must_use]
    pub fn contains_body(&self, body: BodyHandle) -> bool {
        self.body_records.contains_key(&body)
    }

    /// Live bodies in creation order.
    #[must_use]
    pub fn bodies(&self) -> &[BodyHandle] {
        &self.body_order
    }

    #[must_use]
    pub fn body_count(&self) -> usize {
        self.body_records.len()
    }

    #[must_use]
    pub fn fixture_count(&self) -> usize {
        self.fixture_records.len()
    }

    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joint_records.len()
    }

    #[must_use]
    pub fn joint_count_of(&self, kind: JointKind) -> usize {
        self.joint_records
            .values()
            .filter(|r| r.kind == kind)
            .count()
    }

    #[must_use]
    pub fn fixtures_of(&self, body: BodyHandle) -> &[FixtureHandle] {
        self.body_records
            .get(&body)
            .map_or(&[], |r| r.fixtures.as_slice())
    }

    #[must_use]
    pub fn joints_of(&self, body: BodyHandle) -> &[JointHandle] {
        self.body_records
            .get(&body)
            .map_or(&[], |r| r.joints.as_slice())
    }

    #[must_use]
    pub fn fixture_body(&self, fixture: FixtureHandle) -> Option<BodyHandle> {
        self.fixture_records.get(&fixture).map(|r| r.body)
    }

    #[must_use]
    pub fn fixture_shape(&self, fixture: FixtureHandle) -> Option<ShapeKind> {
        self.fixture_records.get(&fixture).map(|r| r.shape)
    }

    #[must_use]
    pub fn fixture_group(&self, fixture: FixtureHandle) -> Option<i32> {
        self.fixture_records.get(&fixture).map(|r| r.group)
    }

    #[must_use]
    pub fn joint_kind(&self, joint: JointHandle) -> Option<JointKind> {
        self.joint_records.get(&joint).map(|r| r.kind)
    }

    #[must_use]
    pub fn joint_bodies(&self, joint: JointHandle) -> Option<(BodyHandle, BodyHandle)> {
        self.joint_records
            .get(&joint)
            .map(|r| (r.body_a, r.body_b))
    }

    #[must_use]
    pub fn joint_motor(&self, joint: JointHandle) -> Option<Motor> {
        self.joint_records.get(&joint).and_then(|r| r.motor)
    }

    #[must_use]
    pub fn joint_limits(&self, joint: JointHandle) -> Option<(f32, f32)> {
        self.joint_records.get(&joint).and_then(|r| r.limits)
    }

    /// Hex SHA-256 over the tick counter and every live body pose in creation
    /// order. Equal digests mean bit-identical states.
    #[must_use]
    pub fn state_digest(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.tick.to_le_bytes());
        for body in &self.body_order {
            if let Some(pose) = self.body_pose(*body) {
                hasher.update(pose.position.x.to_le_bytes());
                hasher.update(pose.position.y.to_le_bytes());
                hasher.update(pose.angle.to_le_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evocar_data::Material;

    fn ball(world: &mut World, x: f32, y: f32, group: i32) -> BodyHandle {
        let body = world.create_body(&BodyDef::dynamic(Pose::at(x, y))).unwrap();
        world
            .create_fixture(
                body,
                &FixtureDef::new(ShapeDef::Circle { radius: 0.5 }, Material::default(), group),
            )
            .unwrap();
        body
    }

    #[test]
    fn test_create_and_destroy_body() {
        let mut world = World::new(Vec2::new(0.0, -10.0));
        let body = ball(&mut world, 0.0, 0.0, 0);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.fixture_count(), 1);
        assert!(world.destroy_body(body));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.fixture_count(), 0);
        assert!(world.body_pose(body).is_none());
        assert!(!world.destroy_body(body));
    }

    #[test]
    fn test_fixture_on_unknown_body_rejected() {
        let mut world = World::new(Vec2::ZERO);
        let body = ball(&mut world, 0.0, 0.0, 0);
        world.destroy_body(body);
        let err = world
            .create_fixture(
                body,
                &FixtureDef::new(ShapeDef::Circle { radius: 1.0 }, Material::default(), 0),
            )
            .unwrap_err();
        assert_eq!(err, SimError::UnknownBody);
    }

    #[test]
    fn test_invalid_material_rejected() {
        let mut world = World::new(Vec2::ZERO);
        let body = world.create_body(&BodyDef::dynamic(Pose::at(0.0, 0.0))).unwrap();
        let result = world.create_fixture(
            body,
            &FixtureDef::new(
                ShapeDef::Circle { radius: 1.0 },
                Material::new(-1.0, 0.3, 0.3),
                0,
            ),
        );
        assert!(matches!(result, Err(SimError::InvalidMaterial(_))));
        assert_eq!(world.fixture_count(), 0);
    }

    #[test]
    fn test_fixture_group_reads_back() {
        let mut world = World::new(Vec2::ZERO);
        let body = ball(&mut world, 0.0, 0.0, -2);
        let fixture = world.fixtures_of(body)[0];
        assert_eq!(world.fixture_group(fixture), Some(-2));
        assert_eq!(world.fixture_shape(fixture), Some(ShapeKind::Circle));
        assert_eq!(world.fixture_body(fixture), Some(body));
    }

    #[test]
    fn test_destroying_body_removes_its_joints() {
        let mut world = World::new(Vec2::ZERO);
        let a = ball(&mut world, 0.0, 0.0, 0);
        let b = ball(&mut world, 1.0, 0.0, 0);
        let joint = world
            .create_joint(&RevoluteJointDef::new(a, b, Vec2::new(0.5, 0.0)).into())
            .unwrap();
        assert_eq!(world.joint_count(), 1);
        assert_eq!(world.joint_kind(joint), Some(JointKind::Revolute));

        world.destroy_body(a);
        assert_eq!(world.joint_count(), 0);
        assert!(world.joints_of(b).is_empty());
        assert!(world.contains_body(b));
    }

    #[test]
    fn test_joint_to_itself_rejected() {
        let mut world = World::new(Vec2::ZERO);
        let a = ball(&mut world, 0.0, 0.0, 0);
        let result = world.create_joint(&RevoluteJointDef::new(a, a, Vec2::ZERO).into());
        assert!(matches!(result, Err(SimError::InvalidJoint(_))));
    }

    #[test]
    fn test_zero_prismatic_axis_rejected() {
        let mut world = World::new(Vec2::ZERO);
        let a = ball(&mut world, 0.0, 0.0, 0);
        let b = ball(&mut world, 0.0, 1.0, 0);
        let def = PrismaticJointDef::new(a, b, Vec2::ZERO, Vec2::ZERO);
        assert!(world.create_joint(&def.into()).is_err());
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn test_prismatic_limits_and_motor_recorded() {
        let mut world = World::new(Vec2::ZERO);
        let a = ball(&mut world, 0.0, 0.0, 0);
        let b = ball(&mut world, 0.0, 1.0, 0);
        let def = PrismaticJointDef::new(a, b, Vec2::new(0.0, 1.0), Vec2::new(0.0, 1.0))
            .with_limits(-1.0, 1.0)
            .with_motor(0.0, 0.0);
        let joint = world.create_joint(&def.into()).unwrap();
        assert_eq!(world.joint_kind(joint), Some(JointKind::Prismatic));
        assert_eq!(world.joint_limits(joint), Some((-1.0, 1.0)));
        assert_eq!(world.joint_motor(joint), Some(Motor::new(0.0, 0.0)));
        assert_eq!(world.joint_bodies(joint), Some((a, b)));
    }

    #[test]
    fn test_assembly_stops_at_static_bodies() {
        let mut world = World::new(Vec2::ZERO);
        let ground = world.create_body(&BodyDef::fixed(Pose::at(0.0, -5.0))).unwrap();
        let root = ball(&mut world, 0.0, 0.0, 0);
        let child = ball(&mut world, 1.0, 0.0, 0);
        let grandchild = ball(&mut world, 2.0, 0.0, 0);
        world
            .create_joint(&RevoluteJointDef::new(root, child, Vec2::new(0.5, 0.0)).into())
            .unwrap();
        world
            .create_joint(&RevoluteJointDef::new(grandchild, child, Vec2::new(1.5, 0.0)).into())
            .unwrap();
        world
            .create_joint(&RevoluteJointDef::new(ground, root, Vec2::ZERO).into())
            .unwrap();

        assert_eq!(world.assembly(root), vec![root, child, grandchild]);
        assert_eq!(world.destroy_assembly(root), 3);
        assert_eq!(world.body_count(), 1);
        assert!(world.contains_body(ground));
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn test_step_latches_parameters() {
        let mut world = World::new(Vec2::new(0.0, -10.0));
        ball(&mut world, 0.0, 10.0, 0);
        let params = StepParams::default();
        world.step(&params).unwrap();
        assert_eq!(world.step_params(), Some(params));

        let digest = world.state_digest();
        let changed = StepParams {
            dt: 1.0 / 30.0,
            ..params
        };
        assert!(matches!(
            world.step(&changed),
            Err(SimError::StepParamsChanged(_))
        ));
        assert_eq!(world.tick(), 1);
        assert_eq!(world.state_digest(), digest);

        world.step(&params).unwrap();
        assert_eq!(world.tick(), 2);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let mut world = World::new(Vec2::ZERO);
        let params = StepParams {
            dt: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(world.step(&params), Err(SimError::InvalidStep(_))));
        assert_eq!(world.tick(), 0);
        assert!(world.step_params().is_none());
    }

    #[test]
    fn test_same_negative_group_produces_no_contacts() {
        let mut world = World::new(Vec2::ZERO);
        ball(&mut world, 0.0, 0.0, -2);
        ball(&mut world, 0.2, 0.0, -2);
        let params = StepParams::default();
        for _ in 0..10 {
            world.step(&params).unwrap();
            assert!(world.contacts().is_empty());
        }
    }

    #[test]
    fn test_overlapping_default_group_reports_contact() {
        let mut world = World::new(Vec2::ZERO);
        ball(&mut world, 0.0, 0.0, 0);
        ball(&mut world, 0.2, 0.0, 0);
        let params = StepParams::default();
        let mut started = 0;
        for _ in 0..10 {
            world.step(&params).unwrap();
            started += world.contacts().iter().filter(|c| c.started).count();
        }
        assert!(started > 0);
    }

    #[test]
    fn test_destroyed_fixtures_leave_no_contacts() {
        let mut world = World::new(Vec2::ZERO);
        ball(&mut world, 0.0, 0.0, 0);
        let b = ball(&mut world, 0.2, 0.0, 0);
        let params = StepParams::default();
        world.step(&params).unwrap();
        assert!(world.contacts().iter().any(|c| c.started));

        world.destroy_body(b);
        world.step(&params).unwrap();
        assert!(world.contacts().is_empty(), "{:?}", world.contacts());
    }

    #[test]
    fn test_polygon_fixture_falls_with_its_body() {
        let mut world = World::new(Vec2::new(0.0, -10.0));
        let body = world.create_body(&BodyDef::dynamic(Pose::at(0.0, 10.0))).unwrap();
        let fixture = world
            .create_fixture(
                body,
                &FixtureDef::new(
                    ShapeDef::Polygon(vec![
                        Vec2::new(-1.0, -1.0),
                        Vec2::new(1.0, -1.0),
                        Vec2::new(1.5, 0.5),
                        Vec2::new(0.0, 1.5),
                    ]),
                    Material::default(),
                    0,
                ),
            )
            .unwrap();
        assert_eq!(world.fixture_shape(fixture), Some(ShapeKind::Polygon));

        world.step(&StepParams::default()).unwrap();
        assert!(world.body_pose(body).unwrap().position.y < 10.0);
    }
}
