//! Deterministic terrain generation.
//!
//! The profile is a pure function of [`TrackConfig`]: a flat spawn margin
//! followed by uniformly distributed elevations drawn from a generator seeded
//! with a fixed value. Only a prefix of the generated profile is attached to
//! the world as one static chain fixture.

use evocar_data::{Pose, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::TrackConfig;
use crate::error::{Result, SimError};
use crate::world::{BodyDef, BodyHandle, FixtureDef, FixtureHandle, ShapeDef, World};

/// Generated terrain points, in the track body's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackProfile {
    points: Vec<Vec2>,
}

impl TrackProfile {
    /// Generates the full profile of `config.generated_points` points.
    pub fn generate(config: &TrackConfig) -> Result<Self> {
        if config.generated_points < 2 {
            return Err(SimError::TooFewTrackPoints(config.generated_points));
        }
        if !(config.min_elevation.is_finite()
            && config.max_elevation.is_finite()
            && config.min_elevation < config.max_elevation)
        {
            return Err(SimError::Config(format!(
                "track elevation range [{}, {}) is empty",
                config.min_elevation, config.max_elevation
            )));
        }
        if !(config.x_origin.is_finite() && config.x_step.is_finite()) {
            return Err(SimError::non_finite("track x origin or step"));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let points = (0..config.generated_points)
            .map(|i| {
                let x = config.x_origin + config.x_step * i as f32;
                let y = if i < config.flat_points {
                    0.0
                } else {
                    rng.gen_range(config.min_elevation..config.max_elevation)
                };
                Vec2::new(x, y)
            })
            .collect();
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first `count` points.
    pub fn prefix(&self, count: usize) -> Result<&[Vec2]> {
        if count < 2 {
            return Err(SimError::TooFewTrackPoints(count));
        }
        self.points
            .get(..count)
            .ok_or(SimError::TrackPrefixTooLong {
                used: count,
                generated: self.points.len(),
            })
    }
}

/// The terrain registered in a world.
#[derive(Debug, Clone)]
pub struct Track {
    pub body: BodyHandle,
    pub fixture: FixtureHandle,
    profile: TrackProfile,
    attached: usize,
}

impl Track {
    /// Generates the profile and attaches its prefix to a new static body.
    ///
    /// Nothing is registered in `world` if any precondition fails.
    pub fn install(world: &mut World, config: &TrackConfig) -> Result<Self> {
        let profile = TrackProfile::generate(config)?;
        let chain = profile.prefix(config.attached_points)?.to_vec();
        let fixture_def = FixtureDef::new(
            ShapeDef::Chain(chain),
            config.material,
            config.collision_group,
        );
        fixture_def.shape.validate()?;

        let body = world.create_body(&BodyDef::fixed(Pose::at(config.anchor.x, config.anchor.y)))?;
        let fixture = match world.create_fixture(body, &fixture_def) {
            Ok(fixture) => fixture,
            Err(err) => {
                world.destroy_body(body);
                return Err(err);
            }
        };

        tracing::info!(
            seed = config.seed,
            generated = profile.len(),
            attached = config.attached_points,
            "Track installed"
        );

        Ok(Self {
            body,
            fixture,
            profile,
            attached: config.attached_points,
        })
    }

    #[must_use]
    pub fn profile(&self) -> &TrackProfile {
        &self.profile
    }

    /// Points actually attached to the chain fixture.
    #[must_use]
    pub fn attached_points(&self) -> &[Vec2] {
        &self.profile.points[..self.attached]
    }
}
