pub mod macros;

use evocar_lib::core::{SimConfig, Simulation};
use evocar_lib::data::{Genome, Pose, Vec2, WheelGene};

/// Spawn pose above the flat start of the default track.
pub const SPAWN: Pose = Pose::at(-80.0, 0.0);

#[allow(dead_code)]
pub struct SimBuilder {
    config: SimConfig,
}

#[allow(dead_code)]
impl SimBuilder {
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.track.seed = seed;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn try_build(self) -> evocar_lib::core::Result<Simulation> {
        Simulation::new(self.config)
    }

    pub fn build(self) -> Simulation {
        self.try_build()
            .expect("Failed to create simulation in test builder")
    }
}

/// Regular `vertices`-gon of `radius` with `wheels` wheels on evenly spaced
/// vertices.
#[allow(dead_code)]
pub fn polygon_car(vertices: usize, radius: f32, wheels: usize) -> Genome {
    let base = Genome::regular(vertices, radius, Vec::new());
    let genes = (0..wheels)
        .map(|i| WheelGene::new(base.vertices[i * vertices / wheels], radius * 0.3))
        .collect();
    Genome::new(base.vertices, genes)
}

/// Eight vertices, four wheels.
#[allow(dead_code)]
pub fn octagon_car() -> Genome {
    polygon_car(8, 4.0, 4)
}

/// A small hexagon with two low wheels.
#[allow(dead_code)]
pub fn hexagon_car() -> Genome {
    Genome::new(
        Genome::regular(6, 3.0, Vec::new()).vertices,
        vec![
            WheelGene::new(Vec2::new(2.0, -2.0), 1.0),
            WheelGene::new(Vec2::new(-2.0, -2.0), 1.0),
        ],
    )
}

/// Fixtures created for `genome`: one per fan triangle plus an axle box and
/// a wheel circle per wheel.
#[allow(dead_code)]
pub fn expected_fixtures(genome: &Genome) -> usize {
    genome.vertex_count() + 2 * genome.wheel_count()
}

/// Bodies created for `genome`: chassis plus an axle and a wheel per wheel.
#[allow(dead_code)]
pub fn expected_bodies(genome: &Genome) -> usize {
    1 + 2 * genome.wheel_count()
}
