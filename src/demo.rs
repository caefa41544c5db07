use evocar_data::{Genome, WheelGene};

/// Share of the chassis radius given to each wheel.
pub const WHEEL_RADIUS_RATIO: f32 = 0.4;

/// A regular polygon chassis with wheels mounted on evenly spaced vertices.
///
/// Vertex `0` points along +x; wheel `i` sits on vertex `i * vertices / wheels`.
/// `wheels` is clamped to the vertex count.
#[must_use]
pub fn regular_car(vertices: usize, wheels: usize, radius: f32) -> Genome {
    let base = Genome::regular(vertices, radius, Vec::new());
    let wheels = wheels.min(base.vertex_count());
    let genes = (0..wheels)
        .map(|i| {
            let vertex = base.vertices[i * base.vertex_count() / wheels];
            WheelGene::new(vertex, radius * WHEEL_RADIUS_RATIO)
        })
        .collect();
    Genome::new(base.vertices, genes)
}

/// Spawn height that keeps every wheel of `genome` clear of flat ground.
#[must_use]
pub fn clearance(genome: &Genome) -> f32 {
    let lowest = genome
        .wheels
        .iter()
        .map(|w| w.offset.y - w.radius)
        .chain(genome.vertices.iter().map(|v| v.y))
        .fold(0.0_f32, f32::min);
    -lowest + 1.0
}
