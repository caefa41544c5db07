use super::geometry::Vec2;

/// One wheel of a vehicle genome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGene {
    /// Attachment point relative to the chassis centre, in the chassis frame.
    pub offset: Vec2,
    /// Wheel radius in metres.
    pub radius: f32,
}

impl WheelGene {
    #[must_use]
    pub const fn new(offset: Vec2, radius: f32) -> Self {
        Self { offset, radius }
    }
}

/// Encoded description of one vehicle, produced by the genetic algorithm.
///
/// The chassis is the polygon traced by `vertices` (chassis frame, centred on
/// the local origin). It is fan-triangulated: triangle `i` joins vertex `i`,
/// vertex `i + 1` (wrapping) and the centre point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Genome {
    pub vertices: Vec<Vec2>,
    pub wheels: Vec<WheelGene>,
}

impl Genome {
    #[must_use]
    pub fn new(vertices: Vec<Vec2>, wheels: Vec<WheelGene>) -> Self {
        Self { vertices, wheels }
    }

    /// A regular polygon chassis of `vertex_count` corners on a circle of
    /// `radius`, first corner on the positive x axis.
    #[must_use]
    pub fn regular(vertex_count: usize, radius: f32, wheels: Vec<WheelGene>) -> Self {
        let step = std::f32::consts::TAU / vertex_count.max(1) as f32;
        let vertices = (0..vertex_count)
            .map(|i| Vec2::new(radius, 0.0).rotated(step * i as f32))
            .collect();
        Self { vertices, wheels }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn wheel_count(&self) -> usize {
        self.wheels.len()
    }

    /// Fan triangle `index`: `(vertex[i], vertex[(i + 1) % n], center)`.
    ///
    /// Returns `None` when `index` is out of range.
    #[must_use]
    pub fn chassis_triangle(&self, index: usize, center: Vec2) -> Option<[Vec2; 3]> {
        let n = self.vertices.len();
        let a = *self.vertices.get(index)?;
        let b = self.vertices[(index + 1) % n];
        Some([a, b, center])
    }

    /// Iterates all fan triangles in vertex order.
    pub fn chassis_triangles(&self, center: Vec2) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        (0..self.vertices.len()).filter_map(move |i| self.chassis_triangle(i, center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_genome_vertex_count() {
        let genome = Genome::regular(8, 3.0, vec![WheelGene::new(Vec2::new(2.0, -1.0), 1.0)]);
        assert_eq!(genome.vertex_count(), 8);
        assert_eq!(genome.wheel_count(), 1);
        for v in &genome.vertices {
            assert!((v.length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_last_triangle_wraps_to_first_vertex() {
        let genome = Genome::new(
            vec![
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(-1.0, 0.0),
            ],
            Vec::new(),
        );
        let tri = genome.chassis_triangle(2, Vec2::ZERO).unwrap();
        assert_eq!(tri, [Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::ZERO]);
        assert!(genome.chassis_triangle(3, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_one_triangle_per_vertex() {
        let genome = Genome::regular(5, 2.0, Vec::new());
        assert_eq!(genome.chassis_triangles(Vec2::ZERO).count(), 5);
    }
}
