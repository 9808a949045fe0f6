//! Random candidates spread uniformly by arc length along a boundary.
use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

use crate::boundary::{Overshoot, PerimeterSampler};
use crate::sampling::rand01;

/// A point drawn on a boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterSample {
    /// Normalized arc-length parameter in `[0, 1)`.
    pub t: f32,
    pub position: Vec2,
    /// Right-hand normal of the edge holding the point (outward for CCW boundaries).
    pub normal: Vec2,
}

/// Draws `count` uniform arc-length parameters on a [`PerimeterSampler`].
#[derive(Debug, Clone)]
pub struct PerimeterSampling {
    pub count: usize,
}

impl PerimeterSampling {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn sample<R: RngCore + ?Sized>(
        &self,
        perimeter: &PerimeterSampler,
        rng: &mut R,
    ) -> Vec<PerimeterSample> {
        (0..self.count)
            .map(|_| {
                let t = rand01(rng);
                let (position, normal) = perimeter.sample_with_normal(t, Overshoot::Cyclic);
                PerimeterSample {
                    t,
                    position,
                    normal,
                }
            })
            .collect()
    }

    /// Positions only, in the interop type used by [`crate::sampling::PositionSampling`].
    pub fn generate_on(
        &self,
        perimeter: &PerimeterSampler,
        rng: &mut dyn RngCore,
    ) -> Vec<Vector2<f32>> {
        self.sample(perimeter, rng)
            .into_iter()
            .map(|s| s.position.into())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::boundary::BoundarySequence;

    #[test]
    fn samples_lie_on_square_edges_with_outward_normals() {
        let square = BoundarySequence::closed(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
        .unwrap();
        let perimeter = PerimeterSampler::new(&square);
        let mut rng = StdRng::seed_from_u64(5);
        let samples = PerimeterSampling::new(64).sample(&perimeter, &mut rng);
        assert_eq!(samples.len(), 64);
        let center = Vec2::splat(5.0);
        for s in samples {
            let p = s.position;
            let on_edge = p.x.abs() < 1e-3
                || (p.x - 10.0).abs() < 1e-3
                || p.y.abs() < 1e-3
                || (p.y - 10.0).abs() < 1e-3;
            assert!(on_edge, "{p:?} not on boundary");
            assert!((0.0..1.0).contains(&s.t));
            assert!(s.normal.dot(p - center) > 0.0, "normal {:?} at {p:?}", s.normal);
        }
    }

    #[test]
    fn generate_on_matches_sample_positions() {
        let chain = BoundarySequence::open(vec![Vec2::ZERO, Vec2::new(4.0, 0.0)]).unwrap();
        let perimeter = PerimeterSampler::new(&chain);
        let s = PerimeterSampling::new(8);
        let a = s.sample(&perimeter, &mut StdRng::seed_from_u64(3));
        let b = s.generate_on(&perimeter, &mut StdRng::seed_from_u64(3));
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x.position, Vec2::from(y));
        }
    }
}
