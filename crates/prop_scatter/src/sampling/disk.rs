//! Uniform random candidates inside a disc, used for brush dabs.
use std::f32::consts::TAU;

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

use crate::sampling::{rand01, PositionSampling};

/// Uniform sampling over the disc `|p - center| <= radius`.
#[derive(Debug, Clone)]
pub struct DiskSampling {
    pub center: Vec2,
    pub radius: f32,
    /// Number of candidate points to draw.
    pub count: usize,
}

impl DiskSampling {
    pub fn new(center: Vec2, radius: f32, count: usize) -> Self {
        Self {
            center,
            radius,
            count,
        }
    }

    /// Draws a single point. Non-positive radii return the center.
    pub fn sample_one<R: RngCore + ?Sized>(&self, rng: &mut R) -> Vec2 {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return self.center;
        }
        // sqrt keeps the density uniform in area rather than in radius.
        let r = self.radius * rand01(rng).sqrt();
        let angle = rand01(rng) * TAU;
        self.center + Vec2::new(angle.cos(), angle.sin()) * r
    }

    pub fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> Vec<Vec2> {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return Vec::new();
        }
        (0..self.count).map(|_| self.sample_one(rng)).collect()
    }
}

impl PositionSampling for DiskSampling {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        self.sample(rng).into_iter().map(Into::into).collect()
    }
}
