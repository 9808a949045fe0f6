//! Candidate generation for area fill, brush dabs, and boundary placement.
//!
//! Samplers produce tentative positions only; containment, spacing and orientation
//! filtering happen downstream in [`crate::placement`]. Every sampler draws from an
//! injected [`RngCore`] so runs can be reproduced with a seeded generator.
use std::f32::consts::TAU;

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

pub mod area;
pub mod disk;
pub mod perimeter;

pub use area::{AreaSamples, AreaSampling};
pub use disk::DiskSampling;
pub use perimeter::{PerimeterSample, PerimeterSampling};

/// Trait for position sampling over a sampler-defined region.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform float in `[lo, hi)`.
#[inline]
pub(crate) fn rand_range<R: RngCore + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rand01(rng) * (hi - lo)
}

/// Uniformly distributed unit vector.
pub fn random_direction<R: RngCore + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rand01(rng) * TAU;
    Vec2::new(angle.cos(), angle.sin())
}

/// Largest float strictly below `x`, used to keep half-open sample ranges inside
/// their bounds. `+inf` maps to `f32::MAX`; NaN and `-inf` come back unchanged.
#[inline]
pub(crate) fn float_below(x: f32) -> f32 {
    if x.is_nan() || x == f32::NEG_INFINITY {
        x
    } else if x == f32::INFINITY {
        f32::MAX
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}
