//! Uniform random candidates inside an axis-aligned region.
use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

use crate::geometry::Aabb;
use crate::sampling::{float_below, rand01, PositionSampling};

/// Uniform i.i.d. sampling over `center ± extents`.
///
/// `count` is an attempt budget: downstream containment and spacing filters may
/// reject most of the drawn points.
#[derive(Debug, Clone)]
pub struct AreaSampling {
    pub center: Vec2,
    /// Half-size of the sampled region.
    pub extents: Vec2,
    /// Number of candidate points to draw.
    pub count: usize,
}

impl AreaSampling {
    pub fn new(center: Vec2, extents: Vec2, count: usize) -> Self {
        Self {
            center,
            extents,
            count,
        }
    }

    /// Sample over a bounding box, typically [`crate::boundary::AreaDescriptor::bounds`].
    pub fn from_bounds(bounds: Aabb, count: usize) -> Self {
        Self::new(bounds.center, bounds.extents, count)
    }

    /// Lazily draws the candidates. Each call starts a fresh, independent sequence.
    pub fn iter<'a, R: RngCore + ?Sized>(&self, rng: &'a mut R) -> AreaSamples<'a, R> {
        let w = self.extents.x;
        let h = self.extents.y;
        let remaining = if w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite() {
            self.count
        } else {
            0
        };
        AreaSamples {
            rng,
            center: self.center,
            extents: self.extents,
            // Right and top edges stay exclusive.
            max: Vec2::new(float_below(w), float_below(h)),
            remaining,
        }
    }
}

impl PositionSampling for AreaSampling {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        self.iter(rng).map(Into::into).collect()
    }
}

/// Iterator returned by [`AreaSampling::iter`].
pub struct AreaSamples<'a, R: RngCore + ?Sized> {
    rng: &'a mut R,
    center: Vec2,
    extents: Vec2,
    max: Vec2,
    remaining: usize,
}

impl<R: RngCore + ?Sized> Iterator for AreaSamples<'_, R> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let u = rand01(&mut *self.rng);
        let v = rand01(&mut *self.rng);
        let x = (u * 2.0 * self.extents.x - self.extents.x).clamp(-self.extents.x, self.max.x);
        let y = (v * 2.0 * self.extents.y - self.extents.y).clamp(-self.extents.y, self.max.y);
        Some(self.center + Vec2::new(x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: RngCore + ?Sized> ExactSizeIterator for AreaSamples<'_, R> {}
