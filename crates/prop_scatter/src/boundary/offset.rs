//! Mitered boundary offsetting.
//!
//! Each vertex moves along the normalized average of its adjacent edges'
//! right-hand perpendiculars. Positive distances grow a counter-clockwise polygon,
//! negative distances shrink it. Vertex count and order are preserved, and
//! `offset[i]` only depends on source vertices `i - 1`, `i` and `i + 1`.
use glam::Vec2;
use tracing::trace;

use crate::boundary::BoundarySequence;
use crate::geometry::right_normal;

/// Below this length the averaged miter is treated as a hairpin turn.
pub const DEGENERATE_MITER_EPSILON: f32 = 1e-4;

impl BoundarySequence {
    /// Unit miter normal at vertex `index`.
    ///
    /// Open endpoints use their single edge's perpendicular. When the incoming and
    /// outgoing edges are anti-parallel the average vanishes and the incoming edge's
    /// perpendicular is used instead.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn miter_normal(&self, index: usize) -> Vec2 {
        let points = self.points();
        let n = points.len();
        assert!(index < n, "vertex index {index} out of range for {n} vertices");

        let prev = if index > 0 {
            Some(points[index - 1])
        } else if self.is_closed() {
            Some(points[n - 1])
        } else {
            None
        };
        let next = if index + 1 < n {
            Some(points[index + 1])
        } else if self.is_closed() {
            Some(points[0])
        } else {
            None
        };

        let here = points[index];
        let incoming = prev.map(|p| right_normal((here - p).normalize_or_zero()));
        let outgoing = next.map(|p| right_normal((p - here).normalize_or_zero()));

        match (incoming, outgoing) {
            (Some(a), Some(b)) => {
                let sum = a + b;
                if sum.length() < DEGENERATE_MITER_EPSILON {
                    trace!(index, "anti-parallel edges at vertex; using incoming normal");
                    a
                } else {
                    sum.normalize()
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            // Unreachable for a validated sequence (>= 2 vertices).
            (None, None) => Vec2::ZERO,
        }
    }

    /// Copy of this boundary with every vertex moved `distance` along its miter normal.
    pub fn offset(&self, distance: f32) -> BoundarySequence {
        if distance == 0.0 {
            return self.clone();
        }
        let points = self
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| *p + self.miter_normal(i) * distance)
            .collect();
        BoundarySequence::from_parts_unchecked(points, self.is_closed())
    }
}
