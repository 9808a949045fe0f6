//! Arc-length parameterization of boundaries.
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::{BoundarySequence, Edge};
use crate::error::Result;
use crate::geometry::right_normal;

/// How parameters outside `[0, 1)` are folded back.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overshoot {
    /// `t mod 1`, direction preserved.
    #[default]
    Cyclic,
    /// Reflects at every unit boundary: forward on `[0, 1)`, backward on `[1, 2)`.
    PingPong,
}

impl Overshoot {
    /// Folds `t` into `[0, 1]`. Cyclic results are always below 1; ping-pong reaches
    /// exactly 1 at odd integers. Non-finite input maps to 0.
    pub fn wrap(self, t: f32) -> f32 {
        if !t.is_finite() {
            return 0.0;
        }
        match self {
            Overshoot::Cyclic => {
                let r = t.rem_euclid(1.0);
                // rem_euclid can round up to 1.0 for tiny negative inputs.
                if r >= 1.0 {
                    0.0
                } else {
                    r
                }
            }
            Overshoot::PingPong => {
                let m = t.rem_euclid(2.0);
                if m >= 2.0 {
                    0.0
                } else if m <= 1.0 {
                    m
                } else {
                    2.0 - m
                }
            }
        }
    }
}

/// Precomputed edge table for sampling points by normalized arc length.
#[derive(Debug, Clone)]
pub struct PerimeterSampler {
    edges: Vec<Edge>,
    cumulative: Vec<f32>,
    total: f32,
}

impl PerimeterSampler {
    pub fn new(boundary: &BoundarySequence) -> Self {
        let edges: Vec<Edge> = boundary.edges().collect();
        let mut cumulative = Vec::with_capacity(edges.len());
        let mut running = 0.0f32;
        for e in &edges {
            running += e.length;
            cumulative.push(running);
        }
        Self {
            edges,
            cumulative,
            total: running,
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Cumulative length up to and including each edge.
    pub fn cumulative_lengths(&self) -> &[f32] {
        &self.cumulative
    }

    pub fn total_length(&self) -> f32 {
        self.total
    }

    /// Index of the edge holding parameter `t` and the fraction along that edge.
    pub fn locate(&self, t: f32, overshoot: Overshoot) -> (usize, f32) {
        let target = self.total * overshoot.wrap(t);
        let last = self.edges.len().saturating_sub(1);
        let index = self.cumulative.partition_point(|&c| c < target).min(last);
        let edge = &self.edges[index];
        let local = if edge.length > 0.0 {
            1.0 - (self.cumulative[index] - target) / edge.length
        } else {
            0.0
        };
        (index, local.clamp(0.0, 1.0))
    }

    /// Point at normalized arc length `t`.
    pub fn sample(&self, t: f32, overshoot: Overshoot) -> Vec2 {
        let (index, local) = self.locate(t, overshoot);
        self.edges[index].lerp(local)
    }

    /// Point at `t` together with the right-hand normal of the edge it lies on.
    pub fn sample_with_normal(&self, t: f32, overshoot: Overshoot) -> (Vec2, Vec2) {
        let (index, local) = self.locate(t, overshoot);
        let edge = &self.edges[index];
        (edge.lerp(local), right_normal(edge.direction()))
    }
}

impl From<&BoundarySequence> for PerimeterSampler {
    fn from(boundary: &BoundarySequence) -> Self {
        PerimeterSampler::new(boundary)
    }
}

/// Validates `points` as a boundary and samples it once.
///
/// Fails with [`crate::error::Error::EmptyBoundary`] for fewer than 2 vertices.
pub fn sample_perimeter(
    points: &[Vec2],
    closed: bool,
    t: f32,
    overshoot: Overshoot,
) -> Result<Vec2> {
    let boundary = BoundarySequence::new(points.to_vec(), closed)?;
    Ok(PerimeterSampler::new(&boundary).sample(t, overshoot))
}
