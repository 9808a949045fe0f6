//! Boundary model: area descriptors normalized into ordered vertex sequences.
//!
//! An [`AreaDescriptor`] is what the host tool hands over (a box, a polygon, an open
//! edge chain, or a circle). [`BoundarySequence::from_descriptor`] turns the shapes
//! that have a vertex boundary into a validated [`BoundarySequence`], which the
//! [`offset`] and [`perimeter`] modules operate on.
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{polygon_contains, Aabb, PointContainment};

pub mod offset;
pub mod perimeter;

pub use offset::DEGENERATE_MITER_EPSILON;
pub use perimeter::{sample_perimeter, Overshoot, PerimeterSampler};

/// Area shapes supplied by the host.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AreaDescriptor {
    /// Axis-aligned box; `extents` are half-sizes.
    Box { center: Vec2, extents: Vec2 },
    /// Closed polygon, vertices in order.
    Polygon(Vec<Vec2>),
    /// Open polyline.
    EdgeChain(Vec<Vec2>),
    /// Disc. Usable for area fill, but it has no vertex boundary.
    Circle { center: Vec2, radius: f32 },
}

impl AreaDescriptor {
    /// Short shape name for logs and errors.
    pub fn shape_name(&self) -> &'static str {
        match self {
            AreaDescriptor::Box { .. } => "box",
            AreaDescriptor::Polygon(_) => "polygon",
            AreaDescriptor::EdgeChain(_) => "edge chain",
            AreaDescriptor::Circle { .. } => "circle",
        }
    }

    /// Bounding box of the area. Empty vertex lists yield a zero-size box at the origin.
    pub fn bounds(&self) -> Aabb {
        match self {
            AreaDescriptor::Box { center, extents } => Aabb::new(*center, extents.abs()),
            AreaDescriptor::Polygon(points) | AreaDescriptor::EdgeChain(points) => {
                Aabb::from_points(points).unwrap_or(Aabb::new(Vec2::ZERO, Vec2::ZERO))
            }
            AreaDescriptor::Circle { center, radius } => {
                Aabb::new(*center, Vec2::splat(radius.abs()))
            }
        }
    }

    /// Whether the descriptor carries a vertex boundary.
    pub fn has_boundary(&self) -> bool {
        !matches!(self, AreaDescriptor::Circle { .. })
    }
}

impl PointContainment for AreaDescriptor {
    fn contains_point(&self, point: Vec2) -> bool {
        match self {
            AreaDescriptor::Box { center, extents } => {
                Aabb::new(*center, extents.abs()).contains(point)
            }
            AreaDescriptor::Polygon(points) => polygon_contains(points, point),
            AreaDescriptor::EdgeChain(_) => false,
            AreaDescriptor::Circle { center, radius } => {
                point.distance_squared(*center) <= radius * radius
            }
        }
    }
}

/// A straight segment of a boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
    pub length: f32,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            length: start.distance(end),
        }
    }

    /// Unit direction from start to end, zero for a degenerate edge.
    pub fn direction(&self) -> Vec2 {
        (self.end - self.start).normalize_or_zero()
    }

    /// Point at fraction `t` along the edge.
    pub fn lerp(&self, t: f32) -> Vec2 {
        self.start.lerp(self.end, t)
    }
}

/// Ordered vertex chain, either a closed polygon or an open polyline.
///
/// Construction guarantees at least 2 vertices (3 when closed) and no consecutive
/// duplicates, so every edge has a defined direction.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySequence {
    points: Vec<Vec2>,
    closed: bool,
}

impl BoundarySequence {
    pub fn new(points: Vec<Vec2>, closed: bool) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::EmptyBoundary {
                vertices: points.len(),
            });
        }
        if closed && points.len() < 3 {
            return Err(Error::DegenerateBoundary(
                "closed boundary needs at least 3 vertices".into(),
            ));
        }
        let pairs = if closed {
            points.len()
        } else {
            points.len() - 1
        };
        for i in 0..pairs {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if a == b {
                return Err(Error::DegenerateBoundary(format!(
                    "duplicate consecutive vertex at index {i}"
                )));
            }
        }
        Ok(Self { points, closed })
    }

    /// Builds a closed sequence.
    pub fn closed(points: Vec<Vec2>) -> Result<Self> {
        Self::new(points, true)
    }

    /// Builds an open sequence.
    pub fn open(points: Vec<Vec2>) -> Result<Self> {
        Self::new(points, false)
    }

    /// Normalizes an area descriptor, optionally translated by `origin`.
    ///
    /// Box corners are emitted counter-clockwise starting at the min corner.
    /// Circles have no vertex boundary and fail with [`Error::UnsupportedShape`].
    pub fn from_descriptor(descriptor: &AreaDescriptor, origin: Option<Vec2>) -> Result<Self> {
        let (points, closed) = match descriptor {
            AreaDescriptor::Box { center, extents } => {
                let e = *extents;
                let corners = [
                    Vec2::new(-e.x, -e.y),
                    Vec2::new(e.x, -e.y),
                    Vec2::new(e.x, e.y),
                    Vec2::new(-e.x, e.y),
                ];
                (corners.iter().map(|c| *c + *center).collect(), true)
            }
            AreaDescriptor::Polygon(points) => (points.clone(), true),
            AreaDescriptor::EdgeChain(points) => (points.clone(), false),
            AreaDescriptor::Circle { .. } => {
                return Err(Error::UnsupportedShape(format!(
                    "{} has no vertex boundary",
                    descriptor.shape_name()
                )));
            }
        };
        let seq = Self::new(points, closed)?;
        Ok(match origin {
            Some(offset) => seq.translated(offset),
            None => seq,
        })
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.points
    }

    /// Number of edges: `len` when closed, `len - 1` when open.
    pub fn edge_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Edges in order; closed sequences end with the wrap edge back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.points.len();
        (0..self.edge_count()).map(move |i| Edge::new(self.points[i], self.points[(i + 1) % n]))
    }

    pub fn perimeter_length(&self) -> f32 {
        self.edges().map(|e| e.length).sum()
    }

    /// Shoelace area, positive for counter-clockwise rings. Zero for open chains.
    pub fn signed_area(&self) -> f32 {
        if !self.closed {
            return 0.0;
        }
        0.5 * self.edges().map(|e| e.start.perp_dot(e.end)).sum::<f32>()
    }

    /// Whether the edges' right-hand side is the outside. Open chains have no
    /// inside and count as counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        self.signed_area() >= 0.0
    }

    pub fn bounds(&self) -> Aabb {
        // Non-empty by construction.
        Aabb::from_points(&self.points).unwrap_or(Aabb::new(Vec2::ZERO, Vec2::ZERO))
    }

    /// Copy of this sequence moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
            closed: self.closed,
        }
    }

    /// Builds a sequence without re-validating. Used for derived sequences whose
    /// vertex correspondence must be kept even if vertices collapse.
    pub(crate) fn from_parts_unchecked(points: Vec<Vec2>, closed: bool) -> Self {
        Self { points, closed }
    }
}

impl PointContainment for BoundarySequence {
    fn contains_point(&self, point: Vec2) -> bool {
        self.closed && polygon_contains(&self.points, point)
    }
}
