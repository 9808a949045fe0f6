//! Planar geometry helpers and the geometry-query seams used by placement.
//!
//! The engine never owns a physics system. Surface casts and containment tests go
//! through [`RayCaster`] and [`PointContainment`], which the host tool implements on
//! top of its own collision data. [`ColliderSet`] is a small segment-based
//! implementation for hosts without one (and for tests and benches).
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::BoundarySequence;

/// Rotate `v` counter-clockwise by `deg` degrees.
#[inline]
pub fn rotate_ccw(v: Vec2, deg: f32) -> Vec2 {
    let (sin, cos) = deg.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rotate `v` clockwise by `deg` degrees.
#[inline]
pub fn rotate_cw(v: Vec2, deg: f32) -> Vec2 {
    rotate_ccw(v, -deg)
}

/// Perpendicular on the right-hand side of travel along `dir`.
///
/// For counter-clockwise polygons this points outward.
#[inline]
pub fn right_normal(dir: Vec2) -> Vec2 {
    Vec2::new(dir.y, -dir.x)
}

/// Axis-aligned box given by its center and half-size.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, extents: Vec2) -> Self {
        Self { center, extents }
    }

    /// Smallest box containing all `points`. Returns `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(Self {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        })
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.extents
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.extents.x && d.y <= self.extents.y
    }
}

/// Bit mask selecting which collider layers a cast may hit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing a single layer. Layers above 31 produce an empty mask.
    pub fn from_layer(layer: u8) -> Self {
        Self(1u32.checked_shl(layer as u32).unwrap_or(0))
    }

    pub fn with_layer(self, layer: u8) -> Self {
        Self(self.0 | Self::from_layer(layer).0)
    }

    pub fn contains_layer(&self, layer: u8) -> bool {
        self.0 & Self::from_layer(layer).0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Opaque identity of a collider owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u32);

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub direction: Vec2,
}

impl Ray {
    /// Creates a ray, normalizing `direction`. Returns `None` for a zero direction.
    pub fn new(origin: Vec2, direction: Vec2) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, distance: f32) -> Vec2 {
        self.origin + self.direction * distance
    }
}

/// Nearest intersection reported by a [`RayCaster`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Intersection point.
    pub point: Vec2,
    /// Unit surface normal facing back toward the ray origin.
    pub normal: Vec2,
    /// Distance from the ray origin.
    pub distance: f32,
    /// Collider that was hit.
    pub collider: ColliderId,
}

/// Host capability: cast a ray against collision geometry.
pub trait RayCaster {
    /// Returns the nearest hit within `max_distance` on a layer in `mask`.
    ///
    /// Implementations report the normal facing back toward the ray origin.
    fn cast_ray(&self, ray: Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit>;
}

/// Host capability: test whether a point lies inside an area.
pub trait PointContainment {
    fn contains_point(&self, point: Vec2) -> bool;
}

impl<F> PointContainment for F
where
    F: Fn(Vec2) -> bool,
{
    fn contains_point(&self, point: Vec2) -> bool {
        self(point)
    }
}

/// Even-odd point-in-polygon test over a closed vertex ring.
pub fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Intersect `ray` with segment `a`-`b`. Returns the distance along the ray.
pub(crate) fn ray_segment_distance(ray: &Ray, a: Vec2, b: Vec2) -> Option<f32> {
    let edge = b - a;
    let denom = ray.direction.perp_dot(edge);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let to_a = a - ray.origin;
    let t = to_a.perp_dot(edge) / denom;
    let u = to_a.perp_dot(ray.direction) / denom;
    if t >= 0.0 && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// A collider made of boundary segments.
#[derive(Debug, Clone)]
pub struct Collider {
    pub id: ColliderId,
    /// Layer index in `0..32`.
    pub layer: u8,
    pub boundary: BoundarySequence,
}

/// Segment-soup [`RayCaster`] over a list of boundary colliders.
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    colliders: Vec<Collider>,
    next_id: u32,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collider on `layer` and returns its id.
    pub fn insert(&mut self, boundary: BoundarySequence, layer: u8) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider {
            id,
            layer,
            boundary,
        });
        id
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl RayCaster for ColliderSet {
    fn cast_ray(&self, ray: Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for collider in self
            .colliders
            .iter()
            .filter(|c| mask.contains_layer(c.layer))
        {
            for edge in collider.boundary.edges() {
                let Some(t) = ray_segment_distance(&ray, edge.start, edge.end) else {
                    continue;
                };
                if t > max_distance || best.is_some_and(|b| b.distance <= t) {
                    continue;
                }
                let mut normal = right_normal(edge.direction());
                if normal.dot(ray.direction) > 0.0 {
                    normal = -normal;
                }
                best = Some(RayHit {
                    point: ray.at(t),
                    normal,
                    distance: t,
                    collider: collider.id,
                });
            }
        }
        best
    }
}
