//! Surface point resolution: snapping candidates onto collider surfaces.
//!
//! Three strategies share the [`RayCaster`] seam:
//! - [`resolve_from_offset`] / [`OffsetResolver`]: cast from a point on an offset
//!   copy of a boundary back toward the original boundary.
//! - [`resolve_by_trial_rays`]: when no clean offset geometry exists, fan out rotated
//!   casts from a candidate until one lands on another collider inside the area.
//! - [`cast_ring`]: the brush ring, one cast per angular division.
//!
//! Every failure is per candidate and reported as [`Error::NoHit`].
use glam::Vec2;
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::{BoundarySequence, Overshoot, PerimeterSampler};
use crate::error::{Error, Result};
use crate::geometry::{
    rotate_ccw, rotate_cw, ColliderId, LayerMask, PointContainment, Ray, RayCaster,
};
use crate::sampling::random_direction;

pub const DEFAULT_TRIAL_DIRECTIONS: usize = 12;
pub const DEFAULT_SEARCH_DISTANCE: f32 = 10.0;
/// Minimum number of rays in a brush ring.
pub const MIN_RING_DIVISIONS: usize = 48;

/// A resolved point on a collider surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub point: Vec2,
    /// Unit outward surface normal.
    pub normal: Vec2,
    pub collider: ColliderId,
}

/// Casts from `origin` toward a boundary known to lie `offset_distance` away.
///
/// `offset_distance` is signed against the boundary's outside: positive when `origin`
/// lies outside, negative when it lies inside. The cast is limited to twice its
/// magnitude. On the inner side the caster's normal faces inward; it is flipped so
/// the returned normal always points outward.
pub fn resolve_from_offset<C: RayCaster + ?Sized>(
    caster: &C,
    origin: Vec2,
    direction: Vec2,
    offset_distance: f32,
    mask: LayerMask,
) -> Result<SurfacePoint> {
    let ray = Ray::new(origin, direction).ok_or(Error::NoHit)?;
    let hit = caster
        .cast_ray(ray, 2.0 * offset_distance.abs(), mask)
        .ok_or(Error::NoHit)?;
    let normal = if offset_distance < 0.0 {
        -hit.normal
    } else {
        hit.normal
    };
    Ok(SurfacePoint {
        point: hit.point,
        normal,
        collider: hit.collider,
    })
}

/// A boundary paired with its offset copy, for resolving perimeter parameters.
#[derive(Debug, Clone)]
pub struct OffsetResolver {
    source: PerimeterSampler,
    offset: PerimeterSampler,
    distance: f32,
    /// `1.0` when the miter normals point outward, `-1.0` for clockwise rings.
    winding: f32,
}

impl OffsetResolver {
    /// Offsets `boundary` by `distance` along its miter normals. For clockwise rings
    /// a positive distance lands inside; the winding is kept so resolved normals
    /// still point outward.
    pub fn new(boundary: &BoundarySequence, distance: f32) -> Self {
        Self {
            source: PerimeterSampler::new(boundary),
            offset: PerimeterSampler::new(&boundary.offset(distance)),
            distance,
            winding: if boundary.is_ccw() { 1.0 } else { -1.0 },
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn source(&self) -> &PerimeterSampler {
        &self.source
    }

    /// Point on the offset boundary corresponding to parameter `t` on the source.
    ///
    /// Both boundaries share vertex indices, so the source edge index and fraction
    /// select the matching offset edge.
    pub fn offset_point(&self, t: f32, overshoot: Overshoot) -> (Vec2, Vec2) {
        let (index, local) = self.source.locate(t, overshoot);
        let from = self.offset.edges()[index].lerp(local);
        let to = self.source.edges()[index].lerp(local);
        (from, to)
    }

    /// Casts from the offset point at `t` back onto the source surface.
    pub fn resolve_at<C: RayCaster + ?Sized>(
        &self,
        t: f32,
        overshoot: Overshoot,
        caster: &C,
        mask: LayerMask,
    ) -> Result<SurfacePoint> {
        let (from, to) = self.offset_point(t, overshoot);
        resolve_from_offset(caster, from, to - from, self.distance * self.winding, mask)
    }
}

/// Settings for the trial-ray strategy.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSearch {
    /// Maximum cast length.
    pub search_distance: f32,
    /// Number of evenly rotated casts to try.
    pub trial_directions: usize,
    /// Layers the casts may hit.
    pub mask: LayerMask,
}

impl Default for SurfaceSearch {
    fn default() -> Self {
        Self {
            search_distance: DEFAULT_SEARCH_DISTANCE,
            trial_directions: DEFAULT_TRIAL_DIRECTIONS,
            mask: LayerMask::ALL,
        }
    }
}

impl SurfaceSearch {
    pub fn with_search_distance(mut self, search_distance: f32) -> Self {
        self.search_distance = search_distance;
        self
    }

    pub fn with_trial_directions(mut self, trial_directions: usize) -> Self {
        self.trial_directions = trial_directions;
        self
    }

    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.search_distance.is_finite() || self.search_distance <= 0.0 {
            return Err(Error::InvalidConfig("search_distance must be > 0".into()));
        }
        if self.trial_directions == 0 {
            return Err(Error::InvalidConfig("trial_directions must be >= 1".into()));
        }
        Ok(())
    }
}

/// Fans out casts from `origin` around one random initial direction.
///
/// Each attempt rotates clockwise by `360° / trial_directions`. The first hit that
/// is not on `source` (the area's own collider) and lies inside `area` wins.
pub fn resolve_by_trial_rays<C, A, R>(
    caster: &C,
    area: &A,
    source: Option<ColliderId>,
    origin: Vec2,
    search: &SurfaceSearch,
    rng: &mut R,
) -> Result<SurfacePoint>
where
    C: RayCaster + ?Sized,
    A: PointContainment + ?Sized,
    R: RngCore + ?Sized,
{
    let trials = search.trial_directions.max(1);
    let step = 360.0 / trials as f32;
    let initial = random_direction(rng);

    for attempt in 0..trials {
        let Some(ray) = Ray::new(origin, rotate_cw(initial, attempt as f32 * step)) else {
            continue;
        };
        let Some(hit) = caster.cast_ray(ray, search.search_distance, search.mask) else {
            continue;
        };
        if Some(hit.collider) == source || !area.contains_point(hit.point) {
            continue;
        }
        return Ok(SurfacePoint {
            point: hit.point,
            normal: hit.normal,
            collider: hit.collider,
        });
    }

    Err(Error::NoHit)
}

/// Ray count for a brush ring of `radius`.
pub fn ring_divisions(radius: f32) -> usize {
    let scaled = (radius.max(0.0) * 0.85).round() as usize;
    scaled.max(MIN_RING_DIVISIONS)
}

/// Casts `divisions` rays of length `radius` from `center`, starting at +y and
/// turning counter-clockwise. `phase` shifts the ring by a fraction of a division.
pub fn cast_ring<C: RayCaster + ?Sized>(
    caster: &C,
    center: Vec2,
    radius: f32,
    divisions: usize,
    phase: f32,
    mask: LayerMask,
) -> Vec<SurfacePoint> {
    if divisions == 0 || radius <= 0.0 {
        return Vec::new();
    }
    let step = 360.0 / divisions as f32;
    (0..divisions)
        .filter_map(|i| {
            let dir = rotate_ccw(Vec2::Y, (i as f32 + phase) * step);
            let ray = Ray::new(center, dir)?;
            caster.cast_ray(ray, radius, mask)
        })
        .map(|hit| SurfacePoint {
            point: hit.point,
            normal: hit.normal,
            collider: hit.collider,
        })
        .collect()
}
