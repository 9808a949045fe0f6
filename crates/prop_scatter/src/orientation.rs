//! Facing cones: whether a surface normal is acceptable for a prop, and random
//! facings within a prop's jitter range.
use glam::Vec2;
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{rotate_ccw, rotate_cw};
use crate::sampling::rand_range;

pub const DEFAULT_SURFACE_NORMAL_RANGE_DEG: f32 = 10.0;
pub const DEFAULT_POINT_DIRECTION_RANGE_DEG: f32 = 15.0;

/// Angular limits of one prop kind, both as half-angles in degrees.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationConstraint {
    /// Cone around the default facing in which surface normals are accepted.
    /// `0` disables surface placement, `180` accepts anything.
    pub surface_normal_range_deg: f32,
    /// Jitter applied when generating a facing.
    pub point_direction_range_deg: f32,
}

impl Default for OrientationConstraint {
    fn default() -> Self {
        Self {
            surface_normal_range_deg: DEFAULT_SURFACE_NORMAL_RANGE_DEG,
            point_direction_range_deg: DEFAULT_POINT_DIRECTION_RANGE_DEG,
        }
    }
}

impl OrientationConstraint {
    pub fn new(surface_normal_range_deg: f32, point_direction_range_deg: f32) -> Self {
        Self {
            surface_normal_range_deg,
            point_direction_range_deg,
        }
    }

    /// Accepts every normal and never jitters.
    pub fn unconstrained() -> Self {
        Self::new(180.0, 0.0)
    }

    pub fn with_surface_normal_range(mut self, deg: f32) -> Self {
        self.surface_normal_range_deg = deg;
        self
    }

    pub fn with_point_direction_range(mut self, deg: f32) -> Self {
        self.point_direction_range_deg = deg;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("surface_normal_range_deg", self.surface_normal_range_deg),
            ("point_direction_range_deg", self.point_direction_range_deg),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within [0, 180], got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn accepts_normal(&self, surface_normal: Vec2, default_facing: Vec2) -> bool {
        can_accept_normal(
            surface_normal,
            default_facing,
            self.surface_normal_range_deg,
        )
    }

    pub fn facing_for<R: RngCore + ?Sized>(
        &self,
        target: Option<Vec2>,
        current_facing: Vec2,
        rng: &mut R,
    ) -> Vec2 {
        generate_facing(
            target,
            current_facing,
            self.point_direction_range_deg,
            rng,
        )
    }
}

/// How an accepted placement derives its facing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Face along the surface normal (jittered). Area placements keep the default.
    #[default]
    PointToSurfaceNormal,
    /// Jitter the default facing and mirror it toward the surface normal's side.
    KeepDefault,
}

/// Whether `surface_normal` lies within `half_angle_deg` of `default_facing`, or of
/// its left/right mirror image when the facing has a horizontal component.
pub fn can_accept_normal(surface_normal: Vec2, default_facing: Vec2, half_angle_deg: f32) -> bool {
    if half_angle_deg.is_nan() || half_angle_deg <= 0.0 {
        return false;
    }
    if half_angle_deg >= 180.0 {
        return true;
    }
    let (Some(facing), Some(normal)) = (
        default_facing.try_normalize(),
        surface_normal.try_normalize(),
    ) else {
        return false;
    };

    let threshold = facing.dot(rotate_ccw(facing, half_angle_deg));
    if facing.dot(normal) >= threshold {
        return true;
    }
    if facing.x != 0.0 {
        let mirrored = Vec2::new(-facing.x, facing.y);
        return mirrored.dot(normal) >= threshold;
    }
    false
}

/// Normalized `target` (or `current_facing` when absent or zero) rotated by a
/// uniform angle in `[-range_deg, range_deg]`.
pub fn generate_facing<R: RngCore + ?Sized>(
    target: Option<Vec2>,
    current_facing: Vec2,
    range_deg: f32,
    rng: &mut R,
) -> Vec2 {
    let base = target
        .and_then(Vec2::try_normalize)
        .unwrap_or(current_facing);
    if range_deg.is_nan() || range_deg <= 0.0 {
        return base;
    }
    let offset = rand_range(rng, -range_deg, range_deg);
    rotate_cw(base, offset)
}

/// Flips the horizontal component of `facing` onto the side `normal` points to.
/// A zero horizontal normal counts as pointing right.
pub fn mirror_toward_normal(facing: Vec2, normal: Vec2) -> Vec2 {
    if normal.x < 0.0 {
        Vec2::new(-facing.x, facing.y)
    } else {
        facing
    }
}

/// Facing for a placement with optional `surface_normal` under `mode`.
pub fn resolve_facing<R: RngCore + ?Sized>(
    mode: FacingMode,
    constraint: &OrientationConstraint,
    default_facing: Vec2,
    surface_normal: Option<Vec2>,
    rng: &mut R,
) -> Vec2 {
    match mode {
        FacingMode::PointToSurfaceNormal => {
            constraint.facing_for(surface_normal, default_facing, rng)
        }
        FacingMode::KeepDefault => {
            let facing = constraint.facing_for(None, default_facing, rng);
            match surface_normal {
                Some(n) => mirror_toward_normal(facing, n),
                None => facing,
            }
        }
    }
}
