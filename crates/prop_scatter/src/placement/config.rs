//! Fully resolved settings for scatter runs and brush dabs.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::LayerMask;
use crate::orientation::FacingMode;
use crate::surface::SurfaceSearch;

pub const DEFAULT_SCATTER_ATTEMPTS: usize = 300;
pub const DEFAULT_BRUSH_SIZE: f32 = 5.0;
pub const DEFAULT_BRUSH_SPAWN_RATE: u32 = 2;
pub const MAX_BRUSH_SPAWN_RATE: u32 = 100;
/// Relative brush size change per resize step.
pub const BRUSH_RESIZE_STEP: f32 = 0.05;

/// Where scatter candidates come from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScatterMode {
    /// Uniform points inside the area, kept if the area contains them.
    #[default]
    Area,
    /// Uniform points inside the area's bounds, moved onto the nearest surface found
    /// by trial rays.
    Surface(SurfaceSearch),
    /// Random points along the area's boundary, resolved onto the collider surface
    /// by casting back from the boundary offset by `offset` along its miter normals.
    /// Resolved normals point outward for either winding.
    Perimeter { offset: f32, mask: LayerMask },
}

impl ScatterMode {
    pub fn name(&self) -> &'static str {
        match self {
            ScatterMode::Area => "area",
            ScatterMode::Surface(_) => "surface",
            ScatterMode::Perimeter { .. } => "perimeter",
        }
    }

    pub fn places_on_surfaces(&self) -> bool {
        !matches!(self, ScatterMode::Area)
    }
}

/// Configuration for a scatter run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterConfig {
    /// Number of candidates drawn per run.
    pub attempts: usize,
    /// Candidate source.
    pub mode: ScatterMode,
    /// How accepted surface placements are oriented.
    pub facing_mode: FacingMode,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_SCATTER_ATTEMPTS,
            mode: ScatterMode::Area,
            facing_mode: FacingMode::default(),
        }
    }
}

impl ScatterConfig {
    pub fn new(mode: ScatterMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Sets the number of candidates drawn per run.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_mode(mut self, mode: ScatterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_facing_mode(mut self, facing_mode: FacingMode) -> Self {
        self.facing_mode = facing_mode;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        match &self.mode {
            ScatterMode::Area => {}
            ScatterMode::Surface(search) => search.validate()?,
            ScatterMode::Perimeter { offset, .. } => {
                if !offset.is_finite() || *offset == 0.0 {
                    return Err(Error::InvalidConfig(
                        "perimeter offset must be finite and non-zero".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// What a brush dab targets.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushTarget {
    /// Random points inside the brush disc.
    #[default]
    Area,
    /// Surfaces on `mask` crossed by a ring of rays around the brush center.
    Surfaces(LayerMask),
}

/// Configuration for brush dabs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushConfig {
    /// Brush radius in world units.
    pub size: f32,
    /// Candidates tried per dab, within `1..=100`.
    pub spawn_rate: u32,
    pub target: BrushTarget,
    pub facing_mode: FacingMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            spawn_rate: DEFAULT_BRUSH_SPAWN_RATE,
            target: BrushTarget::Area,
            facing_mode: FacingMode::default(),
        }
    }
}

impl BrushConfig {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Sets the spawn rate, clamped into `1..=100`.
    pub fn with_spawn_rate(mut self, spawn_rate: u32) -> Self {
        self.spawn_rate = spawn_rate.clamp(1, MAX_BRUSH_SPAWN_RATE);
        self
    }

    pub fn with_target(mut self, target: BrushTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_facing_mode(mut self, facing_mode: FacingMode) -> Self {
        self.facing_mode = facing_mode;
        self
    }

    /// Grows the brush by one step for a positive `direction` (e.g. a scroll delta)
    /// and shrinks it for a negative one.
    pub fn resize(&mut self, direction: f32) {
        if direction == 0.0 || direction.is_nan() {
            return;
        }
        self.size *= 1.0 + direction.signum() * BRUSH_RESIZE_STEP;
    }

    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(Error::InvalidConfig("brush size must be > 0".into()));
        }
        if !(1..=MAX_BRUSH_SPAWN_RATE).contains(&self.spawn_rate) {
            return Err(Error::InvalidConfig(format!(
                "brush spawn_rate must be within 1..={MAX_BRUSH_SPAWN_RATE}, got {}",
                self.spawn_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tool_settings() {
        let c = ScatterConfig::default();
        assert_eq!(c.attempts, 300);
        assert_eq!(c.mode, ScatterMode::Area);
        assert!(c.validate().is_ok());

        let b = BrushConfig::default();
        assert_eq!(b.size, 5.0);
        assert_eq!(b.spawn_rate, 2);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn spawn_rate_is_clamped() {
        assert_eq!(BrushConfig::default().with_spawn_rate(0).spawn_rate, 1);
        assert_eq!(BrushConfig::default().with_spawn_rate(500).spawn_rate, 100);
        let raw = BrushConfig {
            spawn_rate: 0,
            ..Default::default()
        };
        assert!(raw.validate().is_err());
    }

    #[test]
    fn resize_steps_by_five_percent() {
        let mut b = BrushConfig::new(10.0);
        b.resize(1.0);
        assert!((b.size - 10.5).abs() < 1e-5);
        b.resize(-3.0);
        assert!((b.size - 9.975).abs() < 1e-4);
        b.resize(0.0);
        assert!((b.size - 9.975).abs() < 1e-4);
    }

    #[test]
    fn invalid_modes_are_rejected() {
        let perimeter = ScatterConfig::new(ScatterMode::Perimeter {
            offset: 0.0,
            mask: LayerMask::ALL,
        });
        assert!(matches!(perimeter.validate(), Err(Error::InvalidConfig(_))));

        let surface = ScatterConfig::new(ScatterMode::Surface(
            SurfaceSearch::default().with_trial_directions(0),
        ));
        assert!(surface.validate().is_err());
        assert!(ScatterConfig::new(ScatterMode::Surface(SurfaceSearch::default()))
            .validate()
            .is_ok());
        assert!(BrushConfig::new(f32::NAN).validate().is_err());
    }

    #[test]
    fn mode_names() {
        assert_eq!(ScatterMode::Area.name(), "area");
        assert!(!ScatterMode::Area.places_on_surfaces());
        assert!(ScatterMode::Surface(SurfaceSearch::default()).places_on_surfaces());
    }
}
