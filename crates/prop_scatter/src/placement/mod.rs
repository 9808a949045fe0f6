//! Placement pipeline: candidate → spacing → orientation → commit.
//!
//! [`try_place`] and [`commit`] expose the individual decision so a host can drive
//! its own candidate source; [`runner::ScatterRunner`] runs the whole loop for area,
//! surface and perimeter scatter and for brush dabs.
use std::fmt;

use glam::Vec2;
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::orientation::{resolve_facing, FacingMode, OrientationConstraint};
use crate::spacing::{
    CategoryId, InstanceId, InstanceRegistry, PlacedInstance, SpacingRule, SpacingVerdict,
};

pub mod config;
pub mod events;
pub mod runner;
pub mod selection;

/// A prop template: identity, spacing, orientation limits and pool weight.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PropKind {
    /// Category shared by all instances of this kind.
    pub id: CategoryId,
    pub spacing: SpacingRule,
    pub orientation: OrientationConstraint,
    /// Facing of the unrotated asset.
    pub default_facing: Vec2,
    /// Relative draw weight in a pool of kinds.
    pub weight: f32,
}

impl PropKind {
    pub fn new(id: impl Into<CategoryId>) -> Self {
        Self {
            id: id.into(),
            spacing: SpacingRule::default(),
            orientation: OrientationConstraint::default(),
            default_facing: Vec2::Y,
            weight: 1.0,
        }
    }

    pub fn with_spacing(mut self, spacing: SpacingRule) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_orientation(mut self, orientation: OrientationConstraint) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_default_facing(mut self, default_facing: Vec2) -> Self {
        self.default_facing = default_facing;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.spacing.validate()?;
        self.orientation.validate()?;
        if self.default_facing.try_normalize().is_none() {
            return Err(Error::InvalidConfig(format!(
                "kind '{}' needs a non-zero default facing",
                self.id
            )));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "kind '{}' weight must be finite and >= 0",
                self.id
            )));
        }
        Ok(())
    }
}

/// A tentative placement position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementCandidate {
    pub position: Vec2,
    /// Present when the candidate lies on a surface.
    pub surface_normal: Option<Vec2>,
}

impl PlacementCandidate {
    pub fn area(position: Vec2) -> Self {
        Self {
            position,
            surface_normal: None,
        }
    }

    pub fn on_surface(position: Vec2, surface_normal: Vec2) -> Self {
        Self {
            position,
            surface_normal: Some(surface_normal),
        }
    }
}

/// An accepted placement returned to the host for instantiation.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Registry handle, set once the placement is committed.
    pub instance: Option<InstanceId>,
    pub kind_id: CategoryId,
    pub position: Vec2,
    /// Unit facing the instance should be rotated to.
    pub facing: Vec2,
    pub surface_normal: Option<Vec2>,
}

/// Why a candidate was discarded.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    /// The candidate fell outside the scatter area.
    OutsideArea,
    /// No surface was found for the candidate.
    NoSurface,
    /// No kind in the pool could be drawn.
    NoKind,
    /// Too close to an instance of the same kind.
    TooCloseToSame,
    /// Too close to an instance of another kind.
    TooCloseToOther,
    /// The surface normal lies outside the kind's facing cone.
    NormalOutOfRange,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::OutsideArea => "outside_area",
            RejectReason::NoSurface => "no_surface",
            RejectReason::NoKind => "no_kind",
            RejectReason::TooCloseToSame => "too_close_to_same",
            RejectReason::TooCloseToOther => "too_close_to_other",
            RejectReason::NormalOutOfRange => "normal_out_of_range",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`try_place`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementDecision {
    Accepted(Placement),
    Rejected(RejectReason),
}

impl PlacementDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PlacementDecision::Accepted(_))
    }
}

/// Decides whether `kind` may be placed at `candidate`.
///
/// Checks spacing against `registry` first, then the surface normal (if any)
/// against the kind's facing cone, and finally generates the facing. Nothing is
/// registered; call [`commit`] once the host has instantiated the prop.
pub fn try_place<R: RngCore + ?Sized>(
    registry: &InstanceRegistry,
    kind: &PropKind,
    candidate: PlacementCandidate,
    facing_mode: FacingMode,
    rng: &mut R,
) -> PlacementDecision {
    match registry.check_rule(candidate.position, &kind.id, &kind.spacing) {
        SpacingVerdict::Clear => {}
        SpacingVerdict::TooCloseToSame { .. } => {
            return PlacementDecision::Rejected(RejectReason::TooCloseToSame)
        }
        SpacingVerdict::TooCloseToOther { .. } => {
            return PlacementDecision::Rejected(RejectReason::TooCloseToOther)
        }
    }

    if let Some(normal) = candidate.surface_normal {
        if !kind.orientation.accepts_normal(normal, kind.default_facing) {
            return PlacementDecision::Rejected(RejectReason::NormalOutOfRange);
        }
    }

    let facing = resolve_facing(
        facing_mode,
        &kind.orientation,
        kind.default_facing,
        candidate.surface_normal,
        rng,
    );

    PlacementDecision::Accepted(Placement {
        instance: None,
        kind_id: kind.id.clone(),
        position: candidate.position,
        facing,
        surface_normal: candidate.surface_normal,
    })
}

/// Registers an accepted placement and stores the handle on it.
pub fn commit(
    registry: &mut InstanceRegistry,
    kind: &PropKind,
    placement: &mut Placement,
) -> InstanceId {
    let id = registry.register(PlacedInstance::new(
        placement.position,
        kind.id.clone(),
        kind.spacing,
    ));
    placement.instance = Some(id);
    id
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rock() -> PropKind {
        PropKind::new("rock")
            .with_spacing(SpacingRule::new(2.0, 0.0))
            .with_orientation(OrientationConstraint::new(30.0, 0.0))
    }

    #[test]
    fn accepted_then_committed_blocks_neighbors() {
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        let kind = rock();

        let decision = try_place(
            &registry,
            &kind,
            PlacementCandidate::area(Vec2::ZERO),
            FacingMode::default(),
            &mut rng,
        );
        let PlacementDecision::Accepted(mut placement) = decision else {
            panic!("expected acceptance, got {decision:?}");
        };
        assert!(placement.instance.is_none());
        assert_eq!(placement.facing, Vec2::Y);

        let id = commit(&mut registry, &kind, &mut placement);
        assert_eq!(placement.instance, Some(id));
        assert_eq!(registry.len(), 1);

        let again = try_place(
            &registry,
            &kind,
            PlacementCandidate::area(Vec2::new(1.0, 0.0)),
            FacingMode::default(),
            &mut rng,
        );
        assert_eq!(again, PlacementDecision::Rejected(RejectReason::TooCloseToSame));
    }

    #[test]
    fn other_kind_respects_neighbor_clearance() {
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(2);
        let tree = PropKind::new("tree").with_spacing(SpacingRule::new(1.0, 4.0));
        let mut p = match try_place(
            &registry,
            &tree,
            PlacementCandidate::area(Vec2::ZERO),
            FacingMode::default(),
            &mut rng,
        ) {
            PlacementDecision::Accepted(p) => p,
            other => panic!("unexpected {other:?}"),
        };
        commit(&mut registry, &tree, &mut p);

        let decision = try_place(
            &registry,
            &rock(),
            PlacementCandidate::area(Vec2::new(3.0, 0.0)),
            FacingMode::default(),
            &mut rng,
        );
        assert_eq!(
            decision,
            PlacementDecision::Rejected(RejectReason::TooCloseToOther)
        );
    }

    #[test]
    fn surface_normal_must_fit_the_cone() {
        let registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(3);
        let kind = rock();

        let floor = try_place(
            &registry,
            &kind,
            PlacementCandidate::on_surface(Vec2::ZERO, Vec2::Y),
            FacingMode::PointToSurfaceNormal,
            &mut rng,
        );
        assert!(floor.is_accepted());

        let ceiling = try_place(
            &registry,
            &kind,
            PlacementCandidate::on_surface(Vec2::ZERO, -Vec2::Y),
            FacingMode::PointToSurfaceNormal,
            &mut rng,
        );
        assert_eq!(
            ceiling,
            PlacementDecision::Rejected(RejectReason::NormalOutOfRange)
        );
    }

    #[test]
    fn facing_points_along_accepted_normal() {
        let registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(4);
        let slope = Vec2::new(0.3, 1.0).normalize();
        let decision = try_place(
            &registry,
            &rock(),
            PlacementCandidate::on_surface(Vec2::ZERO, slope),
            FacingMode::PointToSurfaceNormal,
            &mut rng,
        );
        match decision {
            PlacementDecision::Accepted(p) => {
                assert!((p.facing - slope).length() < 1e-5);
                assert_eq!(p.surface_normal, Some(slope));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn kind_validation() {
        assert!(rock().validate().is_ok());
        assert!(rock().with_default_facing(Vec2::ZERO).validate().is_err());
        assert!(rock().with_weight(-1.0).validate().is_err());
        assert!(rock()
            .with_orientation(OrientationConstraint::new(200.0, 0.0))
            .validate()
            .is_err());
        assert_eq!(RejectReason::NoSurface.to_string(), "no_surface");
    }
}
