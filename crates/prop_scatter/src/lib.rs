#![forbid(unsafe_code)]
//! prop_scatter: constraint-driven prop placement over 2D areas and boundaries.
//!
//! Modules:
//! - boundary: area descriptors, boundary sequences, offsetting and arc-length sampling
//! - sampling: candidate generation (area, brush disc, perimeter)
//! - surface: snapping candidates onto collider surfaces
//! - spacing: instance registry and minimum-distance rules
//! - orientation: facing cones and facing generation
//! - placement: kinds, placement decisions, scatter runner, brush dabs, events
//!
//! Geometry queries go through [`geometry::RayCaster`] and
//! [`geometry::PointContainment`], implemented by the host tool.
pub mod boundary;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod placement;
pub mod sampling;
pub mod spacing;
pub mod surface;

/// Convenient re-exports for common types. Import with `use prop_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::boundary::{
        sample_perimeter, AreaDescriptor, BoundarySequence, Edge, Overshoot, PerimeterSampler,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{
        Aabb, ColliderId, ColliderSet, LayerMask, PointContainment, Ray, RayCaster, RayHit,
    };
    pub use crate::orientation::{
        can_accept_normal, generate_facing, FacingMode, OrientationConstraint,
    };
    pub use crate::placement::config::{BrushConfig, BrushTarget, ScatterConfig, ScatterMode};
    pub use crate::placement::events::{EventSink, FnSink, ScatterEvent, VecSink};
    pub use crate::placement::runner::{ScatterArea, ScatterResult, ScatterRunner};
    pub use crate::placement::selection::pick_weighted_random;
    pub use crate::placement::{
        commit, try_place, Placement, PlacementCandidate, PlacementDecision, PropKind,
        RejectReason,
    };
    pub use crate::sampling::{
        AreaSampling, DiskSampling, PerimeterSample, PerimeterSampling, PositionSampling,
    };
    pub use crate::spacing::{
        CategoryId, InstanceId, InstanceRegistry, PlacedInstance, SpacingRule, SpacingVerdict,
    };
    pub use crate::surface::{
        cast_ring, resolve_by_trial_rays, resolve_from_offset, OffsetResolver, SurfacePoint,
        SurfaceSearch,
    };
}
