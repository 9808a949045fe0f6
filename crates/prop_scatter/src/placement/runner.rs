//! High-level runner for scatter operations and brush dabs.
use std::collections::BTreeMap;

use glam::Vec2;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::boundary::{AreaDescriptor, BoundarySequence, Overshoot};
use crate::error::Result;
use crate::geometry::{Aabb, ColliderId, LayerMask, PointContainment, RayCaster};
use crate::orientation::FacingMode;
use crate::placement::config::{BrushConfig, BrushTarget, ScatterConfig, ScatterMode};
use crate::placement::events::{EventSink, ScatterEvent};
use crate::placement::selection::pick_weighted_random;
use crate::placement::{
    commit, try_place, Placement, PlacementCandidate, PlacementDecision, PropKind, RejectReason,
};
use crate::sampling::{rand01, AreaSampling, DiskSampling, PerimeterSampling};
use crate::spacing::InstanceRegistry;
use crate::surface::{
    cast_ring, resolve_by_trial_rays, ring_divisions, OffsetResolver, SurfaceSearch,
};

/// The area a scatter run fills, placed in the world at `origin`.
#[derive(Debug, Clone, Copy)]
pub struct ScatterArea<'a> {
    pub descriptor: &'a AreaDescriptor,
    /// World position of the descriptor's local origin.
    pub origin: Vec2,
    /// The area's own collider, skipped by surface searches.
    pub collider: Option<ColliderId>,
}

impl<'a> ScatterArea<'a> {
    pub fn new(descriptor: &'a AreaDescriptor) -> Self {
        Self {
            descriptor,
            origin: Vec2::ZERO,
            collider: None,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_collider(mut self, collider: ColliderId) -> Self {
        self.collider = Some(collider);
        self
    }

    /// World-space bounding box.
    pub fn bounds(&self) -> Aabb {
        let local = self.descriptor.bounds();
        Aabb::new(local.center + self.origin, local.extents)
    }

    /// World-space boundary.
    pub fn boundary(&self) -> Result<BoundarySequence> {
        BoundarySequence::from_descriptor(self.descriptor, Some(self.origin))
    }
}

impl PointContainment for ScatterArea<'_> {
    fn contains_point(&self, point: Vec2) -> bool {
        self.descriptor.contains_point(point - self.origin)
    }
}

/// Result of a scatter run or brush dab.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct ScatterResult {
    /// Committed placements, in order.
    pub placements: Vec<Placement>,
    /// Candidates drawn.
    pub attempts: usize,
    /// Candidates discarded.
    pub rejected: usize,
    /// Discarded candidates per reason.
    pub rejections: BTreeMap<RejectReason, usize>,
}

impl ScatterResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed(&self) -> usize {
        self.placements.len()
    }

    pub fn rejected_for(&self, reason: RejectReason) -> usize {
        self.rejections.get(&reason).copied().unwrap_or(0)
    }

    fn record_rejection(&mut self, reason: RejectReason) {
        self.rejected += 1;
        *self.rejections.entry(reason).or_insert(0) += 1;
    }
}

/// A drawn candidate, or the reason none could be produced.
#[derive(Debug, Clone, Copy)]
enum Drawn {
    Candidate(PlacementCandidate),
    Rejected {
        position: Option<Vec2>,
        reason: RejectReason,
    },
}

impl Drawn {
    fn rejected(position: Option<Vec2>, reason: RejectReason) -> Self {
        Drawn::Rejected { position, reason }
    }
}

/// Runs scatter operations for a pool of kinds against one [`RayCaster`].
pub struct ScatterRunner<'a, C: RayCaster + ?Sized> {
    /// Run configuration applied to this runner.
    pub config: ScatterConfig,
    /// Kinds drawn per candidate, weighted by [`PropKind::weight`].
    pub kinds: &'a [PropKind],
    /// Collision geometry used for surface placement.
    pub caster: &'a C,
}

impl<'a, C: RayCaster + ?Sized> ScatterRunner<'a, C> {
    pub fn try_new(config: ScatterConfig, kinds: &'a [PropKind], caster: &'a C) -> Result<Self> {
        config.validate()?;
        for kind in kinds {
            kind.validate()?;
        }
        Ok(Self {
            config,
            kinds,
            caster,
        })
    }

    pub fn new(config: ScatterConfig, kinds: &'a [PropKind], caster: &'a C) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid scatter config");
        debug_assert!(
            kinds.iter().all(|k| k.validate().is_ok()),
            "invalid prop kind"
        );

        Self {
            config,
            kinds,
            caster,
        }
    }

    /// Scatters over `area`, registering every placement in `registry`.
    pub fn run<R: RngCore + ?Sized>(
        &self,
        area: &ScatterArea<'_>,
        registry: &mut InstanceRegistry,
        rng: &mut R,
    ) -> ScatterResult {
        self.run_with_events(area, registry, rng, &mut ())
    }

    pub fn run_with_events<R: RngCore + ?Sized>(
        &self,
        area: &ScatterArea<'_>,
        registry: &mut InstanceRegistry,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> ScatterResult {
        sink.send(ScatterEvent::RunStarted {
            config: self.config.clone(),
            kind_count: self.kinds.len(),
        });

        if self.kinds.is_empty() {
            return self.finish_without_kinds(sink);
        }

        let drawn = match self.config.mode {
            ScatterMode::Area => self.area_candidates(area, rng),
            ScatterMode::Surface(search) => self.surface_candidates(area, &search, rng),
            ScatterMode::Perimeter { offset, mask } => {
                self.perimeter_candidates(area, offset, mask, rng, sink)
            }
        };

        let result = self.place_all(drawn, self.config.facing_mode, registry, rng, sink);
        info!(
            "Scatter ({}) over {}: placed {} of {} candidates.",
            self.config.mode.name(),
            area.descriptor.shape_name(),
            result.placed(),
            result.attempts,
        );
        sink.send(ScatterEvent::RunFinished {
            result: result.clone(),
        });
        result
    }

    /// One brush dab at `center`. `phase` rotates the surface ring by a fraction of a
    /// division so consecutive dabs probe different angles.
    pub fn dab<R: RngCore + ?Sized>(
        &self,
        brush: &BrushConfig,
        center: Vec2,
        phase: f32,
        registry: &mut InstanceRegistry,
        rng: &mut R,
    ) -> Result<ScatterResult> {
        self.dab_with_events(brush, center, phase, registry, rng, &mut ())
    }

    pub fn dab_with_events<R: RngCore + ?Sized>(
        &self,
        brush: &BrushConfig,
        center: Vec2,
        phase: f32,
        registry: &mut InstanceRegistry,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<ScatterResult> {
        brush.validate()?;
        sink.send(ScatterEvent::RunStarted {
            config: self.config.clone(),
            kind_count: self.kinds.len(),
        });
        if self.kinds.is_empty() {
            return Ok(self.finish_without_kinds(sink));
        }

        let count = brush.spawn_rate as usize;
        let drawn: Vec<Drawn> = match brush.target {
            BrushTarget::Area => DiskSampling::new(center, brush.size, count)
                .sample(rng)
                .into_iter()
                .map(|p| Drawn::Candidate(PlacementCandidate::area(p)))
                .collect(),
            BrushTarget::Surfaces(mask) => {
                let divisions = ring_divisions(brush.size);
                let hits = cast_ring(self.caster, center, brush.size, divisions, phase, mask);
                if hits.is_empty() {
                    vec![Drawn::rejected(None, RejectReason::NoSurface); count]
                } else {
                    let last = hits.len() - 1;
                    (0..count)
                        .map(|_| {
                            let hit = hits[((rand01(rng) * hits.len() as f32) as usize).min(last)];
                            Drawn::Candidate(PlacementCandidate::on_surface(hit.point, hit.normal))
                        })
                        .collect()
                }
            }
        };

        let result = self.place_all(drawn, brush.facing_mode, registry, rng, sink);
        debug!(
            "Brush dab at {:?}: placed {} of {} candidates.",
            center,
            result.placed(),
            result.attempts,
        );
        sink.send(ScatterEvent::RunFinished {
            result: result.clone(),
        });
        Ok(result)
    }

    fn finish_without_kinds(&self, sink: &mut dyn EventSink) -> ScatterResult {
        warn!("Scatter has no prop kinds; skipping.");
        sink.send(ScatterEvent::Warning {
            context: "kinds".into(),
            message: "No prop kinds configured; skipping".into(),
        });
        let result = ScatterResult::new();
        sink.send(ScatterEvent::RunFinished {
            result: result.clone(),
        });
        result
    }

    fn area_candidates<R: RngCore + ?Sized>(
        &self,
        area: &ScatterArea<'_>,
        rng: &mut R,
    ) -> Vec<Drawn> {
        AreaSampling::from_bounds(area.bounds(), self.config.attempts)
            .iter(rng)
            .map(|p| {
                if area.contains_point(p) {
                    Drawn::Candidate(PlacementCandidate::area(p))
                } else {
                    Drawn::rejected(Some(p), RejectReason::OutsideArea)
                }
            })
            .collect()
    }

    fn surface_candidates<R: RngCore + ?Sized>(
        &self,
        area: &ScatterArea<'_>,
        search: &SurfaceSearch,
        rng: &mut R,
    ) -> Vec<Drawn> {
        let origins: Vec<Vec2> = AreaSampling::from_bounds(area.bounds(), self.config.attempts)
            .iter(rng)
            .collect();
        origins
            .into_iter()
            .map(|origin| {
                match resolve_by_trial_rays(self.caster, area, area.collider, origin, search, rng) {
                    Ok(sp) => Drawn::Candidate(PlacementCandidate::on_surface(sp.point, sp.normal)),
                    Err(_) => Drawn::rejected(Some(origin), RejectReason::NoSurface),
                }
            })
            .collect()
    }

    fn perimeter_candidates<R: RngCore + ?Sized>(
        &self,
        area: &ScatterArea<'_>,
        offset: f32,
        mask: LayerMask,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Vec<Drawn> {
        let boundary = match area.boundary() {
            Ok(boundary) => boundary,
            Err(e) => {
                warn!(
                    "Area '{}' has no usable boundary ({}); falling back to area scatter.",
                    area.descriptor.shape_name(),
                    e
                );
                sink.send(ScatterEvent::Warning {
                    context: format!("area:{}", area.descriptor.shape_name()),
                    message: format!("Perimeter scatter unavailable, using area scatter: {e}"),
                });
                return self.area_candidates(area, rng);
            }
        };

        let resolver = OffsetResolver::new(&boundary, offset);
        PerimeterSampling::new(self.config.attempts)
            .sample(resolver.source(), rng)
            .into_iter()
            .map(
                |s| match resolver.resolve_at(s.t, Overshoot::Cyclic, self.caster, mask) {
                    Ok(sp) => Drawn::Candidate(PlacementCandidate::on_surface(sp.point, sp.normal)),
                    Err(_) => Drawn::rejected(Some(s.position), RejectReason::NoSurface),
                },
            )
            .collect()
    }

    fn place_all<R: RngCore + ?Sized>(
        &self,
        drawn: Vec<Drawn>,
        facing_mode: FacingMode,
        registry: &mut InstanceRegistry,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> ScatterResult {
        let mut result = ScatterResult::new();
        result.attempts = drawn.len();

        for d in drawn {
            let (position, reason) = match d {
                Drawn::Rejected { position, reason } => (position, reason),
                Drawn::Candidate(candidate) => {
                    let Some(kind) = pick_weighted_random(self.kinds, rng) else {
                        reject(&mut result, sink, Some(candidate.position), RejectReason::NoKind);
                        continue;
                    };
                    match try_place(registry, kind, candidate, facing_mode, rng) {
                        PlacementDecision::Accepted(mut placement) => {
                            commit(registry, kind, &mut placement);
                            sink.send(ScatterEvent::PlacementMade {
                                placement: placement.clone(),
                            });
                            result.placements.push(placement);
                            continue;
                        }
                        PlacementDecision::Rejected(reason) => (Some(candidate.position), reason),
                    }
                }
            };
            reject(&mut result, sink, position, reason);
        }

        result
    }
}

fn reject(
    result: &mut ScatterResult,
    sink: &mut dyn EventSink,
    position: Option<Vec2>,
    reason: RejectReason,
) {
    debug!("Candidate at {:?} rejected: {}.", position, reason);
    result.record_rejection(reason);
    sink.send(ScatterEvent::CandidateRejected { position, reason });
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::Error;
    use crate::geometry::ColliderSet;
    use crate::orientation::OrientationConstraint;
    use crate::placement::events::VecSink;
    use crate::spacing::SpacingRule;

    fn rect(min: Vec2, max: Vec2) -> BoundarySequence {
        BoundarySequence::closed(vec![
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
        .unwrap()
    }

    fn on_rect_edge(p: Vec2, min: Vec2, max: Vec2) -> bool {
        let eps = 1e-3;
        let within_x = p.x >= min.x - eps && p.x <= max.x + eps;
        let within_y = p.y >= min.y - eps && p.y <= max.y + eps;
        let on_vertical = (p.x - min.x).abs() < eps || (p.x - max.x).abs() < eps;
        let on_horizontal = (p.y - min.y).abs() < eps || (p.y - max.y).abs() < eps;
        within_x && within_y && (on_vertical || on_horizontal)
    }

    fn rock() -> PropKind {
        PropKind::new("rock")
            .with_spacing(SpacingRule::new(1.0, 0.0))
            .with_orientation(OrientationConstraint::unconstrained())
    }

    #[test]
    fn area_scatter_stays_inside_and_keeps_spacing() {
        let square = AreaDescriptor::Polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        let kinds = [rock()];
        let casters = ColliderSet::new();
        let runner = ScatterRunner::try_new(ScatterConfig::default(), &kinds, &casters).unwrap();
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(42);

        let result = runner.run(&ScatterArea::new(&square), &mut registry, &mut rng);

        assert_eq!(result.attempts, 300);
        assert_eq!(result.placed() + result.rejected, result.attempts);
        assert!(result.placed() > 0);
        assert_eq!(registry.len(), result.placed());
        for p in &result.placements {
            assert!((0.0..=10.0).contains(&p.position.x));
            assert!((0.0..=10.0).contains(&p.position.y));
            assert!(p.instance.is_some());
            assert!(p.surface_normal.is_none());
        }
        for (i, a) in result.placements.iter().enumerate() {
            for b in &result.placements[i + 1..] {
                assert!(a.position.distance(b.position) >= 1.0 - 1e-5);
            }
        }
        assert!(result.rejected_for(RejectReason::TooCloseToSame) > 0);
    }

    #[test]
    fn origin_translates_the_area() {
        let area = AreaDescriptor::Box {
            center: Vec2::ZERO,
            extents: Vec2::splat(2.0),
        };
        let kinds = [PropKind::new("pebble").with_spacing(SpacingRule::new(0.0, 0.0))];
        let casters = ColliderSet::new();
        let runner = ScatterRunner::new(
            ScatterConfig::default().with_attempts(50),
            &kinds,
            &casters,
        );
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(9);
        let scatter_area = ScatterArea::new(&area).with_origin(Vec2::new(100.0, -100.0));

        let result = runner.run(&scatter_area, &mut registry, &mut rng);

        assert!(result.placed() > 0);
        assert_eq!(result.placed() + result.rejected, 50);
        for p in &result.placements {
            assert!((p.position - Vec2::new(100.0, -100.0)).abs().max_element() <= 2.0 + 1e-3);
        }
    }

    #[test]
    fn events_bracket_the_run() {
        let area = AreaDescriptor::Box {
            center: Vec2::ZERO,
            extents: Vec2::splat(5.0),
        };
        let kinds = [rock()];
        let casters = ColliderSet::new();
        let runner = ScatterRunner::new(
            ScatterConfig::default().with_attempts(40),
            &kinds,
            &casters,
        );
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut sink = VecSink::new();

        let result =
            runner.run_with_events(&ScatterArea::new(&area), &mut registry, &mut rng, &mut sink);

        assert_eq!(sink.placements().count(), result.placed());
        let events = sink.into_inner();
        assert!(matches!(
            events.first(),
            Some(ScatterEvent::RunStarted { kind_count: 1, .. })
        ));
        assert!(matches!(
            events.last(),
            Some(ScatterEvent::RunFinished { result: r }) if r.placed() == result.placed()
        ));
        let rejections = events
            .iter()
            .filter(|e| matches!(e, ScatterEvent::CandidateRejected { .. }))
            .count();
        assert_eq!(rejections, result.rejected);
    }

    #[test]
    fn empty_kind_pool_warns_and_places_nothing() {
        let area = AreaDescriptor::Box {
            center: Vec2::ZERO,
            extents: Vec2::ONE,
        };
        let casters = ColliderSet::new();
        let runner = ScatterRunner::new(ScatterConfig::default(), &[], &casters);
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut sink = VecSink::new();

        let result =
            runner.run_with_events(&ScatterArea::new(&area), &mut registry, &mut rng, &mut sink);

        assert_eq!(result.placed(), 0);
        assert!(registry.is_empty());
        assert!(sink
            .as_slice()
            .iter()
            .any(|e| matches!(e, ScatterEvent::Warning { context, .. } if context == "kinds")));
    }

    #[test]
    fn zero_weight_pool_rejects_with_no_kind() {
        let area = AreaDescriptor::Box {
            center: Vec2::ZERO,
            extents: Vec2::ONE,
        };
        let kinds = [rock().with_weight(0.0)];
        let casters = ColliderSet::new();
        let runner = ScatterRunner::new(
            ScatterConfig::default().with_attempts(10),
            &kinds,
            &casters,
        );
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);

        let result = runner.run(&ScatterArea::new(&area), &mut registry, &mut rng);

        assert_eq!(result.rejected_for(RejectReason::NoKind), 10);
    }

    #[test]
    fn surface_scatter_lands_on_colliders() {
        let area = AreaDescriptor::Box {
            center: Vec2::ZERO,
            extents: Vec2::splat(10.0),
        };
        let (min, max) = (Vec2::new(-8.0, -2.0), Vec2::new(8.0, 0.0));
        let mut casters = ColliderSet::new();
        casters.insert(rect(min, max), 0);

        let kinds = [PropKind::new("grass").with_spacing(SpacingRule::new(0.5, 0.0))];
        let config = ScatterConfig::new(ScatterMode::Surface(SurfaceSearch::default()))
            .with_attempts(200);
        let runner = ScatterRunner::try_new(config, &kinds, &casters).unwrap();
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(17);

        let result = runner.run(&ScatterArea::new(&area), &mut registry, &mut rng);

        assert!(result.placed() > 0);
        let cos_range = 10f32.to_radians().cos();
        for p in &result.placements {
            assert!(on_rect_edge(p.position, min, max), "{:?}", p.position);
            let n = p.surface_normal.expect("surface placement");
            assert!(n.dot(Vec2::Y) >= cos_range - 1e-5, "{n:?}");
            assert!((p.facing.length() - 1.0).abs() < 1e-4);
        }
        assert!(result.rejected_for(RejectReason::NormalOutOfRange) > 0);
    }

    #[test]
    fn surface_scatter_skips_the_area_collider() {
        let area = AreaDescriptor::Box {
            center: Vec2::ZERO,
            extents: Vec2::splat(3.0),
        };
        let mut casters = ColliderSet::new();
        let own = casters.insert(rect(Vec2::splat(-3.0), Vec2::splat(3.0)), 0);

        let kinds = [rock()];
        let config = ScatterConfig::new(ScatterMode::Surface(SurfaceSearch::default()))
            .with_attempts(30);
        let runner = ScatterRunner::new(config, &kinds, &casters);
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(3);

        let result = runner.run(
            &ScatterArea::new(&area).with_collider(own),
            &mut registry,
            &mut rng,
        );

        assert_eq!(result.placed(), 0);
        assert_eq!(result.rejected_for(RejectReason::NoSurface), 30);
    }

    #[test]
    fn perimeter_scatter_resolves_onto_the_boundary() {
        let area = AreaDescriptor::Box {
            center: Vec2::ZERO,
            extents: Vec2::splat(5.0),
        };
        let mut casters = ColliderSet::new();
        casters.insert(BoundarySequence::from_descriptor(&area, None).unwrap(), 0);

        let kinds = [rock().with_spacing(SpacingRule::new(0.5, 0.0))];
        let config = ScatterConfig::new(ScatterMode::Perimeter {
            offset: 1.0,
            mask: LayerMask::ALL,
        })
        .with_attempts(100);
        let runner = ScatterRunner::try_new(config, &kinds, &casters).unwrap();
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(21);

        let result = runner.run(&ScatterArea::new(&area), &mut registry, &mut rng);

        assert!(result.placed() > 0);
        for p in &result.placements {
            assert!(on_rect_edge(p.position, Vec2::splat(-5.0), Vec2::splat(5.0)));
            let n = p.surface_normal.expect("surface placement");
            assert!(n.dot(p.position) > 0.0, "normal {n:?} at {:?}", p.position);
        }
    }

    #[test]
    fn perimeter_scatter_on_clockwise_polygon_faces_outward() {
        let area = AreaDescriptor::Polygon(vec![
            Vec2::new(-5.0, -5.0),
            Vec2::new(-5.0, 5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(5.0, -5.0),
        ]);
        let mut casters = ColliderSet::new();
        casters.insert(BoundarySequence::from_descriptor(&area, None).unwrap(), 0);

        // Only upward normals fit the default cone, so the top edge must be usable.
        let kinds = [PropKind::new("moss").with_spacing(SpacingRule::new(0.5, 0.0))];
        let config = ScatterConfig::new(ScatterMode::Perimeter {
            offset: 1.0,
            mask: LayerMask::ALL,
        })
        .with_attempts(100);
        let runner = ScatterRunner::try_new(config, &kinds, &casters).unwrap();
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(21);

        let result = runner.run(&ScatterArea::new(&area), &mut registry, &mut rng);

        assert!(result.placed() > 0);
        for p in &result.placements {
            assert!((p.position.y - 5.0).abs() < 1e-3, "{:?}", p.position);
            let n = p.surface_normal.expect("surface placement");
            assert!(n.dot(Vec2::Y) > 0.99, "{n:?}");
        }
    }

    #[test]
    fn perimeter_scatter_falls_back_for_circles() {
        let area = AreaDescriptor::Circle {
            center: Vec2::ZERO,
            radius: 4.0,
        };
        let casters = ColliderSet::new();
        let kinds = [rock()];
        let config = ScatterConfig::new(ScatterMode::Perimeter {
            offset: 1.0,
            mask: LayerMask::ALL,
        })
        .with_attempts(60);
        let runner = ScatterRunner::new(config, &kinds, &casters);
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(8);
        let mut sink = VecSink::new();

        let result =
            runner.run_with_events(&ScatterArea::new(&area), &mut registry, &mut rng, &mut sink);

        assert!(result.placed() > 0);
        for p in &result.placements {
            assert!(p.position.length() <= 4.0 + 1e-5);
            assert!(p.surface_normal.is_none());
        }
        assert!(sink.as_slice().iter().any(|e| matches!(
            e,
            ScatterEvent::Warning { context, .. } if context == "area:circle"
        )));
    }

    #[test]
    fn area_dab_places_inside_the_brush() {
        let kinds = [PropKind::new("flower").with_spacing(SpacingRule::new(0.0, 0.0))];
        let casters = ColliderSet::new();
        let runner = ScatterRunner::new(ScatterConfig::default(), &kinds, &casters);
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(12);
        let brush = BrushConfig::new(3.0).with_spawn_rate(5);
        let center = Vec2::new(20.0, 20.0);

        let result = runner
            .dab(&brush, center, 0.0, &mut registry, &mut rng)
            .unwrap();

        assert_eq!(result.placed(), 5);
        for p in &result.placements {
            assert!(p.position.distance(center) <= 3.0 + 1e-5);
        }
    }

    #[test]
    fn surface_dab_hits_nearby_walls() {
        let mut casters = ColliderSet::new();
        casters.insert(rect(Vec2::splat(-2.0), Vec2::splat(2.0)), 0);
        let kinds = [rock()];
        let runner = ScatterRunner::new(ScatterConfig::default(), &kinds, &casters);
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(4);
        let brush = BrushConfig::new(5.0)
            .with_spawn_rate(1)
            .with_target(BrushTarget::Surfaces(LayerMask::ALL));

        let hit = runner
            .dab(&brush, Vec2::ZERO, 0.5, &mut registry, &mut rng)
            .unwrap();
        assert_eq!(hit.placed(), 1);
        let p = &hit.placements[0];
        assert!(on_rect_edge(p.position, Vec2::splat(-2.0), Vec2::splat(2.0)));
        assert!(p.surface_normal.is_some());

        let far = Vec2::new(50.0, 50.0);
        let miss = runner
            .dab(&brush.with_spawn_rate(3), far, 0.0, &mut registry, &mut rng)
            .unwrap();
        assert_eq!(miss.placed(), 0);
        assert_eq!(miss.rejected_for(RejectReason::NoSurface), 3);
    }

    #[test]
    fn invalid_settings_are_reported() {
        let casters = ColliderSet::new();
        let bad_kind = [rock().with_default_facing(Vec2::ZERO)];
        assert!(matches!(
            ScatterRunner::try_new(ScatterConfig::default(), &bad_kind, &casters),
            Err(Error::InvalidConfig(_))
        ));

        let kinds = [rock()];
        let runner = ScatterRunner::new(ScatterConfig::default(), &kinds, &casters);
        let mut registry = InstanceRegistry::new();
        let mut rng = StdRng::seed_from_u64(0);
        let brush = BrushConfig::new(-1.0);
        assert!(runner
            .dab(&brush, Vec2::ZERO, 0.0, &mut registry, &mut rng)
            .is_err());
    }
}
