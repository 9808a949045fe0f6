use glam::Vec2;
use prop_scatter::prelude::*;
use prop_scatter_demos::{init_tracing, render_scene_to_png, KindStyle, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const GROUND_LAYER: u8 = 3;

fn ledge(center: Vec2, half_width: f32) -> anyhow::Result<BoundarySequence> {
    let desc = AreaDescriptor::Box {
        center,
        extents: Vec2::new(half_width, 1.5),
    };
    Ok(BoundarySequence::from_descriptor(&desc, None)?)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cave = AreaDescriptor::Box {
        center: Vec2::ZERO,
        extents: Vec2::new(60.0, 40.0),
    };
    let ledges = [
        ledge(Vec2::new(-30.0, -20.0), 20.0)?,
        ledge(Vec2::new(25.0, -5.0), 18.0)?,
        ledge(Vec2::new(-10.0, 20.0), 25.0)?,
    ];

    let mut colliders = ColliderSet::new();
    for l in &ledges {
        colliders.insert(l.clone(), GROUND_LAYER);
    }

    // Grass grows on top of ledges, vines hang from their undersides. Both assets
    // can be mirrored, so a tilted default facing accepts either slope direction.
    let kinds = vec![
        PropKind::new("grass")
            .with_spacing(SpacingRule::new(2.5, 1.0))
            .with_orientation(OrientationConstraint::new(20.0, 10.0)),
        PropKind::new("vine")
            .with_spacing(SpacingRule::new(4.0, 1.0))
            .with_default_facing(Vec2::new(0.1, -1.0))
            .with_orientation(OrientationConstraint::new(25.0, 5.0)),
    ];

    let search = SurfaceSearch::default()
        .with_search_distance(15.0)
        .with_mask(LayerMask::from_layer(GROUND_LAYER));
    let config = ScatterConfig::new(ScatterMode::Surface(search))
        .with_attempts(800)
        .with_facing_mode(FacingMode::PointToSurfaceNormal);
    let runner = ScatterRunner::try_new(config, &kinds, &colliders)?;

    let mut registry = InstanceRegistry::new();
    let mut rng = StdRng::seed_from_u64(7);
    let result = runner.run(&ScatterArea::new(&cave), &mut registry, &mut rng);

    info!(
        "{} placed, {} without a surface, {} facing the wrong way",
        result.placed(),
        result.rejected_for(RejectReason::NoSurface),
        result.rejected_for(RejectReason::NormalOutOfRange),
    );

    let mut scene = Scene::new();
    for l in &ledges {
        scene = scene.with_boundary(l);
    }
    scene.extend_placements(result.placements);

    let mut rc = RenderConfig::new((960, 640), cave.bounds()).with_background([16, 16, 22]);
    rc.set_kind_style(
        "grass",
        KindStyle::Oriented {
            color: [110, 200, 90],
            radius: 2,
            length: 3.0,
        },
    );
    rc.set_kind_style(
        "vine",
        KindStyle::Oriented {
            color: [60, 140, 120],
            radius: 2,
            length: 5.0,
        },
    );
    render_scene_to_png(&scene, &rc, "surface-scatter-ledges.png")?;

    Ok(())
}
