use glam::Vec2;
use prop_scatter::prelude::*;
use prop_scatter_demos::{init_tracing, render_scene_to_png, KindStyle, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A boulder outline used both as the scatter area and as the collider to hug.
    let boulder = AreaDescriptor::Polygon(vec![
        Vec2::new(-12.0, -8.0),
        Vec2::new(4.0, -11.0),
        Vec2::new(13.0, -2.0),
        Vec2::new(9.0, 9.0),
        Vec2::new(-6.0, 11.0),
        Vec2::new(-14.0, 2.0),
    ]);
    let origin = Vec2::new(-20.0, 0.0);
    let scatter_area = ScatterArea::new(&boulder).with_origin(origin);
    let outline = scatter_area.boundary()?;

    let mut colliders = ColliderSet::new();
    colliders.insert(outline.clone(), 0);

    let moss_orientation = OrientationConstraint::unconstrained().with_point_direction_range(10.0);
    let kinds = vec![
        PropKind::new("moss")
            .with_spacing(SpacingRule::new(1.5, 0.5))
            .with_orientation(moss_orientation),
        PropKind::new("pebble")
            .with_spacing(SpacingRule::new(2.0, 1.5))
            .with_weight(0.5),
    ];

    let mut registry = InstanceRegistry::new();
    let mut rng = StdRng::seed_from_u64(99);
    let mut scene = Scene::new().with_boundary(&outline);

    // Props hugging the boulder outline, resolved from a ring one unit outside.
    let perimeter = ScatterConfig::new(ScatterMode::Perimeter {
        offset: 1.0,
        mask: LayerMask::from_layer(0),
    })
    .with_attempts(120);
    let runner = ScatterRunner::try_new(perimeter, &kinds, &colliders)?;
    let mut sink = VecSink::new();
    let ring = runner.run_with_events(&scatter_area, &mut registry, &mut rng, &mut sink);
    info!("perimeter: {} placed on the outline", ring.placed());
    scene.extend_placements(sink.placements().cloned());

    // A brush stroke sweeping right from the boulder, one dab per step. Dabs share
    // the registry, so later dabs respect earlier placements.
    let brush = BrushConfig::new(6.0).with_spawn_rate(4);
    let surface_brush = brush.with_target(BrushTarget::Surfaces(LayerMask::ALL));
    let mut placed_by_brush = Vec::new();
    let mut log_sink = FnSink::new(|event| {
        if let ScatterEvent::PlacementMade { placement } = event {
            debug!("brush placed {} at {:?}", placement.kind_id, placement.position);
            placed_by_brush.push(placement);
        }
    });
    for step in 0..12 {
        let center = Vec2::new(-8.0 + step as f32 * 3.0, 4.0 * (step as f32 * 0.6).sin());
        let dab_brush = if step % 3 == 0 { &surface_brush } else { &brush };
        let phase = step as f32 * 0.37 % 1.0;
        runner.dab_with_events(dab_brush, center, phase, &mut registry, &mut rng, &mut log_sink)?;
    }
    info!("brush stroke: {} placed", placed_by_brush.len());
    scene.extend_placements(placed_by_brush);

    info!("{} instances registered", registry.len());

    let window = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 25.0));
    let mut rc = RenderConfig::new((960, 600), window).with_boundary_color([180, 170, 150]);
    rc.set_kind_style(
        "moss",
        KindStyle::Oriented {
            color: [90, 170, 70],
            radius: 2,
            length: 2.0,
        },
    );
    rc.set_kind_style(
        "pebble",
        KindStyle::Circle {
            color: [150, 150, 160],
            radius: 3,
        },
    );
    render_scene_to_png(&scene, &rc, "perimeter-and-brush.png")?;

    Ok(())
}
