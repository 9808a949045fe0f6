use glam::Vec2;
use prop_scatter::prelude::*;
use prop_scatter_demos::{init_tracing, render_scene_to_png, KindStyle, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // An irregular clearing, counter-clockwise.
    let clearing = AreaDescriptor::Polygon(vec![
        Vec2::new(-40.0, -30.0),
        Vec2::new(10.0, -45.0),
        Vec2::new(45.0, -10.0),
        Vec2::new(35.0, 35.0),
        Vec2::new(-5.0, 45.0),
        Vec2::new(-45.0, 15.0),
    ]);

    // Rocks are common and keep a wide berth from bushes; bushes cluster tighter.
    let kinds = vec![
        PropKind::new("rock")
            .with_spacing(SpacingRule::new(6.0, 4.0))
            .with_weight(2.0),
        PropKind::new("bush").with_spacing(SpacingRule::new(3.0, 1.0)),
    ];

    let config = ScatterConfig::default().with_attempts(600);
    let colliders = ColliderSet::new();
    let runner = ScatterRunner::try_new(config, &kinds, &colliders)?;

    let mut registry = InstanceRegistry::new();
    let mut rng = StdRng::seed_from_u64(2025);
    let result = runner.run(&ScatterArea::new(&clearing), &mut registry, &mut rng);

    for (reason, count) in &result.rejections {
        info!("rejected {count:>4} candidates: {reason}");
    }

    let boundary = BoundarySequence::from_descriptor(&clearing, None)?;
    let mut scene = Scene::new().with_boundary(&boundary);
    scene.extend_placements(result.placements);

    let mut rc = RenderConfig::new((800, 800), clearing.bounds());
    rc.set_kind_style(
        "rock",
        KindStyle::Circle {
            color: [170, 160, 150],
            radius: 6,
        },
    );
    rc.set_kind_style(
        "bush",
        KindStyle::Circle {
            color: [70, 160, 80],
            radius: 4,
        },
    );
    render_scene_to_png(&scene, &rc, "area-scatter-polygon.png")?;

    Ok(())
}
