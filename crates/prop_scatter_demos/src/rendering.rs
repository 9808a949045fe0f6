use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use image::{Rgb, RgbImage};
use prop_scatter::boundary::BoundarySequence;
use prop_scatter::geometry::Aabb;
use prop_scatter::placement::Placement;

/// How placements of one kind are drawn.
#[derive(Debug, Clone, Copy)]
pub enum KindStyle {
    /// Filled disc.
    Circle { color: [u8; 3], radius: i32 },
    /// Disc plus a tick along the placement's facing.
    Oriented {
        color: [u8; 3],
        radius: i32,
        length: f32,
    },
}

impl Default for KindStyle {
    fn default() -> Self {
        KindStyle::Circle {
            color: [200, 200, 200],
            radius: 2,
        }
    }
}

/// Output image size, the world window it shows, and per-kind styles.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub window: Aabb,
    pub background: [u8; 3],
    pub boundary_color: [u8; 3],
    kind_styles: HashMap<String, KindStyle>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), window: Aabb) -> Self {
        Self {
            image_size,
            window,
            background: [24, 24, 28],
            boundary_color: [120, 120, 130],
            kind_styles: HashMap::new(),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_boundary_color(mut self, color: [u8; 3]) -> Self {
        self.boundary_color = color;
        self
    }

    pub fn set_kind_style(&mut self, kind: impl Into<String>, style: KindStyle) {
        self.kind_styles.insert(kind.into(), style);
    }

    fn style_for(&self, kind: &str) -> KindStyle {
        self.kind_styles.get(kind).copied().unwrap_or_default()
    }

    fn to_pixel(&self, p: Vec2) -> (f32, f32) {
        let min = self.window.min();
        let size = (self.window.extents * 2.0).max(Vec2::splat(f32::EPSILON));
        let (w, h) = self.image_size;
        let u = (p.x - min.x) / size.x * w as f32;
        let v = (1.0 - (p.y - min.y) / size.y) * h as f32;
        (u, v)
    }
}

/// What to draw: collider and area outlines plus placements.
#[derive(Debug, Default)]
pub struct Scene<'a> {
    pub boundaries: Vec<&'a BoundarySequence>,
    pub placements: Vec<Placement>,
}

impl<'a> Scene<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundary(mut self, boundary: &'a BoundarySequence) -> Self {
        self.boundaries.push(boundary);
        self
    }

    pub fn extend_placements(&mut self, placements: impl IntoIterator<Item = Placement>) {
        self.placements.extend(placements);
    }
}

pub fn render_scene_to_png(
    scene: &Scene<'_>,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be non-zero");
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    for boundary in &scene.boundaries {
        for edge in boundary.edges() {
            draw_line(
                &mut img,
                config.to_pixel(edge.start),
                config.to_pixel(edge.end),
                config.boundary_color,
            );
        }
    }

    for placement in &scene.placements {
        let center = config.to_pixel(placement.position);
        match config.style_for(&placement.kind_id) {
            KindStyle::Circle { color, radius } => fill_disc(&mut img, center, radius, color),
            KindStyle::Oriented {
                color,
                radius,
                length,
            } => {
                fill_disc(&mut img, center, radius, color);
                let tip = config.to_pixel(placement.position + placement.facing * length);
                draw_line(&mut img, center, tip, color);
            }
        }
    }

    let path = path.as_ref();
    img.save(path)?;
    tracing::info!("Wrote {}.", path.display());
    Ok(())
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn draw_line(img: &mut RgbImage, from: (f32, f32), to: (f32, f32), color: [u8; 3]) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (from.0 + dx * t).round() as i64;
        let y = (from.1 + dy * t).round() as i64;
        put(img, x, y, color);
    }
}

fn fill_disc(img: &mut RgbImage, center: (f32, f32), radius: i32, color: [u8; 3]) {
    let (cx, cy) = (center.0.round() as i64, center.1.round() as i64);
    let r = radius.max(0) as i64;
    for y in -r..=r {
        for x in -r..=r {
            if x * x + y * y <= r * r {
                put(img, cx + x, cy + y, color);
            }
        }
    }
}
