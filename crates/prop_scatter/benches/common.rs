#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec2;
use prop_scatter::boundary::BoundarySequence;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(0x5CA7_7E42 ^ seed)
}

/// Counter-clockwise regular polygon with `sides` vertices.
pub fn regular_polygon(sides: usize, radius: f32) -> BoundarySequence {
    let points = (0..sides)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / sides as f32;
            Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect();
    BoundarySequence::closed(points).expect("regular polygon is valid")
}
