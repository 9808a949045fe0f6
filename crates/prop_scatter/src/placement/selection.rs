//! Selection of the [`PropKind`] to try at each candidate.
//!
//! A weighted pool draws each kind proportionally to [`PropKind::weight`]; kinds
//! with a non-positive or non-finite weight are never drawn.
use rand::RngCore;

use crate::placement::PropKind;
use crate::sampling::rand01;

fn drawable(kind: &PropKind) -> bool {
    kind.weight.is_finite() && kind.weight > 0.0
}

pub fn pick_weighted_random<'a, R: RngCore + ?Sized>(
    kinds: &'a [PropKind],
    rng: &mut R,
) -> Option<&'a PropKind> {
    let total_weight: f32 = kinds.iter().filter(|k| drawable(k)).map(|k| k.weight).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let mut roll = rand01(rng) * total_weight;
    for k in kinds.iter().filter(|k| drawable(k)) {
        roll -= k.weight;
        if roll <= 0.0 {
            return Some(k);
        }
    }

    kinds.iter().rev().find(|k| drawable(k))
}
