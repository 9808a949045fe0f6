//! Spacing arbitration between placed instances.
//!
//! [`InstanceRegistry`] is owned by the editing session and passed explicitly to
//! whoever validates or commits placements. Queries are linear in the number of
//! registered instances, which is fine at interactive scales (hundreds of props)
//! and is the scalability limit of this design.
use std::collections::HashMap;

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque category identity, typically the prop template id.
pub type CategoryId = String;

/// Minimum spacing distances of one prop category.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingRule {
    /// Minimum distance to instances of the same category.
    pub same_category: f32,
    /// Minimum distance to instances of any other category.
    pub different_category: f32,
}

impl Default for SpacingRule {
    fn default() -> Self {
        Self {
            same_category: 1.0,
            different_category: 0.0,
        }
    }
}

impl SpacingRule {
    pub fn new(same_category: f32, different_category: f32) -> Self {
        Self {
            same_category,
            different_category,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("same_category", self.same_category),
            ("different_category", self.different_category),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} distance must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Handle returned by [`InstanceRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// A committed placement as seen by the spacing rules.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    pub position: Vec2,
    pub category: CategoryId,
    pub spacing: SpacingRule,
}

impl PlacedInstance {
    pub fn new(position: Vec2, category: impl Into<CategoryId>, spacing: SpacingRule) -> Self {
        Self {
            position,
            category: category.into(),
            spacing,
        }
    }
}

/// Outcome of a spacing check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpacingVerdict {
    Clear,
    /// A same-category instance is closer than the candidate's same-category distance.
    TooCloseToSame { neighbor: InstanceId, distance: f32 },
    /// A different-category instance is closer than either side's cross-category distance.
    TooCloseToOther { neighbor: InstanceId, distance: f32 },
}

impl SpacingVerdict {
    pub fn is_clear(&self) -> bool {
        matches!(self, SpacingVerdict::Clear)
    }
}

/// Registry of the currently active instances of a session.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    instances: HashMap<InstanceId, PlacedInstance>,
    next_id: u64,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance. Call once when the host commits it.
    pub fn register(&mut self, instance: PlacedInstance) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.instances.insert(id, instance);
        id
    }

    /// Removes an instance. Call once when the host destroys it.
    pub fn deregister(&mut self, id: InstanceId) -> Option<PlacedInstance> {
        self.instances.remove(&id)
    }

    /// Moves a registered instance. Returns `false` for unknown ids.
    pub fn reposition(&mut self, id: InstanceId, position: Vec2) -> bool {
        match self.instances.get_mut(&id) {
            Some(instance) => {
                instance.position = position;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: InstanceId) -> Option<&PlacedInstance> {
        self.instances.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &PlacedInstance)> {
        self.instances.iter().map(|(id, inst)| (*id, inst))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Checks `candidate` of `category` against every registered instance.
    ///
    /// Same-category neighbors reject when closer than `same_threshold`. Other
    /// categories reject when closer than `max(different_threshold, neighbor's own
    /// different-category distance)`, so either side can enforce its clearance.
    /// Distances are compared squared and strictly. Negative or NaN thresholds count
    /// as zero and never reject.
    pub fn check(
        &self,
        candidate: Vec2,
        category: &str,
        same_threshold: f32,
        different_threshold: f32,
    ) -> SpacingVerdict {
        let same = same_threshold.max(0.0);
        let same_sq = same * same;
        for (id, other) in &self.instances {
            let d2 = other.position.distance_squared(candidate);
            if other.category == category {
                if d2 < same_sq {
                    return SpacingVerdict::TooCloseToSame {
                        neighbor: *id,
                        distance: d2.sqrt(),
                    };
                }
            } else {
                let threshold = different_threshold
                    .max(other.spacing.different_category)
                    .max(0.0);
                if d2 < threshold * threshold {
                    return SpacingVerdict::TooCloseToOther {
                        neighbor: *id,
                        distance: d2.sqrt(),
                    };
                }
            }
        }
        SpacingVerdict::Clear
    }

    /// `true` when `candidate` respects every spacing rule.
    pub fn validate(
        &self,
        candidate: Vec2,
        category: &str,
        same_threshold: f32,
        different_threshold: f32,
    ) -> bool {
        self.check(candidate, category, same_threshold, different_threshold)
            .is_clear()
    }

    /// [`Self::check`] with the thresholds of `rule`.
    pub fn check_rule(
        &self,
        candidate: Vec2,
        category: &str,
        rule: &SpacingRule,
    ) -> SpacingVerdict {
        self.check(
            candidate,
            category,
            rule.same_category,
            rule.different_category,
        )
    }
}
