//! Event types and sinks for observing scatter runs and brush dabs.
//!
//! Sinks are invoked synchronously by [`crate::placement::runner::ScatterRunner`]
//! while it works, so a host can instantiate, rename or record undo steps for each
//! placement as it is made.
use glam::Vec2;

use crate::placement::config::ScatterConfig;
use crate::placement::runner::ScatterResult;
use crate::placement::{Placement, RejectReason};

/// Progress and outcome notifications from runs and dabs.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted when a run or dab starts.
    RunStarted {
        /// The configuration used.
        config: ScatterConfig,
        /// Number of prop kinds available to the run.
        kind_count: usize,
    },

    /// Emitted when a run or dab finishes.
    RunFinished {
        /// Aggregated result of the run.
        result: ScatterResult,
    },

    /// Emitted when a candidate was discarded.
    CandidateRejected {
        /// Candidate position, if one was produced.
        position: Option<Vec2>,
        /// Why the candidate was discarded.
        reason: RejectReason,
    },

    /// Emitted when a placement is made and registered.
    PlacementMade {
        /// The committed placement, with its instance id set.
        placement: Placement,
    },

    /// Something was skipped or degraded; the run continues.
    Warning {
        /// Context string (e.g. area shape, kind id).
        context: String,
        /// Message for logs or a status bar.
        message: String,
    },
}

/// Receiver for [`ScatterEvent`]s, called in emission order.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);
}

/// Discards every event.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScatterEvent) {}
}

/// Calls a closure per event.
pub struct FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

/// Records events in order for later inspection.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Placements in the order they were made.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.events.iter().filter_map(|e| match e {
            ScatterEvent::PlacementMade { placement } => Some(placement),
            _ => None,
        })
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        self.events.push(event);
    }
}
