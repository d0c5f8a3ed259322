//! Edge detection on classified inputs.
//!
//! The detector keeps the previous tick's snapshot and compares the
//! *classified* state of an input across the two snapshots, never raw bits.
//! There is no debounce beyond the poll interval itself: a single noisy tick
//! ends or restarts an episode.
//!
//! ```text
//!             Entered
//!  Inactive ───────────▶ Active
//!     ▲                    │
//!     └────────────────────┘
//!             Released
//! ```

use crate::inputs::{LogicalInput, PinSnapshot};

/// Edge of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Inactive → Active.
    Entered,
    /// Active → Inactive.
    Released,
}

/// Sliding window of depth two over the input snapshots.
#[derive(Debug, Clone)]
pub struct TransitionDetector {
    previous: PinSnapshot,
}

impl Default for TransitionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionDetector {
    /// Start with a snapshot in which nothing is active, so the first poll
    /// of an idle board reports no edge.
    pub fn new() -> Self {
        Self {
            previous: PinSnapshot::idle(),
        }
    }

    /// Edge of `input` between the stored snapshot and `current`, if any.
    pub fn edge(&self, input: LogicalInput, current: PinSnapshot) -> Option<Edge> {
        match (self.previous.is_active(input), current.is_active(input)) {
            (false, true) => Some(Edge::Entered),
            (true, false) => Some(Edge::Released),
            _ => None,
        }
    }

    /// Make `current` the reference for the next tick.
    pub fn commit(&mut self, current: PinSnapshot) {
        self.previous = current;
    }
}
